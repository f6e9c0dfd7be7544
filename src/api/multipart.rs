//! Multipart/mixed encoding of a JSON payload plus binary attachments.
//!
//! Wire format per part: `--<boundary>\r\n`, one `name: value` line per
//! header, a blank line, the raw body and a trailing `\r\n`. The stream is
//! terminated by `--<boundary>--\r\n`. Attachment bodies are transmitted
//! binary, never base64.

use std::convert::Infallible;

use axum::body::Body;
use bytes::{BufMut, Bytes, BytesMut};

use crate::domain::Attachment;

/// Response header carrying an attachment's SHA-256 digest.
pub const ATTACHMENT_HASH_HEADER: &str = "X-Experience-API-Hash";

/// The JSON part of a response: body bytes plus the headers (beyond the
/// content type) that part 0 of a multipart response repeats.
#[derive(Debug, Clone)]
pub struct JsonBody {
    pub body: Bytes,
    /// Extra `name: value` headers, e.g. `Last-Modified`.
    pub headers: Vec<(&'static str, String)>,
}

impl JsonBody {
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: String) -> Self {
        self.headers.push((name, value));
        self
    }
}

/// A multipart/mixed response body: the JSON payload as part 0 followed by
/// one part per attachment, in discovery order.
///
/// Attachment parts have no settable content; their bodies always come from
/// the attachment bytes, and their headers are derived at encoding time.
#[derive(Debug)]
pub struct MultipartBody {
    boundary: String,
    json: JsonBody,
    attachments: Vec<Attachment>,
}

impl MultipartBody {
    pub fn new(json: JsonBody, attachments: Vec<Attachment>) -> Self {
        Self {
            boundary: generate_boundary(),
            json,
            attachments,
        }
    }

    /// The boundary token delimiting the parts, unique per response.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Value for the response `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/mixed; boundary=\"{}\"", self.boundary)
    }

    /// Encode the parts as a sequence of chunks, terminator included.
    pub fn chunks(&self) -> Vec<Bytes> {
        let mut chunks = Vec::with_capacity(self.attachments.len() + 2);

        let mut json_headers: Vec<(&str, String)> =
            vec![("Content-Type", "application/json".to_string())];
        json_headers.extend(self.json.headers.iter().cloned());
        chunks.push(encode_part(
            &self.boundary,
            &json_headers,
            &self.json.body,
        ));

        for attachment in &self.attachments {
            let headers = vec![
                ("Content-Type", attachment.content_type.clone()),
                ("Content-Transfer-Encoding", "binary".to_string()),
                (ATTACHMENT_HASH_HEADER, attachment.sha2.clone()),
            ];
            chunks.push(encode_part(&self.boundary, &headers, &attachment.content));
        }

        chunks.push(Bytes::from(format!("--{}--\r\n", self.boundary)));
        chunks
    }

    /// Consume the parts into a streaming HTTP body.
    ///
    /// The length is not declared up front, so hyper transmits the response
    /// chunked; dropping the body mid-transfer simply drops the remaining
    /// chunks.
    pub fn into_body(self) -> Body {
        let chunks = self.chunks();
        Body::from_stream(tokio_stream::iter(
            chunks.into_iter().map(Ok::<_, Infallible>),
        ))
    }
}

fn encode_part(boundary: &str, headers: &[(&str, String)], body: &[u8]) -> Bytes {
    let mut buf = BytesMut::new();
    buf.put_slice(format!("--{boundary}\r\n").as_bytes());
    for (name, value) in headers {
        buf.put_slice(format!("{name}: {value}\r\n").as_bytes());
    }
    buf.put_slice(b"\r\n");
    buf.put_slice(body);
    buf.put_slice(b"\r\n");
    buf.freeze()
}

/// High-entropy boundary token: epoch nanoseconds plus 64 random bits. No
/// collision scan over part content is performed, matching common multipart
/// practice.
fn generate_boundary() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    format!("{nanos:x}{:016x}", rand::random::<u64>())
}
