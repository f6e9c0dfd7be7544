//! Multipart response round-trip tests: encode over HTTP, split on the
//! declared boundary, and verify the parts against the stored statements.

mod common;

use axum::http::StatusCode;

use xapi_lrs::infra::StatementRepository;
use xapi_lrs::ATTACHMENT_HASH_HEADER;

use common::*;

/// A decoded multipart part: header lines and raw body bytes.
struct Part {
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Part {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Extract the boundary token from a `multipart/mixed; boundary="..."`
/// content type.
fn boundary_of(content_type: &str) -> String {
    let marker = "boundary=\"";
    let start = content_type.find(marker).expect("no boundary declared") + marker.len();
    let end = content_type[start..].find('"').unwrap() + start;
    content_type[start..end].to_string()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Split an encoded stream into its parts, asserting the terminator is
/// present and well-formed.
fn split_multipart(body: &[u8], boundary: &str) -> Vec<Part> {
    let delimiter = format!("--{boundary}\r\n").into_bytes();
    let terminator = format!("--{boundary}--\r\n").into_bytes();

    assert!(
        body.ends_with(&terminator),
        "stream must end with the closing boundary"
    );
    let mut rest = &body[..body.len() - terminator.len()];

    assert!(rest.starts_with(&delimiter), "stream must open with the boundary");
    rest = &rest[delimiter.len()..];

    let mut raw_parts = Vec::new();
    while let Some(at) = find(rest, &delimiter) {
        raw_parts.push(&rest[..at]);
        rest = &rest[at + delimiter.len()..];
    }
    raw_parts.push(rest);

    raw_parts
        .into_iter()
        .map(|raw| {
            let header_end = find(raw, b"\r\n\r\n").expect("part must have a header block");
            let headers = std::str::from_utf8(&raw[..header_end])
                .unwrap()
                .lines()
                .map(|line| {
                    let (name, value) = line.split_once(": ").expect("malformed header line");
                    (name.to_string(), value.to_string())
                })
                .collect();
            // Strip the header separator and the trailing CRLF.
            let body = raw[header_end + 4..raw.len() - 2].to_vec();
            Part { headers, body }
        })
        .collect()
}

#[tokio::test]
async fn single_statement_with_attachments_round_trips() {
    let (app, store) = test_app();
    let id = random_statement_id();
    let mut statement = statement_with_id(id);
    let attachment = text_attachment("attachment payload");
    statement.attachments.push(attachment.clone());
    store.store_statement(statement, false).await.unwrap();

    let response = get(&app, &format!("/statements?statementId={id}&attachments=true")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("multipart/mixed;"));
    let boundary = boundary_of(&content_type);

    let body = body_bytes(response).await;
    let parts = split_multipart(&body, &boundary);
    assert_eq!(parts.len(), 2);

    // Part 0: the statement JSON, matching what a plain GET serves.
    assert_eq!(parts[0].header("Content-Type"), Some("application/json"));
    assert!(parts[0].header("Last-Modified").is_some());
    let from_part: serde_json::Value = serde_json::from_slice(&parts[0].body).unwrap();
    let plain = get(&app, &format!("/statements?statementId={id}")).await;
    let from_get: serde_json::Value = serde_json::from_slice(&body_bytes(plain).await).unwrap();
    assert_eq!(from_part, from_get);

    // Part 1: the raw attachment bytes with their declared hash.
    assert_eq!(parts[1].header("Content-Type"), Some("text/plain"));
    assert_eq!(parts[1].header("Content-Transfer-Encoding"), Some("binary"));
    assert_eq!(
        parts[1].header(ATTACHMENT_HASH_HEADER),
        Some(attachment.sha2.as_str())
    );
    assert_eq!(parts[1].body, b"attachment payload");
}

#[tokio::test]
async fn collection_multipart_has_one_part_per_attachment() {
    let (app, store) = test_app();

    let mut first = sample_statement();
    first.attachments.push(text_attachment("one"));
    first.attachments.push(text_attachment("two"));
    store.store_statement(first, true).await.unwrap();

    let mut second = sample_statement();
    second.attachments.push(text_attachment("three"));
    store.store_statement(second, true).await.unwrap();

    let response = get(&app, "/statements?attachments=true").await;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let boundary = boundary_of(&content_type);

    let body = body_bytes(response).await;
    let parts = split_multipart(&body, &boundary);
    assert_eq!(parts.len(), 4);

    let result: serde_json::Value = serde_json::from_slice(&parts[0].body).unwrap();
    assert_eq!(result["statements"].as_array().unwrap().len(), 2);

    let bodies: Vec<&[u8]> = parts[1..].iter().map(|p| p.body.as_slice()).collect();
    for expected in [b"one".as_slice(), b"two", b"three"] {
        assert!(bodies.contains(&expected), "missing attachment part");
    }
}

#[tokio::test]
async fn attachments_false_serves_plain_json() {
    let (app, store) = test_app();
    let id = random_statement_id();
    let mut statement = statement_with_id(id);
    statement.attachments.push(text_attachment("payload"));
    store.store_statement(statement, false).await.unwrap();

    let response = get(&app, &format!("/statements?statementId={id}&attachments=false")).await;
    let content_type = response.headers().get("content-type").unwrap();
    assert_eq!(content_type, "application/json");

    // Attachment metadata stays in the JSON; the bytes do not.
    let body = body_bytes(response).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["attachments"][0]["contentType"], "text/plain");
    assert!(find(&body, b"payload").is_none());
}
