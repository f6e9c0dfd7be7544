//! Statement attachments: typed binary payloads with a SHA-256 digest.

use std::collections::HashMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::Iri;

/// A binary attachment to a statement.
///
/// The metadata travels inside the statement JSON; the raw `content` bytes
/// are never part of the JSON document and are only transmitted as a
/// dedicated part of a multipart response. `sha2` is the lowercase hex
/// SHA-256 digest of `content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub usage_type: Iri,
    pub display: HashMap<String, String>,
    pub content_type: String,
    pub length: u64,
    pub sha2: String,
    #[serde(skip)]
    pub content: Bytes,
}

impl Attachment {
    /// Build an attachment from raw bytes, deriving `length` and `sha2`
    /// from the content so they can never disagree with it.
    pub fn from_content(
        usage_type: Iri,
        content_type: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        let content = content.into();
        let sha2 = hex::encode(Sha256::digest(&content));

        Self {
            usage_type,
            display: HashMap::new(),
            content_type: content_type.into(),
            length: content.len() as u64,
            sha2,
            content,
        }
    }

    /// Equality on the attachment metadata only.
    ///
    /// Deserialized attachments carry no content bytes, so comparing stored
    /// and incoming statements must go through the digest instead of the
    /// payload.
    pub fn same_metadata(&self, other: &Attachment) -> bool {
        self.usage_type == other.usage_type
            && self.display == other.display
            && self.content_type == other.content_type
            && self.length == other.length
            && self.sha2 == other.sha2
    }
}
