//! Activities: the things an experience statement is about.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Iri;

/// An activity, identified by an IRI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Iri,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<ActivityDefinition>,
}

/// Optional metadata describing an activity.
///
/// The language maps are keyed by RFC 5646 language tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<HashMap<String, String>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<Iri>,
}

impl Activity {
    pub fn new(id: Iri) -> Self {
        Self {
            id,
            definition: None,
        }
    }
}
