//! Statements: immutable actor-verb-object experience records.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{Activity, Agent, Attachment, Iri};

/// Verb IRI that marks a statement as voiding another statement.
pub const VOIDING_VERB: &str = "http://adlnet.gov/expapi/verbs/voided";

/// A statement identifier (UUID).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatementId(Uuid);

/// Error returned when a string is not a valid statement id.
#[derive(Debug, Error)]
#[error("\"{0}\" is not a valid UUID")]
pub struct InvalidStatementId(pub String);

impl StatementId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn from_string(value: &str) -> Result<Self, InvalidStatementId> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| InvalidStatementId(value.to_string()))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for StatementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The action of a statement, identified by an IRI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verb {
    pub id: Iri,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<HashMap<String, String>>,
}

impl Verb {
    pub fn new(id: Iri) -> Self {
        Self { id, display: None }
    }
}

/// The object of a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "objectType")]
pub enum StatementObject {
    Activity(Activity),
    Agent(Agent),
    StatementRef(StatementRef),
}

/// A pointer to another statement, e.g. the target of a voiding statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRef {
    pub id: StatementId,
}

/// Contextual information for a statement: the registration it belongs to
/// and activities/agents it relates to beyond its object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<Agent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_activities: Option<ContextActivities>,
}

/// Activities related to a statement, grouped by relation kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextActivities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Vec<Activity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping: Option<Vec<Activity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<Activity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<Vec<Activity>>,
}

impl ContextActivities {
    /// Iterate over every related activity regardless of relation kind.
    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        [&self.parent, &self.grouping, &self.category, &self.other]
            .into_iter()
            .flatten()
            .flatten()
    }
}

/// An experience statement.
///
/// `stored` is assigned by the LRS when the statement is written and is the
/// value exposed through the `Last-Modified` header of single-statement
/// responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<StatementId>,
    pub actor: Agent,
    pub verb: Verb,
    pub object: StatementObject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl Statement {
    pub fn new(actor: Agent, verb: Verb, object: StatementObject) -> Self {
        Self {
            id: None,
            actor,
            verb,
            object,
            context: None,
            timestamp: None,
            stored: None,
            attachments: Vec::new(),
        }
    }

    /// Whether this statement voids another statement.
    pub fn is_voiding(&self) -> bool {
        self.verb.id.as_str() == VOIDING_VERB
            && matches!(self.object, StatementObject::StatementRef(_))
    }

    /// The statement referenced by this voiding statement, if any.
    pub fn voided_target(&self) -> Option<StatementId> {
        if self.verb.id.as_str() != VOIDING_VERB {
            return None;
        }
        match &self.object {
            StatementObject::StatementRef(r) => Some(r.id),
            _ => None,
        }
    }

    /// Value equality as required by the idempotent PUT contract.
    ///
    /// `stored` is LRS-assigned and excluded; attachments are compared on
    /// metadata because an incoming statement carries no attachment bytes.
    pub fn equals(&self, other: &Statement) -> bool {
        self.id == other.id
            && self.actor == other.actor
            && self.verb == other.verb
            && self.object == other.object
            && self.context == other.context
            && self.timestamp == other.timestamp
            && self.attachments.len() == other.attachments.len()
            && self
                .attachments
                .iter()
                .zip(&other.attachments)
                .all(|(a, b)| a.same_metadata(b))
    }
}

/// An ordered collection of statements plus an optional continuation token,
/// serialized as the xAPI StatementResult document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementResult {
    pub statements: Vec<Statement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more: Option<String>,
}

impl StatementResult {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self {
            statements,
            more: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}
