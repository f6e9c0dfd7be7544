//! xAPI JSON (de)serialization boundary.
//!
//! Handlers never call serde_json directly; everything crossing the wire
//! goes through these functions so the mapping between domain values and
//! xAPI documents stays in one place.

use crate::domain::{Activity, Agent, Statement, StatementResult};

/// Serialize a statement to its xAPI JSON document.
pub fn serialize_statement(statement: &Statement) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(statement)
}

/// Serialize a statement collection to an xAPI StatementResult document.
pub fn serialize_statement_result(
    result: &StatementResult,
) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(result)
}

/// Serialize an activity to its xAPI JSON document.
pub fn serialize_activity(activity: &Activity) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(activity)
}

/// Deserialize a statement from a request body.
pub fn deserialize_statement(body: &[u8]) -> Result<Statement, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Deserialize an agent from the JSON-encoded `agent` query parameter.
pub fn deserialize_actor(value: &str) -> Result<Agent, serde_json::Error> {
    serde_json::from_str(value)
}
