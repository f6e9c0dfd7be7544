//! Statement resource handlers: filtered/by-id GET and idempotent PUT.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::api::query::{self, StatementQuery};
use crate::api::response::{assemble, stamp_consistent_through, LookupOutcome};
use crate::api::ApiError;
use crate::domain::{StatementId, StatementResult};
use crate::serializer;
use crate::server::AppState;

/// GET /statements
///
/// Unrecognized query parameters are dropped, the remaining combination is
/// validated, and the request resolves to a by-id lookup or a filtered
/// collection lookup. A by-id miss yields a 200 with an empty
/// StatementResult, never a 404.
pub async fn get_statements(
    State(state): State<AppState>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let query = StatementQuery::from_raw(raw);
    query::validate(&query)?;

    let outcome = if let Some(raw_id) = query.get("statementId") {
        let id = parse_statement_id("statementId", raw_id)?;
        match state.statements.find_statement_by_id(id).await? {
            Some(statement) => LookupOutcome::Single(statement),
            None => LookupOutcome::Collection(StatementResult::empty()),
        }
    } else if let Some(raw_id) = query.get("voidedStatementId") {
        let id = parse_statement_id("voidedStatementId", raw_id)?;
        match state.statements.find_voided_statement_by_id(id).await? {
            Some(statement) => LookupOutcome::Single(statement),
            None => LookupOutcome::Collection(StatementResult::empty()),
        }
    } else {
        let filter = query::build_filter(&query)?;
        debug!(?filter, "statement collection lookup");
        let statements = state.statements.find_statements_by(&filter).await?;
        LookupOutcome::Collection(StatementResult::new(statements))
    };

    let envelope = assemble(outcome, query.boolean("attachments"))?;
    let mut response = envelope.into_response();
    stamp_consistent_through(&mut response);
    Ok(response)
}

/// PUT /statements?statementId=<uuid>
///
/// Idempotent upsert: storing the same statement twice succeeds without a
/// second write; a different statement under an existing id conflicts.
pub async fn put_statement(
    State(state): State<AppState>,
    Query(raw): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let raw_id = raw
        .get("statementId")
        .ok_or_else(|| ApiError::BadRequest("Required statementId parameter is missing.".to_string()))?;
    let id = parse_statement_id("statementId", raw_id)?;

    let mut statement = serializer::deserialize_statement(&body)
        .map_err(|e| ApiError::BadRequest(format!("The statement could not be deserialized: {e}.")))?;

    match statement.id {
        Some(body_id) if body_id != id => {
            return Err(ApiError::Conflict(format!(
                "Id parameter (\"{id}\") and statement id (\"{body_id}\") do not match."
            )));
        }
        Some(_) => {}
        None => statement.id = Some(id),
    }

    match state.statements.find_statement_by_id(id).await? {
        Some(existing) => {
            if !existing.equals(&statement) {
                return Err(ApiError::Conflict(
                    "The new statement is not equal to an existing statement with the same id."
                        .to_string(),
                ));
            }
            // Idempotent replay, nothing to store.
        }
        None => {
            state.statements.store_statement(statement, true).await?;
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

fn parse_statement_id(parameter: &str, value: &str) -> Result<StatementId, ApiError> {
    StatementId::from_string(value).map_err(|_| {
        ApiError::BadRequest(format!(
            "Parameter {parameter} (\"{value}\") is not a valid UUID."
        ))
    })
}
