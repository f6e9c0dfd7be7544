//! Statement query parameters: whitelisting, combination validation and
//! filter building.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::{Iri, SortOrder, StatementsFilter};
use crate::serializer;

use super::ApiError;

/// The query parameters a statement GET recognizes. Anything else in the
/// query string is dropped before validation, per xAPI 1.0.3.
pub const RECOGNIZED_PARAMETERS: [&str; 14] = [
    "statementId",
    "voidedStatementId",
    "agent",
    "verb",
    "activity",
    "registration",
    "related_activities",
    "related_agents",
    "since",
    "until",
    "limit",
    "format",
    "attachments",
    "ascending",
];

const ILLEGAL_COMBINATION: &str = "Request must not contain statementId or voidedStatementId parameters, and also any other parameter besides \"attachments\" or \"format\".";

/// The recognized parameters present on a statement GET request.
#[derive(Debug, Clone, Default)]
pub struct StatementQuery {
    params: BTreeMap<String, String>,
}

impl StatementQuery {
    /// Keep only recognized parameters from a raw query map.
    pub fn from_raw<I, K, V>(raw: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let params = raw
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| RECOGNIZED_PARAMETERS.contains(&k.as_str()))
            .collect();
        Self { params }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn has(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Number of present recognized parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Value of a boolean-typed parameter; absent means `false`.
    pub fn boolean(&self, key: &str) -> bool {
        self.get(key).map(parse_boolean).unwrap_or(false)
    }
}

/// Case-insensitive boolean parsing: `true`, `1`, `yes` and `on` are true,
/// everything else is false.
pub fn parse_boolean(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// Validate the parameter combination of a statement GET request.
///
/// When an id parameter is given, the only other parameters tolerated are
/// `attachments` and/or `format`; without an id parameter any combination of
/// the filter-style parameters is legal.
pub fn validate(query: &StatementQuery) -> Result<(), ApiError> {
    let has_statement_id = query.has("statementId");
    let has_voided_statement_id = query.has("voidedStatementId");

    if has_statement_id && has_voided_statement_id {
        return Err(ApiError::BadRequest(
            "Request must not have both statementId and voidedStatementId parameters at the same time.".to_string(),
        ));
    }

    let has_id = has_statement_id || has_voided_statement_id;
    if !has_id {
        return Ok(());
    }

    let has_attachments = query.has("attachments");
    let has_format = query.has("format");
    let count = query.len();

    // The id alone, plus one for attachments and/or format when present.
    // Anything beyond that is a third distinct parameter.
    let allowed = if has_attachments && has_format {
        3
    } else if has_attachments || has_format {
        2
    } else {
        1
    };

    if count > allowed {
        return Err(ApiError::BadRequest(ILLEGAL_COMBINATION.to_string()));
    }

    Ok(())
}

/// Build the lookup filter from a validated, id-less query.
pub fn build_filter(query: &StatementQuery) -> Result<StatementsFilter, ApiError> {
    let actor = query
        .get("agent")
        .map(|value| {
            serializer::deserialize_actor(value).map_err(|e| {
                ApiError::BadRequest(format!("Parameter agent (\"{value}\") is not a valid agent: {e}."))
            })
        })
        .transpose()?;

    let verb = query.get("verb").map(|v| parse_iri("verb", v)).transpose()?;
    let activity = query
        .get("activity")
        .map(|v| parse_iri("activity", v))
        .transpose()?;

    let registration = query.get("registration").map(str::to_string);

    let since = query
        .get("since")
        .map(|v| parse_timestamp("since", v))
        .transpose()?;
    let until = query
        .get("until")
        .map(|v| parse_timestamp("until", v))
        .transpose()?;

    let order = if query.boolean("ascending") {
        SortOrder::Ascending
    } else {
        SortOrder::Descending
    };

    let limit = query
        .get("limit")
        .map(|value| {
            value
                .parse::<i64>()
                .ok()
                .filter(|limit| *limit >= 0)
                .ok_or_else(|| {
                    ApiError::BadRequest(format!(
                        "Parameter limit (\"{value}\") is not a non-negative integer."
                    ))
                })
        })
        .transpose()?
        .unwrap_or(0) as u64;

    Ok(StatementsFilter {
        actor,
        verb,
        activity,
        registration,
        related_activities: query.boolean("related_activities"),
        related_agents: query.boolean("related_agents"),
        since,
        until,
        order,
        limit,
    })
}

fn parse_iri(key: &str, value: &str) -> Result<Iri, ApiError> {
    Iri::parse(value)
        .map_err(|_| ApiError::BadRequest(format!("Parameter {key} (\"{value}\") is not a valid IRI.")))
}

fn parse_timestamp(key: &str, value: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| {
            ApiError::BadRequest(format!(
                "Parameter {key} (\"{value}\") is not a valid ISO 8601 timestamp."
            ))
        })
}
