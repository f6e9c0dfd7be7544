//! Response shape selection and assembly for statement reads.

use axum::body::Body;
use axum::http::{header, HeaderValue, Response as HttpResponse, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::{SecondsFormat, Utc};

use crate::domain::{Attachment, Statement, StatementResult};
use crate::serializer;

use super::multipart::{JsonBody, MultipartBody};
use super::ApiError;

/// Response header carrying the instant a read was served.
pub const CONSISTENT_THROUGH_HEADER: &str = "X-Experience-API-Consistent-Through";

/// What a statement lookup produced. A missing id is absorbed into
/// `Collection(StatementResult::empty())` before assembly; it never reaches
/// this type as a distinct state.
#[derive(Debug)]
pub enum LookupOutcome {
    Single(Statement),
    Collection(StatementResult),
}

/// A fully assembled response body, one variant per wire shape.
#[derive(Debug)]
pub enum ResponseEnvelope {
    Json(JsonBody),
    Multipart(MultipartBody),
}

/// Build the response for a statement lookup.
///
/// Single statements get a `Last-Modified` header from their stored
/// timestamp; a multipart envelope is produced only when attachments were
/// requested and at least one is present.
pub fn assemble(
    outcome: LookupOutcome,
    include_attachments: bool,
) -> Result<ResponseEnvelope, ApiError> {
    match outcome {
        LookupOutcome::Single(statement) => {
            let body = serializer::serialize_statement(&statement)
                .map_err(|e| ApiError::Internal(e.to_string()))?;

            let mut json = JsonBody::new(body);
            if let Some(stored) = statement.stored {
                json = json.with_header(
                    "Last-Modified",
                    stored.to_rfc3339_opts(SecondsFormat::Secs, false),
                );
            }

            if include_attachments && !statement.attachments.is_empty() {
                Ok(ResponseEnvelope::Multipart(MultipartBody::new(
                    json,
                    statement.attachments,
                )))
            } else {
                Ok(ResponseEnvelope::Json(json))
            }
        }
        LookupOutcome::Collection(result) => {
            let body = serializer::serialize_statement_result(&result)
                .map_err(|e| ApiError::Internal(e.to_string()))?;
            let json = JsonBody::new(body);

            if include_attachments {
                let attachments: Vec<Attachment> = result
                    .statements
                    .into_iter()
                    .flat_map(|s| s.attachments)
                    .collect();
                if !attachments.is_empty() {
                    return Ok(ResponseEnvelope::Multipart(MultipartBody::new(
                        json,
                        attachments,
                    )));
                }
            }

            Ok(ResponseEnvelope::Json(json))
        }
    }
}

/// Stamp a response with the consistent-through instant, computed fresh at
/// call time. Applied on every statement GET path, the empty result
/// included.
pub fn stamp_consistent_through(response: &mut Response) {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false);
    if let Ok(value) = HeaderValue::from_str(&now) {
        response
            .headers_mut()
            .insert(CONSISTENT_THROUGH_HEADER, value);
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        match self {
            ResponseEnvelope::Json(json) => {
                let mut builder = HttpResponse::builder()
                    .status(StatusCode::OK)
                    .header(header::CONTENT_TYPE, "application/json");
                for (name, value) in &json.headers {
                    builder = builder.header(*name, value.as_str());
                }
                builder
                    .body(Body::from(json.body))
                    .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
            }
            ResponseEnvelope::Multipart(multipart) => HttpResponse::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, multipart.content_type())
                .body(multipart.into_body())
                .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()),
        }
    }
}
