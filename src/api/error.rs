//! API error taxonomy and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::infra::LrsError;

/// Errors a request can terminate with.
///
/// Every variant carries a human-readable message naming the offending
/// parameter or mismatch; responses serialize it as
/// `{"error": {"code", "message"}}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing/malformed parameter, illegal parameter combination or
    /// undeserializable body.
    #[error("{0}")]
    BadRequest(String),

    /// PUT against an existing, different statement or mismatched ids.
    #[error("{0}")]
    Conflict(String),

    /// Unknown resource. Only surfaced by the activities endpoint; the
    /// statement GET paths absorb missing ids into an empty result instead.
    #[error("{0}")]
    NotFound(String),

    /// Repository or serializer failure unrelated to caller input.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<LrsError> for ApiError {
    fn from(error: LrsError) -> Self {
        ApiError::Internal(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(self, ApiError::Internal(_)) {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        }));

        (self.status(), body).into_response()
    }
}
