//! About resource handler.

use axum::Json;
use serde_json::{json, Value};

use crate::api::XAPI_VERSION;

/// GET /about
///
/// Advertises the xAPI versions this LRS speaks.
pub async fn get_about() -> Json<Value> {
    Json(json!({ "version": [XAPI_VERSION] }))
}
