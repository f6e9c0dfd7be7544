//! Activity resource handler.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::api::ApiError;
use crate::domain::Iri;
use crate::serializer;
use crate::server::AppState;

/// GET /activities?activityId=<iri>
///
/// Unlike statement reads, a missing activity is a real 404.
pub async fn get_activity(
    State(state): State<AppState>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let raw_id = raw
        .get("activityId")
        .ok_or_else(|| ApiError::BadRequest("Required activityId parameter is missing.".to_string()))?;

    let id = Iri::parse(raw_id).map_err(|_| {
        ApiError::BadRequest(format!("Parameter activityId (\"{raw_id}\") is not a valid IRI."))
    })?;

    let activity = state
        .activities
        .find_activity_by_id(&id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "No activity matching the following id \"{raw_id}\" has been found."
            ))
        })?;

    let body = serializer::serialize_activity(&activity)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::domain::Activity;
    use crate::infra::{MockActivityRepository, MockStatementRepository};

    use super::*;

    fn state_with(activities: MockActivityRepository) -> AppState {
        AppState {
            statements: Arc::new(MockStatementRepository::new()),
            activities: Arc::new(activities),
        }
    }

    fn query(pairs: &[(&str, &str)]) -> Query<HashMap<String, String>> {
        Query(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[tokio::test]
    async fn missing_activity_id_is_bad_request() {
        let result = get_activity(
            State(state_with(MockActivityRepository::new())),
            query(&[]),
        )
        .await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn malformed_iri_is_bad_request() {
        let result = get_activity(
            State(state_with(MockActivityRepository::new())),
            query(&[("activityId", "course/1")]),
        )
        .await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn unknown_activity_is_not_found() {
        let mut repo = MockActivityRepository::new();
        repo.expect_find_activity_by_id().returning(|_| Ok(None));

        let result = get_activity(
            State(state_with(repo)),
            query(&[("activityId", "http://example.com/course/1")]),
        )
        .await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn known_activity_is_served_as_json() {
        let mut repo = MockActivityRepository::new();
        repo.expect_find_activity_by_id()
            .returning(|id| Ok(Some(Activity::new(id.clone()))));

        let response = get_activity(
            State(state_with(repo)),
            query(&[("activityId", "http://example.com/course/1")]),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
