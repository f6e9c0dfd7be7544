//! Common fixtures for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use xapi_lrs::domain::{
    Activity, Agent, Attachment, Iri, Statement, StatementId, StatementObject, Verb,
};
use xapi_lrs::infra::MemoryLrs;
use xapi_lrs::server::{router, AppState};

pub const ATTENDED: &str = "http://adlnet.gov/expapi/verbs/attended";
pub const COURSE: &str = "http://example.com/course/1";

/// Router backed by a fresh in-memory store, plus the store itself for
/// seeding and inspection.
pub fn test_app() -> (Router, Arc<MemoryLrs>) {
    let store = Arc::new(MemoryLrs::new());
    let state = AppState {
        statements: store.clone(),
        activities: store.clone(),
    };
    (router(state), store)
}

pub fn iri(value: &str) -> Iri {
    Iri::parse(value).unwrap()
}

pub fn sample_statement() -> Statement {
    Statement::new(
        Agent::with_mbox("mailto:alice@example.com"),
        Verb::new(iri(ATTENDED)),
        StatementObject::Activity(Activity::new(iri(COURSE))),
    )
}

pub fn statement_with_id(id: StatementId) -> Statement {
    let mut statement = sample_statement();
    statement.id = Some(id);
    statement
}

pub fn random_statement_id() -> StatementId {
    StatementId::from_uuid(Uuid::new_v4())
}

pub fn text_attachment(content: &str) -> Attachment {
    Attachment::from_content(
        iri("http://adlnet.gov/expapi/attachments/signature"),
        "text/plain",
        content.as_bytes().to_vec(),
    )
}

pub async fn get(router: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    router.clone().oneshot(request).await.unwrap()
}

pub async fn put_json(router: &Router, uri: &str, body: Vec<u8>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    router.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
