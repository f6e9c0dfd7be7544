//! HTTP server bootstrap.
//!
//! Wires configuration, the storage backend and the Axum router together.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::routing::get;
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::handlers::{get_about, get_activity, get_statements, put_statement};
use crate::api::XAPI_VERSION;
use crate::infra::{ActivityRepository, MemoryLrs, StatementRepository};

/// Server configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address (`LRS_BIND_ADDR`, default `0.0.0.0:8080`).
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = std::env::var("LRS_BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()?;
        Ok(Self { bind_addr })
    }
}

/// Shared handler state: the repositories behind the HTTP surface.
#[derive(Clone)]
pub struct AppState {
    pub statements: Arc<dyn StatementRepository>,
    pub activities: Arc<dyn ActivityRepository>,
}

/// Build the LRS router. Every response carries the xAPI version header.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/about", get(get_about))
        .route("/statements", get(get_statements).put(put_statement))
        .route("/activities", get(get_activity))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-experience-api-version"),
            HeaderValue::from_static(XAPI_VERSION),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server with the in-memory storage backend.
pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting LRS");

    let store = Arc::new(MemoryLrs::new());
    let state = AppState {
        statements: store.clone(),
        activities: store,
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, xapi = XAPI_VERSION, "listening");
    axum::serve(listener, router(state)).await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
