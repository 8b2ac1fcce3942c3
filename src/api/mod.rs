//! HTTP API: router construction and server startup.

mod chat;
pub mod types;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::agent::Agent;
use crate::config::Config;

use types::HealthResponse;

/// Shared per-process state. The agent (and the registry inside it) is
/// read-only after construction, so concurrent requests need no locking.
pub struct AppState {
    pub agent: Agent,
}

/// Build the router for the given state.
pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/chat", post(chat::chat))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Construct the agent and serve the API. Fails fast before binding if
/// the tool registry cannot be built.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);

    let agent = Agent::new(config)?;
    let state = Arc::new(AppState { agent });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, routes(state)).await?;

    Ok(())
}

/// `GET /health`
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
