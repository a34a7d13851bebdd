//! System endpoints: liveness banner and health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::app_state::AppState;

/// Body returned by the root liveness probe.
pub const LIVENESS_BODY: &str = "WebSocket server is running";

/// Health check response.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    connections: Option<usize>,
    version: &'static str,
}

/// `GET /` — Static liveness banner, independent of chat state.
pub async fn root_handler() -> impl IntoResponse {
    (StatusCode::OK, LIVENESS_BODY)
}

/// `GET /health` — Hub status and live connection count.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.hub.connection_count().await {
        Ok(count) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                connections: Some(count),
                version: env!("CARGO_PKG_VERSION"),
            }),
        ),
        Err(err) => {
            tracing::error!(error = %err, "health check could not reach hub");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable",
                    connections: None,
                    version: env!("CARGO_PKG_VERSION"),
                }),
            )
        }
    }
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
}
