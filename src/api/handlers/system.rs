//! System endpoints: health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `"healthy"` or `"degraded"`.
    pub status: String,
    /// Service name.
    pub service: String,
    /// `"connected"` or `"unavailable"`.
    pub database: String,
    /// Current time, RFC 3339.
    pub timestamp: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Reports whether the store is reachable. Always answers 200; `status` is `degraded` when the database is down.",
    responses(
        (status = 200, description = "Service health", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let (status, database) = match state.store.ping().await {
        Ok(()) => ("healthy", "connected"),
        Err(err) => {
            tracing::warn!(error = %err, "health check: store unreachable");
            ("degraded", "unavailable")
        }
    };
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: status.to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            database: database.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }),
    )
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
