//! Health and readiness endpoints.
//!
//! - `GET /health` - Liveness with version, uptime and todo count
//! - `GET /ready` - Readiness probe; the in-memory store needs no warm-up,
//!   so a running process is always ready

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;
use tracing::instrument;

use crate::models::HealthResponse;
use crate::state::AppState;

/// Health check endpoint.
///
/// # Response Body
///
/// ```json
/// {
///   "status": "healthy",
///   "todos_count": 3,
///   "uptime_seconds": 120,
///   "version": "0.1.0",
///   "timestamp": "2030-01-15T10:30:00Z"
/// }
/// ```
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        todos_count: state.store.len().await,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

/// Readiness check endpoint.
pub async fn readiness_check() -> StatusCode {
    StatusCode::OK
}
