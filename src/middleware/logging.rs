//! Request logging middleware.
//!
//! Wraps all downstream processing with a pair of trace lines:
//!
//! ```text
//! Started GET /todos/1 at 2030-01-15T10:30:00.123Z
//! Finished GET /todos/1 at 2030-01-15T10:30:00.125Z
//! ```
//!
//! The finished line is emitted for every outcome, including requests
//! rejected by access control or validation further down the stack.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::{SecondsFormat, Utc};
use tracing::info;

use super::request_id::RequestIdExt;
use crate::metrics;

/// Middleware that logs the start and end of every request.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request.request_id().unwrap_or_default();
    let started = Instant::now();

    info!(
        request_id = %request_id,
        "Started {} {} at {}",
        method,
        path,
        utc_timestamp()
    );

    let response = next.run(request).await;

    let elapsed = started.elapsed();
    let status = response.status();
    info!(
        request_id = %request_id,
        status = status.as_u16(),
        latency_ms = elapsed.as_millis() as u64,
        "Finished {} {} at {}",
        method,
        path,
        utc_timestamp()
    );
    metrics::record_request(
        method.as_str(),
        status.as_str(),
        elapsed.as_secs_f64(),
    );

    response
}

fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
