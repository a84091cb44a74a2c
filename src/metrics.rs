//! Prometheus metrics for the todo service.
//!
//! Metrics are exported on a dedicated listener when `METRICS_PORT` is set.
//! Without an installed recorder every recording call is a no-op, so the
//! functions below are safe to call unconditionally.
//!
//! # Available Metrics
//!
//! ## Counters
//! - `todo_http_requests_total` - Requests served (labels: method, status)
//! - `todo_todos_created_total` - Todos accepted by `POST /todos`
//! - `todo_todos_deleted_total` - Todos removed by `DELETE /todos/{id}`
//! - `todo_validation_failures_total` - Creations rejected by validation
//! - `todo_access_denied_total` - Requests rejected by access control (label: method)
//!
//! ## Histograms
//! - `todo_http_request_duration_seconds` - Request duration (labels: method, status)
//!
//! ## Gauges
//! - `todo_store_size` - Todos currently held in memory

use std::net::SocketAddr;

use anyhow::Context;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{error, info};

/// Metric names as constants for consistency.
pub mod names {
    pub const HTTP_REQUESTS_TOTAL: &str = "todo_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "todo_http_request_duration_seconds";
    pub const TODOS_CREATED_TOTAL: &str = "todo_todos_created_total";
    pub const TODOS_DELETED_TOTAL: &str = "todo_todos_deleted_total";
    pub const VALIDATION_FAILURES_TOTAL: &str = "todo_validation_failures_total";
    pub const ACCESS_DENIED_TOTAL: &str = "todo_access_denied_total";
    pub const STORE_SIZE: &str = "todo_store_size";
}

/// Install the Prometheus exporter and describe all metrics.
///
/// # Errors
///
/// Fails if the exporter cannot bind `metrics_addr` or a global recorder
/// is already installed.
pub fn init_metrics(metrics_addr: SocketAddr) -> anyhow::Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(metrics_addr)
        .install()
        .with_context(|| format!("Failed to install Prometheus exporter on {metrics_addr}"))?;

    describe_counter!(names::HTTP_REQUESTS_TOTAL, "Total number of HTTP requests served");
    describe_counter!(names::TODOS_CREATED_TOTAL, "Total number of todos created");
    describe_counter!(names::TODOS_DELETED_TOTAL, "Total number of todos deleted");
    describe_counter!(
        names::VALIDATION_FAILURES_TOTAL,
        "Total number of todo creations rejected by validation"
    );
    describe_counter!(
        names::ACCESS_DENIED_TOTAL,
        "Total number of requests rejected by access control"
    );
    describe_histogram!(
        names::HTTP_REQUEST_DURATION_SECONDS,
        "HTTP request duration in seconds"
    );
    describe_gauge!(names::STORE_SIZE, "Number of todos held in memory");

    info!(addr = %metrics_addr, "Prometheus metrics endpoint started");
    Ok(())
}

/// Try to initialize metrics, logging any errors but not failing.
pub fn try_init_metrics(metrics_addr: SocketAddr) {
    if let Err(e) = init_metrics(metrics_addr) {
        error!(error = %e, "Failed to initialize metrics, continuing without metrics");
    }
}

/// Record a served request and its duration.
pub fn record_request(method: &str, status: &str, duration_secs: f64) {
    counter!(names::HTTP_REQUESTS_TOTAL, "method" => method.to_string(), "status" => status.to_string())
        .increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, "method" => method.to_string(), "status" => status.to_string())
        .record(duration_secs);
}

pub fn record_todo_created() {
    counter!(names::TODOS_CREATED_TOTAL).increment(1);
}

pub fn record_todos_deleted(count: u64) {
    counter!(names::TODOS_DELETED_TOTAL).increment(count);
}

pub fn record_validation_failure() {
    counter!(names::VALIDATION_FAILURES_TOTAL).increment(1);
}

pub fn record_access_denied(method: &str) {
    counter!(names::ACCESS_DENIED_TOTAL, "method" => method.to_string()).increment(1);
}

/// Update the store size gauge.
pub fn set_store_size(size: usize) {
    gauge!(names::STORE_SIZE).set(size as f64);
}
