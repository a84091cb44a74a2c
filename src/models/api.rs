use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Problem type reported for validation failures (422 Unprocessable Entity).
pub const VALIDATION_PROBLEM_TYPE: &str = "https://tools.ietf.org/html/rfc4918#section-11.2";

/// Title reported for validation failures.
pub const VALIDATION_PROBLEM_TITLE: &str = "One or more validation errors occurred.";

/// Structured validation failure body.
///
/// `errors` maps a JSON field name to every message raised against it.
#[derive(Debug, Serialize)]
pub struct ValidationProblem {
    /// Problem type URI
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short summary of the problem
    pub title: String,
    /// HTTP status code
    pub status: u16,
    /// Field name to messages
    pub errors: BTreeMap<String, Vec<String>>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service health status
    pub status: String,
    /// Number of todos currently held in memory
    pub todos_count: usize,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Service version
    pub version: String,
    /// Current timestamp
    pub timestamp: DateTime<Utc>,
}
