//! Legacy path redirect.
//!
//! `/tasks/<rest>` is a permanent alias of `/todos/<rest>`. Matching
//! requests are answered with `301 Moved Permanently` before routing; the
//! query string is carried over unchanged.

use axum::extract::Request;
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

/// Legacy path prefix that is redirected.
pub const LEGACY_PREFIX: &str = "/tasks/";

/// Canonical path prefix redirected to.
pub const CANONICAL_PREFIX: &str = "/todos/";

/// Compute the redirect target for a legacy path, if it is one.
pub fn legacy_redirect_target(path: &str, query: Option<&str>) -> Option<String> {
    let rest = path.strip_prefix(LEGACY_PREFIX)?;
    let target = match query {
        Some(q) => format!("{CANONICAL_PREFIX}{rest}?{q}"),
        None => format!("{CANONICAL_PREFIX}{rest}"),
    };
    Some(target)
}

/// Middleware redirecting `/tasks/<rest>` to `/todos/<rest>`.
pub async fn redirect_legacy_paths(request: Request, next: Next) -> Response {
    if let Some(target) = legacy_redirect_target(request.uri().path(), request.uri().query()) {
        debug!(from = %request.uri(), to = %target, "Redirecting legacy path");
        return (StatusCode::MOVED_PERMANENTLY, [(LOCATION, target)]).into_response();
    }

    next.run(request).await
}
