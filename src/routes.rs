//! Application routing configuration with middleware stack.
//!
//! # Middleware Stack (outermost first)
//!
//! ```text
//! Request
//!    │
//!    ▼
//! ┌──────────────────┐
//! │   Request ID     │ ← X-Request-Id on request and response
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │     Logging      │ ← "Started ..." / "Finished ..."
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │  Access Control  │ ← 403 for DELETE (unless DENY_DELETE=false)
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │ Legacy Redirect  │ ← 301 /tasks/<x> → /todos/<x>
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │ CORS, Body Limit │
//! └────────┬─────────┘
//!          ▼
//!       Router → Handler (POST /todos validates before the handler body)
//! ```
//!
//! # Routes
//!
//! - `/todos`, `/todos/{id}` - Todo CRUD
//! - `/health`, `/ready` - Health & readiness

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::handlers;
use crate::middleware::{DenyMethodLayer, assign_request_id, log_requests, redirect_legacy_paths};
use crate::state::AppState;

/// Build the application router with all routes and middleware configured.
///
/// Access control is included when `config.deny_delete` is set, which is
/// the default.
pub fn build_router(state: AppState) -> Router {
    let config = &state.config;

    let cors = build_cors_layer(&config.cors_allowed_origins);

    let mut router = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route(
            "/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todos/{id}",
            get(handlers::get_todo).delete(handlers::delete_todo),
        );

    // =========================================================================
    // Apply Middleware Stack (order matters - last layer runs first)
    // =========================================================================

    router = router
        .layer(DefaultBodyLimit::max(config.max_request_body_size))
        .layer(cors)
        .layer(from_fn(redirect_legacy_paths));

    if config.deny_delete {
        info!("Access control enabled: DELETE requests are rejected");
        router = router.layer(DenyMethodLayer::deny_delete());
    } else {
        info!("Access control disabled (DENY_DELETE=false)");
    }

    router
        .layer(from_fn(log_requests))
        .layer(from_fn(assign_request_id))
        .with_state(state)
}

/// Build CORS layer from configuration.
///
/// `*` allows any origin; otherwise only the parseable origins listed.
fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_any = allowed_origins.iter().any(|o| o == "*");

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allow_any {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}
