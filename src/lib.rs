//! # Todo Service
//!
//! A small HTTP CRUD service for todo items, held in memory, behind an Axum
//! middleware pipeline:
//!
//! - **Logging**: "Started" / "Finished" lines around every request
//! - **Access Control**: DELETE is rejected with 403 before routing
//! - **Validation**: creations with a past due date or already completed
//!   are rejected with a 422 problem document
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Axum HTTP Server                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Middleware (Request ID → Logging → Access → Redirect)      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Handlers (todos, health) + ValidTodo extractor             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TaskStore (Arc<RwLock<Vec<Todo>>>)                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use todo_service::{AppState, Config, build_router};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let addr = config.server_addr();
//!     let app = build_router(AppState::new(config));
//!
//!     let listener = tokio::net::TcpListener::bind(addr).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Allowing deletes
//!
//! ```bash
//! DENY_DELETE=false cargo run
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;
pub mod validation;

// Re-exports for convenience
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::Todo;
pub use routes::build_router;
pub use state::AppState;
pub use store::{StoreError, TaskStore};
