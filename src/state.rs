//! Shared application state for Axum handlers.
//!
//! The state is cloned into every handler. It carries the task store and the
//! runtime configuration; both are cheap to clone (`Arc` inside).

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::store::TaskStore;

/// Shared application state for Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// In-memory todo collection
    pub store: TaskStore,
    /// Timestamp when the application started
    pub started_at: Instant,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create state with an empty store.
    pub fn new(config: Config) -> Self {
        Self::with_store(TaskStore::new(), config)
    }

    /// Create state around an existing store.
    pub fn with_store(store: TaskStore, config: Config) -> Self {
        Self {
            store,
            started_at: Instant::now(),
            config: Arc::new(config),
        }
    }

    /// Get the application uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
