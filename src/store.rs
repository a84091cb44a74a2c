//! In-memory task store.
//!
//! The store exclusively owns the todo collection for the lifetime of the
//! process. Nothing is persisted; all state is lost on shutdown.
//!
//! # Thread Safety
//!
//! The collection sits behind an `Arc<RwLock<_>>` so the store can be cloned
//! into every request handler while concurrent creations and deletions stay
//! serialized. Reads hand out snapshots, never the live collection.
//!
//! # Identifiers
//!
//! Identifiers are caller-supplied and duplicates are accepted on insert.
//! Single-item lookup expects at most one match and reports
//! [`StoreError::AmbiguousId`] otherwise.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::models::Todo;

/// Errors raised by store lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("expected at most one todo with id {id}, found {count}")]
    AmbiguousId { id: i64, count: usize },
}

/// In-memory collection of todos in insertion order.
#[derive(Clone, Default)]
pub struct TaskStore {
    todos: Arc<RwLock<Vec<Todo>>>,
}

impl TaskStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a todo and return it. No duplicate check is performed.
    pub async fn add_todo(&self, todo: Todo) -> Todo {
        let mut todos = self.todos.write().await;
        todos.push(todo.clone());
        debug!(id = todo.id, total = todos.len(), "Todo added");
        todo
    }

    /// Snapshot of every todo in insertion order.
    pub async fn get_todos(&self) -> Vec<Todo> {
        self.todos.read().await.clone()
    }

    /// Look up the single todo with `id`.
    ///
    /// Returns `Ok(None)` when nothing matches and
    /// `Err(StoreError::AmbiguousId)` when more than one entry does.
    pub async fn get_todo_by_id(&self, id: i64) -> Result<Option<Todo>, StoreError> {
        let todos = self.todos.read().await;
        let mut matches = todos.iter().filter(|t| t.id == id);

        let first = matches.next().cloned();
        let extra = matches.count();
        if extra > 0 {
            return Err(StoreError::AmbiguousId {
                id,
                count: extra + 1,
            });
        }

        trace!(id, found = first.is_some(), "Todo lookup");
        Ok(first)
    }

    /// Remove every todo with `id`, returning how many were removed.
    pub async fn delete_todo_by_id(&self, id: i64) -> usize {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|t| t.id != id);
        let removed = before - todos.len();
        debug!(id, removed, "Todos deleted");
        removed
    }

    /// Number of todos currently held.
    pub async fn len(&self) -> usize {
        self.todos.read().await.len()
    }

    /// Whether the store holds no todos.
    pub async fn is_empty(&self) -> bool {
        self.todos.read().await.is_empty()
    }
}
