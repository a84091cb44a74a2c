//! Todo CRUD endpoints.
//!
//! # Endpoints
//!
//! - `GET /todos` - List every todo in insertion order
//! - `GET /todos/{id}` - Fetch a single todo (404 if absent)
//! - `POST /todos` - Create a todo (validated, 201)
//! - `DELETE /todos/{id}` - Delete all todos with the id (204)

use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::IntoResponse;
use tracing::{info, instrument};

use crate::error::{AppError, AppResult};
use crate::metrics;
use crate::models::Todo;
use crate::state::AppState;
use crate::validation::ValidTodo;

/// `Location` header returned on creation.
///
/// This is the route template itself; the new id is not substituted in.
pub const CREATED_LOCATION: &str = "/todos/{id}";

/// List all todos.
#[instrument(skip(state))]
pub async fn list_todos(State(state): State<AppState>) -> Json<Vec<Todo>> {
    Json(state.store.get_todos().await)
}

/// Get a specific todo by id.
#[instrument(skip(state))]
pub async fn get_todo(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Todo>> {
    let Path(id) = path?;

    state
        .store
        .get_todo_by_id(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(id))
}

/// Create a new todo.
///
/// The body has already passed validation by the time this runs.
#[instrument(skip_all)]
pub async fn create_todo(
    State(state): State<AppState>,
    ValidTodo(todo): ValidTodo,
) -> impl IntoResponse {
    let created = state.store.add_todo(todo).await;
    info!(id = created.id, name = %created.name, "Todo created");

    metrics::record_todo_created();
    metrics::set_store_size(state.store.len().await);

    (
        StatusCode::CREATED,
        [(LOCATION, CREATED_LOCATION)],
        Json(created),
    )
}

/// Delete every todo with the given id.
///
/// Responds 204 whether or not anything matched.
#[instrument(skip(state))]
pub async fn delete_todo(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;

    let removed = state.store.delete_todo_by_id(id).await;
    info!(id, removed, "Todo delete processed");

    metrics::record_todos_deleted(removed as u64);
    metrics::set_store_size(state.store.len().await);

    Ok(StatusCode::NO_CONTENT)
}
