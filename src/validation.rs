//! Creation-time validation for todos.
//!
//! Validation runs only on `POST /todos`, after the JSON body is bound and
//! before the handler body executes. Every rule is evaluated so a single
//! response reports all failures at once.

use std::collections::BTreeMap;
use std::fmt;

use axum::Json;
use axum::extract::{FromRequest, Request};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::AppError;
use crate::metrics;
use crate::models::Todo;

// =============================================================================
// Field keys and messages
// =============================================================================

/// Error key for the due date field.
pub const DUE_DATE_FIELD: &str = "dueDate";

/// Error key for the completion flag.
pub const IS_COMPLETED_FIELD: &str = "isCompleted";

/// Message raised when the due date is already behind us.
pub const DUE_DATE_IN_PAST: &str = "Due date cannot be in the past.";

/// Message raised when a todo arrives already completed.
pub const ALREADY_COMPLETED: &str = "Cannot add completed todo.";

/// Field name to messages, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// Record `message` against `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Whether no field has failed validation.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded against `field`, if any.
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Names of every field with at least one error.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Consume the collection, returning messages keyed by field name.
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}

/// Validate a todo about to be created.
///
/// Rules:
/// - The due date must not be earlier than `now`
/// - The todo must not already be completed
pub fn validate_new_todo(todo: &Todo, now: DateTime<Utc>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if todo.due_date < now {
        errors.add(DUE_DATE_FIELD, DUE_DATE_IN_PAST);
    }

    if todo.is_completed {
        errors.add(IS_COMPLETED_FIELD, ALREADY_COMPLETED);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// JSON body extractor that only yields todos passing [`validate_new_todo`].
///
/// Malformed bodies are rejected with 400, invalid todos with 422; in both
/// cases the handler never runs.
#[derive(Debug)]
pub struct ValidTodo(pub Todo);

impl<S> FromRequest<S> for ValidTodo
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(todo) = Json::<Todo>::from_request(req, state).await?;

        if let Err(errors) = validate_new_todo(&todo, Utc::now()) {
            debug!(id = todo.id, %errors, "Todo failed validation");
            metrics::record_validation_failure();
            return Err(AppError::Validation(errors));
        }

        Ok(ValidTodo(todo))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn todo_due(offset: Duration) -> Todo {
        Todo::new(1, "A", Utc::now() + offset)
    }

    #[test]
    fn test_valid_todo() {
        let now = Utc::now();
        let todo = Todo::new(1, "A", now + Duration::days(1));
        assert!(validate_new_todo(&todo, now).is_ok());
    }

    #[test]
    fn test_due_now_is_valid() {
        let now = Utc::now();
        let todo = Todo::new(1, "A", now);
        assert!(validate_new_todo(&todo, now).is_ok());
    }

    #[test]
    fn test_due_date_in_past() {
        let todo = todo_due(-Duration::days(1));
        let errors = validate_new_todo(&todo, Utc::now()).unwrap_err();

        assert_eq!(
            errors.field(DUE_DATE_FIELD),
            Some(&[DUE_DATE_IN_PAST.to_string()][..])
        );
        assert!(errors.field(IS_COMPLETED_FIELD).is_none());
    }

    #[test]
    fn test_already_completed() {
        let todo = todo_due(Duration::days(1)).completed();
        let errors = validate_new_todo(&todo, Utc::now()).unwrap_err();

        assert_eq!(
            errors.field(IS_COMPLETED_FIELD),
            Some(&[ALREADY_COMPLETED.to_string()][..])
        );
        assert!(errors.field(DUE_DATE_FIELD).is_none());
    }

    #[test]
    fn test_both_rules_reported_together() {
        let todo = todo_due(-Duration::hours(2)).completed();
        let errors = validate_new_todo(&todo, Utc::now()).unwrap_err();

        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec![DUE_DATE_FIELD, IS_COMPLETED_FIELD]);
    }

    #[test]
    fn test_errors_display() {
        let mut errors = ValidationErrors::default();
        errors.add("dueDate", "one");
        errors.add("dueDate", "two");
        errors.add("isCompleted", "three");

        assert_eq!(errors.to_string(), "dueDate: one, two; isCompleted: three");
    }
}
