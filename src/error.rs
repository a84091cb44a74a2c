use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::models::{VALIDATION_PROBLEM_TITLE, VALIDATION_PROBLEM_TYPE, ValidationProblem};
use crate::store::StoreError;
use crate::validation::ValidationErrors;

/// Application-wide error types with appropriate HTTP status codes.
///
/// Every variant is terminal for the request; nothing is retried.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Todo not found: {0}")]
    NotFound(i64),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Multiple todos share id {0}")]
    AmbiguousId(i64),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Error response body for API endpoints.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AmbiguousId { id, .. } => AppError::AmbiguousId(id),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(sanitize_json_error(&rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Internal(_) | AppError::ConfigError(_) => {
                tracing::error!(error = %self, "Request failed");
            }
            _ => tracing::warn!(error = %self, "Request rejected"),
        }

        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
            AppError::Validation(errors) => {
                let status = StatusCode::UNPROCESSABLE_ENTITY;
                let body = ValidationProblem {
                    problem_type: VALIDATION_PROBLEM_TYPE.to_string(),
                    title: VALIDATION_PROBLEM_TITLE.to_string(),
                    status: status.as_u16(),
                    errors: errors.into_inner(),
                };
                (
                    status,
                    [(CONTENT_TYPE, "application/problem+json")],
                    axum::Json(body),
                )
                    .into_response()
            }
            AppError::Forbidden(message) => (
                StatusCode::FORBIDDEN,
                [(CONTENT_TYPE, "text/plain; charset=utf-8")],
                message,
            )
                .into_response(),
            AppError::AmbiguousId(id) => json_error(
                StatusCode::CONFLICT,
                "ambiguous_id",
                format!("More than one todo has id {id}"),
            ),
            AppError::BadRequest(message) => {
                json_error(StatusCode::BAD_REQUEST, "bad_request", message)
            }
            // Never expose internal details to clients
            AppError::Internal(_) => json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred.".to_string(),
            ),
            AppError::ConfigError(_) => json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "config_error",
                "Service configuration error.".to_string(),
            ),
        }
    }
}

fn json_error(status: StatusCode, error: &str, message: String) -> Response {
    (
        status,
        axum::Json(ErrorResponse {
            error: error.to_string(),
            message,
        }),
    )
        .into_response()
}

/// Sanitize JSON body errors to avoid leaking internal type information.
///
/// Serde messages can contain internal struct names which shouldn't be
/// exposed to external clients. This keeps the useful parts only.
fn sanitize_json_error(msg: &str) -> String {
    if msg.contains("missing field")
        && let Some(start) = msg.find('`')
        && let Some(end) = msg[start + 1..].find('`')
    {
        let field = &msg[start + 1..start + 1 + end];
        return format!("Missing required field: {field}");
    }

    if msg.contains("Content-Type") {
        return "Expected request with `Content-Type: application/json`".to_string();
    }

    if msg.contains("invalid type") || msg.contains("premature end of input") {
        return "Invalid data type in request body".to_string();
    }

    if msg.contains("EOF while parsing") || msg.contains("expected") {
        return "Malformed JSON in request body".to_string();
    }

    "Invalid request format".to_string()
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
