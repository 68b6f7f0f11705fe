//! Application error type mapping to HTTP status codes and envelope format.
//!
//! ```json
//! { "success": false, "error": "Domain is required", "message": "..." }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use skillforge_types::error::{GenerationError, RepositoryError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or missing request input.
    Validation(String),
    /// The addressed resource does not exist.
    NotFound(String),
    /// The caller abandoned the request.
    Cancelled,
    /// Failure in a collaborator, with a short summary and the detail.
    Internal { error: String, message: String },
}

impl From<GenerationError> for AppError {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::EmptyDomain => AppError::Validation("Domain is required".to_string()),
            GenerationError::Cancelled => AppError::Cancelled,
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => AppError::NotFound("Not found".to_string()),
            other => AppError::Internal {
                error: "Storage error".to_string(),
                message: other.to_string(),
            },
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            // 499 Client Closed Request (nginx convention).
            AppError::Cancelled => {
                StatusCode::from_u16(499).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation(error) | AppError::NotFound(error) => json!({
                "success": false,
                "error": error,
            }),
            AppError::Cancelled => json!({
                "success": false,
                "error": "Request cancelled",
            }),
            AppError::Internal { error, message } => {
                tracing::error!(%error, %message, "Request failed");
                json!({
                    "success": false,
                    "error": error,
                    "message": message,
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
