use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::ProjectInputError;

/// Application error type that can be returned from handlers
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Resource errors
    #[error("{0} not found")]
    NotFound(&'static str),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Malformed ids, and store failures on operations that report them as 400
    #[error("{message}: {cause}")]
    BadRequest { message: String, cause: String },

    // Store failures reported as 500
    #[error("{message}: {cause}")]
    Internal { message: String, cause: String },
}

/// Failure talking to the document store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),

    #[error("Malformed document: {0}")]
    Malformed(String),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            // 404 Not Found
            AppError::NotFound(resource) => {
                (StatusCode::NOT_FOUND, format!("{} not found", resource), None)
            }

            // 400 Bad Request
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message, None),
            AppError::BadRequest { message, cause } => {
                tracing::warn!("{}: {}", message, cause);
                (StatusCode::BAD_REQUEST, message, Some(cause))
            }

            // 500 Internal Server Error
            AppError::Internal { message, cause } => {
                tracing::error!("{}: {}", message, cause);
                (StatusCode::INTERNAL_SERVER_ERROR, message, Some(cause))
            }
        };

        (status, Json(ErrorResponse { message, error })).into_response()
    }
}

impl From<ProjectInputError> for AppError {
    fn from(err: ProjectInputError) -> Self {
        match err {
            ProjectInputError::MissingRequired => AppError::Validation(err.to_string()),
            _ => AppError::BadRequest {
                message: "Invalid project fields".to_string(),
                cause: err.to_string(),
            },
        }
    }
}

/// Attach an operation message and status class to a lower-level failure
pub trait ResultExt<T> {
    fn bad_request(self, message: &str) -> AppResult<T>;
    fn internal(self, message: &str) -> AppResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn bad_request(self, message: &str) -> AppResult<T> {
        self.map_err(|e| AppError::BadRequest {
            message: message.to_string(),
            cause: e.to_string(),
        })
    }

    fn internal(self, message: &str) -> AppResult<T> {
        self.map_err(|e| AppError::Internal {
            message: message.to_string(),
            cause: e.to_string(),
        })
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for repositories
pub type StoreResult<T> = Result<T, StoreError>;
