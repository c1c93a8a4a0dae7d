//! Unified error handling for the showroom.
//!
//! All route handlers return `Result<T, AppError>`; the error maps each
//! category from the domain to a status code and a client-safe JSON body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use scuderia_core::types::FieldError;
use scuderia_core::{ListError, StorageError, StoreError};

/// Application-level error type for the showroom.
#[derive(Debug, Error)]
pub enum AppError {
    /// Inventory operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Persistence adapter failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// List mutation rejected (comparison at capacity).
    #[error("List error: {0}")]
    List(#[from] ListError),

    /// Session store failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// JSON error body sent to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FieldError>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Storage(_) | Self::Session(_)) {
            tracing::error!(error = %self, "Request error");
        }

        let (status, body) = match self {
            Self::Store(StoreError::NotFound(id)) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: format!("car {id} not found"),
                    fields: None,
                },
            ),
            Self::Store(StoreError::Invalid(errors)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    error: errors.to_string(),
                    fields: Some(errors.0),
                },
            ),
            // Don't expose internal error details to clients
            Self::Store(StoreError::Storage(_)) | Self::Storage(_) | Self::Session(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "Internal server error".to_string(),
                    fields: None,
                },
            ),
            Self::List(err @ ListError::AtCapacity { .. }) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    error: err.to_string(),
                    fields: None,
                },
            ),
            Self::NotFound(what) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: format!("Not found: {what}"),
                    fields: None,
                },
            ),
            Self::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: message,
                    fields: None,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        fn status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            status(AppError::NotFound("car".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(AppError::BadRequest("nope".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(AppError::List(ListError::AtCapacity { cap: 4 })),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(AppError::Store(StoreError::NotFound(
                scuderia_core::CarId::new(9)
            ))),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_capacity_message_is_user_facing() {
        let err = AppError::List(ListError::AtCapacity { cap: 4 });
        assert!(err.to_string().contains("maximum 4"));
    }
}
