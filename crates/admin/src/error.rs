//! Unified error handling for the admin panel.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use scuderia_core::types::FieldError;
use scuderia_core::{StorageError, StoreError};

use crate::services::auth::{AuthError, ProviderError};

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Inventory operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Persistence adapter failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

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

impl ErrorBody {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Storage(_) | Self::Session(_)) {
            tracing::error!(error = %self, "Request error");
        }

        let (status, body) = match self {
            Self::Store(StoreError::NotFound(id)) => (
                StatusCode::NOT_FOUND,
                ErrorBody::message(format!("car {id} not found")),
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
                ErrorBody::message("Internal server error"),
            ),
            Self::Auth(err) => (auth_status(&err), ErrorBody::message(err.user_message())),
            Self::NotFound(what) => (
                StatusCode::NOT_FOUND,
                ErrorBody::message(format!("Not found: {what}")),
            ),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, ErrorBody::message(message)),
        };

        (status, Json(body)).into_response()
    }
}

/// Map each classified auth failure to its status code.
const fn auth_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::Provider(ProviderError::Cancelled) => StatusCode::BAD_REQUEST,
        AuthError::Provider(ProviderError::Blocked) => StatusCode::SERVICE_UNAVAILABLE,
        AuthError::Provider(ProviderError::UnauthorizedDomain) => StatusCode::FORBIDDEN,
        AuthError::Provider(ProviderError::Unauthorized) | AuthError::NotSignedIn => {
            StatusCode::UNAUTHORIZED
        }
        AuthError::Provider(ProviderError::Network(_)) => StatusCode::BAD_GATEWAY,
        AuthError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
