//! Authentication error types.

use thiserror::Error;

use scuderia_core::StorageError;

use super::provider::ProviderError;

/// Errors that can occur in the auth session glue.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The identity provider rejected or failed the sign-in.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The mirrored identity could not be persisted.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Sign-out was requested with no active session.
    #[error("no active session")]
    NotSignedIn,
}

impl AuthError {
    /// The distinct, user-facing message for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Provider(ProviderError::Cancelled) => "Sign-in was cancelled".to_string(),
            Self::Provider(ProviderError::Blocked) => {
                "Interactive sign-in is unavailable right now; please try again".to_string()
            }
            Self::Provider(ProviderError::UnauthorizedDomain) => {
                "This account's domain is not authorized for the admin panel".to_string()
            }
            Self::Provider(ProviderError::Unauthorized) => "Invalid credentials".to_string(),
            Self::Provider(ProviderError::Network(_)) => {
                "Could not reach the identity provider; check your connection".to_string()
            }
            Self::Storage(_) => "Internal server error".to_string(),
            Self::NotSignedIn => "No active session".to_string(),
        }
    }
}
