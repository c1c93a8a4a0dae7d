//! Authentication extractor for admin routes.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use crate::models::session_keys;
use crate::services::auth::Identity;

/// Extractor that requires a signed-in identity.
///
/// Rejects with 401 when the session carries no identity.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(identity): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", identity.display_name)
/// }
/// ```
pub struct RequireAuth(pub Identity);

/// Error returned when authentication is required but absent.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "authentication required" })),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts.extensions.get::<Session>().ok_or(AuthRejection)?;

        let identity: Identity = session
            .get(session_keys::CURRENT_IDENTITY)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRejection)?;

        Ok(Self(identity))
    }
}
