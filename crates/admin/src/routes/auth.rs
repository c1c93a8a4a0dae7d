//! Authentication route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::models::session_keys;
use crate::services::auth::{AuthError, Identity};
use crate::state::AppState;

/// Sign-in request body.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Session state as seen by the client.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub identity: Option<Identity>,
    pub is_authenticated: bool,
}

/// Sign in through the identity provider.
///
/// A blocked interactive flow falls back to the redirect-style flow inside
/// the glue; classified failures come back with distinct messages.
#[instrument(skip(state, session, request))]
pub async fn sign_in(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SessionView>> {
    let identity = state
        .auth()
        .sign_in(&request.email, &request.password)
        .await?;

    session
        .insert(session_keys::CURRENT_IDENTITY, &identity)
        .await?;

    Ok(Json(SessionView {
        identity: Some(identity),
        is_authenticated: true,
    }))
}

/// Sign out and clear the mirrored identity.
#[instrument(skip(state, session))]
pub async fn sign_out(State(state): State<AppState>, session: Session) -> Result<Json<SessionView>> {
    session
        .remove::<Identity>(session_keys::CURRENT_IDENTITY)
        .await?;

    match state.auth().sign_out().await {
        Ok(()) | Err(AuthError::NotSignedIn) => {}
        Err(e) => return Err(e.into()),
    }

    Ok(Json(SessionView {
        identity: None,
        is_authenticated: false,
    }))
}

/// Current session state for this client.
#[instrument(skip(session))]
pub async fn session(session: Session) -> Result<Json<SessionView>> {
    let identity: Option<Identity> = session.get(session_keys::CURRENT_IDENTITY).await?;
    let is_authenticated = identity.is_some();

    Ok(Json(SessionView {
        identity,
        is_authenticated,
    }))
}
