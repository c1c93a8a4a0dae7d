//! Record editor state machine.
//!
//! The editor is either in create mode or in edit mode for one record:
//!
//! ```text
//! idle/create --begin(id)--> editing(id) --submit/cancel--> idle/create
//! ```
//!
//! Entering edit mode tags the session with the target id and returns the
//! record for form pre-fill. Submitting while tagged performs an update,
//! not a create; leaving edit mode (cancel or successful submit) clears the
//! tag back to create-mode defaults.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use scuderia_core::types::{CarDraft, CarId, CarRecord, CarUpdate};
use scuderia_core::StoreError;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::session_keys;
use crate::state::AppState;

/// Editor mode as seen by the client.
#[derive(Debug, Serialize)]
pub struct EditorState {
    /// Id of the record being edited, absent in create mode.
    pub editing: Option<i64>,
}

/// Outcome of a submit.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    /// `"created"` or `"updated"`.
    pub mode: &'static str,
    pub car: CarRecord,
}

/// Current editor mode.
#[instrument(skip(session, _auth))]
pub async fn status(_auth: RequireAuth, session: Session) -> Result<Json<EditorState>> {
    let editing: Option<i64> = session.get(session_keys::EDITING_CAR).await?;
    Ok(Json(EditorState { editing }))
}

/// Enter edit mode for a record.
///
/// Tags the session and returns the record so the form can pre-fill.
#[instrument(skip(state, session, _auth))]
pub async fn begin(
    _auth: RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Json<CarRecord>> {
    let id = CarId::new(id);
    let car = state
        .cars()
        .read()
        .await
        .get(id)
        .cloned()
        .ok_or(StoreError::NotFound(id))?;

    session.insert(session_keys::EDITING_CAR, id.as_i64()).await?;
    Ok(Json(car))
}

/// Submit the editor form.
///
/// In edit mode this updates the tagged record; otherwise it creates a new
/// one. A successful submit leaves edit mode.
#[instrument(skip(state, session, _auth, draft))]
pub async fn submit(
    _auth: RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Json(draft): Json<CarDraft>,
) -> Result<(StatusCode, Json<SubmitResponse>)> {
    let editing: Option<i64> = session.get(session_keys::EDITING_CAR).await?;

    if let Some(id) = editing {
        // The form submits a full draft even in edit mode; run the same
        // validation as create before turning it into a merge.
        draft.validate().map_err(StoreError::from)?;
        let car = state
            .cars()
            .write()
            .await
            .update(CarId::new(id), CarUpdate::from(draft))?;

        session
            .remove::<i64>(session_keys::EDITING_CAR)
            .await?;
        Ok((StatusCode::OK, Json(SubmitResponse { mode: "updated", car })))
    } else {
        let car = state.cars().write().await.create(draft)?;
        Ok((
            StatusCode::CREATED,
            Json(SubmitResponse { mode: "created", car }),
        ))
    }
}

/// Leave edit mode without saving.
#[instrument(skip(session, _auth))]
pub async fn cancel(_auth: RequireAuth, session: Session) -> Result<Json<EditorState>> {
    session.remove::<i64>(session_keys::EDITING_CAR).await?;
    Ok(Json(EditorState { editing: None }))
}
