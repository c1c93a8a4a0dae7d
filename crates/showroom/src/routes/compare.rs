//! Comparison list route handlers.
//!
//! The comparison list is session-scoped: it lives in the session store and
//! disappears when the browsing session ends, unlike favorites which are
//! durable. The list is capped; a toggle onto a full list is rejected with
//! a capacity message.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use scuderia_core::types::{CarId, CarRecord};
use scuderia_core::{COMPARISON_CAP, MembershipList, ToggleOutcome};

use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::state::AppState;

/// Comparison list display data.
#[derive(Debug, Serialize)]
pub struct ComparisonView {
    pub cars: Vec<CarRecord>,
    pub cap: usize,
}

/// Result of a toggle.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub outcome: ToggleOutcome,
    pub ids: Vec<i64>,
}

/// Load the session-scoped list, sanitized against the cap.
async fn load_list(session: &Session) -> Result<MembershipList> {
    let ids: Vec<CarId> = session
        .get(session_keys::COMPARISON)
        .await?
        .unwrap_or_default();
    Ok(MembershipList::capped_from(COMPARISON_CAP, ids))
}

/// Display the comparison list with full records.
///
/// Ids whose record has been deleted out from under the session are
/// silently dropped from the view.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<ComparisonView>> {
    let list = load_list(&session).await?;
    let cars_guard = state.cars().read().await;

    let cars = list
        .ids()
        .iter()
        .filter_map(|&id| cars_guard.get(id).cloned())
        .collect();

    Ok(Json(ComparisonView {
        cars,
        cap: COMPARISON_CAP,
    }))
}

/// Toggle a car in the comparison list.
///
/// Rejects with 409 when adding to a full list; the list is unchanged in
/// that case.
#[instrument(skip(state, session))]
pub async fn toggle(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Json<ToggleResponse>> {
    let id = CarId::new(id);
    if state.cars().read().await.get(id).is_none() {
        return Err(AppError::NotFound(format!("car {id}")));
    }

    let mut list = load_list(&session).await?;
    let outcome = list.toggle(id)?;
    session.insert(session_keys::COMPARISON, list.ids()).await?;

    Ok(Json(ToggleResponse {
        outcome,
        ids: list.ids().iter().map(|id| id.as_i64()).collect(),
    }))
}
