//! Favorites route handlers.
//!
//! Favorites are durable: the list is persisted through the JSON store and
//! survives across sessions. Toggling is idempotent over two calls.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use scuderia_core::types::{CarId, CarRecord};
use scuderia_core::{ToggleOutcome, keys};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Favorites display data.
#[derive(Debug, Serialize)]
pub struct FavoritesView {
    pub cars: Vec<CarRecord>,
}

/// Result of a toggle.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub outcome: ToggleOutcome,
    pub ids: Vec<i64>,
}

/// Display the favorites with full records.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<FavoritesView> {
    let favorites = state.favorites().read().await;
    let cars_guard = state.cars().read().await;

    let cars = favorites
        .ids()
        .iter()
        .filter_map(|&id| cars_guard.get(id).cloned())
        .collect();

    Json(FavoritesView { cars })
}

/// Toggle a car in the favorites list.
#[instrument(skip(state))]
pub async fn toggle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ToggleResponse>> {
    let id = CarId::new(id);
    if state.cars().read().await.get(id).is_none() {
        return Err(AppError::NotFound(format!("car {id}")));
    }

    let mut favorites = state.favorites().write().await;
    // The favorites list is unbounded, so the toggle cannot hit a cap.
    let outcome = favorites.toggle(id)?;
    state.storage().save(keys::FAVORITES, &*favorites)?;

    Ok(Json(ToggleResponse {
        outcome,
        ids: favorites.ids().iter().map(|id| id.as_i64()).collect(),
    }))
}
