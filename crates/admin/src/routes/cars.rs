//! Inventory CRUD route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use scuderia_core::types::{CarDraft, CarId, CarRecord, CarStatus, CarUpdate};
use scuderia_core::{FilterCriteria, SortDirection, SortKey, apply_filters};

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Admin inventory table query parameters.
///
/// The table shows every status by default; `status` narrows it, and the
/// free-text filter runs through the same pipeline the showroom uses.
#[derive(Debug, Default, Deserialize)]
pub struct AdminCarsQuery {
    pub status: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

impl AdminCarsQuery {
    fn status_filter(&self) -> Option<CarStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }

    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            query: self.q.clone().filter(|q| !q.trim().is_empty()),
            sort: self.sort.as_deref().and_then(SortKey::parse),
            direction: self
                .direction
                .as_deref()
                .map(SortDirection::parse)
                .unwrap_or_default(),
            ..FilterCriteria::default()
        }
    }
}

/// Admin inventory table: all statuses, filtered and sorted.
#[instrument(skip(state, _auth))]
pub async fn index(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<AdminCarsQuery>,
) -> Json<Vec<CarRecord>> {
    let status = query.status_filter();
    let criteria = query.criteria();

    let cars: Vec<CarRecord> = state
        .cars()
        .read()
        .await
        .all()
        .iter()
        .filter(|car| status.is_none_or(|wanted| car.status == wanted))
        .cloned()
        .collect();

    Json(apply_filters(&cars, &criteria))
}

/// Fetch one record by id, any status.
#[instrument(skip(state, _auth))]
pub async fn show(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CarRecord>> {
    let id = CarId::new(id);
    let cars = state.cars().read().await;
    let car = cars
        .get(id)
        .ok_or(scuderia_core::StoreError::NotFound(id))?;

    Ok(Json(car.clone()))
}

/// Create a record from a typed draft.
///
/// Missing or implausible required fields come back as a 422 with
/// field-level errors.
#[instrument(skip(state, _auth, draft))]
pub async fn create(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Json(draft): Json<CarDraft>,
) -> Result<(StatusCode, Json<CarRecord>)> {
    let created = state.cars().write().await.create(draft)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Shallow-merge a partial update over an existing record.
///
/// Fields absent from the body are preserved; 404 if the id is unknown.
#[instrument(skip(state, _auth, update))]
pub async fn update(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<CarUpdate>,
) -> Result<Json<CarRecord>> {
    let updated = state.cars().write().await.update(CarId::new(id), update)?;
    Ok(Json(updated))
}

/// Delete a record.
///
/// Confirmation happens at the UI boundary; here the operation is
/// unconditional. 404 signals an unknown id.
#[instrument(skip(state, _auth))]
pub async fn destroy(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.cars().write().await.delete(CarId::new(id))?;
    Ok(StatusCode::NO_CONTENT)
}
