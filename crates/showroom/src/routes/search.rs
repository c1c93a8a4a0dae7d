//! Free-text search over the active catalog.
//!
//! Search is a lower-cased substring match across the searchable fields of
//! each record - a dimension of the shared filter pipeline, not a separate
//! index. Input debouncing is a client concern.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use scuderia_core::types::CarRecord;
use scuderia_core::{FilterCriteria, apply_filters};

use super::cars::CarSummary;
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Search active cars by free text.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<CarSummary>> {
    let criteria = FilterCriteria {
        query: query.q.filter(|q| !q.trim().is_empty()),
        ..FilterCriteria::default()
    };

    let cars: Vec<CarRecord> = state.cars().read().await.visible().cloned().collect();
    let summaries = apply_filters(&cars, &criteria)
        .iter()
        .map(CarSummary::from)
        .collect();
    Json(summaries)
}
