//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use tracing::instrument;

use scuderia_core::types::{CarRecord, FuelType, Transmission};
use scuderia_core::{CatalogQuery, apply_filters};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Listing card data for one car.
#[derive(Debug, Clone, Serialize)]
pub struct CarSummary {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub brand: String,
    pub model: String,
    pub year: u16,
    pub price: u32,
    pub mileage_km: u32,
    pub fuel: FuelType,
    pub transmission: Transmission,
    pub image: Option<String>,
    pub featured: bool,
}

impl From<&CarRecord> for CarSummary {
    fn from(car: &CarRecord) -> Self {
        Self {
            id: car.id.as_i64(),
            slug: car.slug.clone(),
            title: car.title(),
            brand: car.brand.clone(),
            model: car.model.clone(),
            year: car.year,
            price: car.price,
            mileage_km: car.mileage_km,
            fuel: car.fuel,
            transmission: car.transmission,
            image: car.primary_image().map(String::from),
            featured: car.featured,
        }
    }
}

/// List active cars through the shared filter pipeline.
///
/// Every filter dimension arrives as a query parameter and is parsed
/// leniently: unknown enum values and sort keys are ignored rather than
/// rejected.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<Vec<CarSummary>> {
    let criteria = query.into_criteria();
    let cars: Vec<CarRecord> = state.cars().read().await.visible().cloned().collect();

    let summaries = apply_filters(&cars, &criteria)
        .iter()
        .map(CarSummary::from)
        .collect();
    Json(summaries)
}

/// Car detail by slug; 404 unless the record exists and is active.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CarRecord>> {
    let cars = state.cars().read().await;
    let car = cars
        .get_by_slug(&slug)
        .filter(|car| car.is_visible())
        .ok_or_else(|| AppError::NotFound(format!("car '{slug}'")))?;

    Ok(Json(car.clone()))
}
