//! Filter/sort/search pipeline over car records.
//!
//! This is the single shared implementation used by the showroom listing,
//! the showroom search endpoint, and the admin inventory table. Each filter
//! dimension is independent and conjunctive: a record is kept only if every
//! specified dimension matches. The pipeline never mutates its input.

mod sort;

pub use sort::{SortDirection, SortKey, sort_cars};

use serde::{Deserialize, Serialize};

use crate::types::{BodyStyle, CarRecord, FuelType, Transmission};

/// Filter criteria for a catalog listing.
///
/// Every field is optional; an absent field places no constraint on that
/// dimension. An empty criteria therefore selects everything in source
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Exact body-style match.
    pub category: Option<BodyStyle>,
    /// Case-insensitive substring match on the brand.
    pub brand: Option<String>,
    /// Inclusive price bounds; an absent bound is unbounded on that side.
    pub price_min: Option<u32>,
    pub price_max: Option<u32>,
    /// Inclusive year bounds.
    pub year_min: Option<u16>,
    pub year_max: Option<u16>,
    /// Exact fuel match.
    pub fuel: Option<FuelType>,
    /// Exact transmission match.
    pub transmission: Option<Transmission>,
    /// Lower-cased free-text substring search.
    pub query: Option<String>,
    /// Sort key; `None` keeps source order.
    pub sort: Option<SortKey>,
    #[serde(default)]
    pub direction: SortDirection,
}

impl FilterCriteria {
    /// Whether no dimension is constrained and no sort is requested.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.brand.is_none()
            && self.price_min.is_none()
            && self.price_max.is_none()
            && self.year_min.is_none()
            && self.year_max.is_none()
            && self.fuel.is_none()
            && self.transmission.is_none()
            && self.query.is_none()
            && self.sort.is_none()
    }
}

/// Loosely-typed query parameters as they arrive over HTTP.
///
/// Converted leniently into [`FilterCriteria`]: unknown enum values, unknown
/// sort keys, and empty strings are treated as "no constraint from this
/// dimension" rather than errors, matching the pipeline's fallback rules.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price_min: Option<u32>,
    pub price_max: Option<u32>,
    pub year_min: Option<u16>,
    pub year_max: Option<u16>,
    pub fuel: Option<String>,
    pub transmission: Option<String>,
    /// Free-text search term.
    pub q: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

impl CatalogQuery {
    /// Convert into typed criteria, dropping unparseable dimensions.
    #[must_use]
    pub fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            category: self
                .category
                .as_deref()
                .and_then(BodyStyle::parse_lenient),
            brand: non_empty(self.brand),
            price_min: self.price_min,
            price_max: self.price_max,
            year_min: self.year_min,
            year_max: self.year_max,
            fuel: self.fuel.as_deref().and_then(FuelType::parse_lenient),
            transmission: self
                .transmission
                .as_deref()
                .and_then(Transmission::parse_lenient),
            query: non_empty(self.q),
            sort: self.sort.as_deref().and_then(SortKey::parse),
            direction: self
                .direction
                .as_deref()
                .map(SortDirection::parse)
                .unwrap_or_default(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Whether `car` satisfies every specified dimension of `criteria`.
///
/// Cheap exact-match and range predicates run before the free-text scan.
#[must_use]
pub fn matches(car: &CarRecord, criteria: &FilterCriteria) -> bool {
    if let Some(category) = criteria.category
        && car.body != category
    {
        return false;
    }
    if let Some(fuel) = criteria.fuel
        && car.fuel != fuel
    {
        return false;
    }
    if let Some(transmission) = criteria.transmission
        && car.transmission != transmission
    {
        return false;
    }
    if let Some(min) = criteria.price_min
        && car.price < min
    {
        return false;
    }
    if let Some(max) = criteria.price_max
        && car.price > max
    {
        return false;
    }
    if let Some(min) = criteria.year_min
        && car.year < min
    {
        return false;
    }
    if let Some(max) = criteria.year_max
        && car.year > max
    {
        return false;
    }
    if let Some(brand) = &criteria.brand
        && !car.brand.to_lowercase().contains(&brand.to_lowercase())
    {
        return false;
    }
    if let Some(query) = &criteria.query
        && !search_haystack(car).contains(&query.to_lowercase())
    {
        return false;
    }

    true
}

/// Apply `criteria` to `cars`, returning a new vector.
///
/// Records are kept in source order unless a sort key is given, in which
/// case a stable sort is applied after filtering.
#[must_use]
pub fn apply_filters(cars: &[CarRecord], criteria: &FilterCriteria) -> Vec<CarRecord> {
    let mut result: Vec<CarRecord> = cars
        .iter()
        .filter(|car| matches(car, criteria))
        .cloned()
        .collect();

    if let Some(key) = criteria.sort {
        sort_cars(&mut result, key, criteria.direction);
    }

    result
}

/// Lower-cased concatenation of the searchable fields of a record.
fn search_haystack(car: &CarRecord) -> String {
    format!(
        "{} {} {} {} {} {} {} {}",
        car.brand,
        car.model,
        car.title(),
        car.description,
        car.color,
        car.fuel,
        car.body,
        car.transmission,
    )
    .to_lowercase()
}
