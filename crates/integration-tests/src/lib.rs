//! Integration tests for Scuderia Motors.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p scuderia-integration-tests
//! ```
//!
//! Every test runs against its own temporary data directory; no external
//! services are required.
//!
//! # Test Categories
//!
//! - `store_lifecycle` - CRUD persistence across store reopens
//! - `cross_process_sync` - Count-based reconciliation between two stores
//! - `import_flow` - CSV import end to end
//! - `auth_glue` - Identity provider glue against the directory provider

#![cfg_attr(not(test), forbid(unsafe_code))]

use scuderia_core::types::{BodyStyle, CarDraft, CarStatus, FuelType, Transmission};
use scuderia_core::{CarStore, JsonStore};

/// Build a valid draft for tests.
#[must_use]
pub fn sample_draft(brand: &str, model: &str, price: u32) -> CarDraft {
    CarDraft {
        brand: brand.to_string(),
        model: model.to_string(),
        year: 2022,
        price,
        mileage_km: 20_000,
        fuel: FuelType::Petrol,
        transmission: Transmission::Manual,
        power_cv: 110,
        color: "silver".to_string(),
        body: BodyStyle::Sedan,
        doors: 4,
        seats: 5,
        images: vec![format!("{}-{}.jpg", brand.to_lowercase(), model.to_lowercase())],
        status: CarStatus::Active,
        featured: false,
        description: "integration test car".to_string(),
    }
}

/// Open a store over `dir` the way the binaries do.
///
/// # Panics
///
/// Panics if the directory cannot be opened; tests always pass a writable
/// temporary directory.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn open_store(dir: &std::path::Path) -> CarStore {
    CarStore::open(JsonStore::open(dir).unwrap()).unwrap()
}
