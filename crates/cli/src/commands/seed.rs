//! Seed the data directory with a starter inventory.

use thiserror::Error;
use tracing::info;

use scuderia_core::types::{BodyStyle, CarDraft, CarStatus, FuelType, Transmission};
use scuderia_core::{StoreError, StorageError};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The inventory already holds records and `--force` was not given.
    #[error("inventory already has {0} cars; pass --force to replace it")]
    NotEmpty(usize),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Seed the starter inventory.
///
/// # Errors
///
/// Refuses to overwrite an existing inventory unless `force` is set.
pub fn run(force: bool) -> Result<(), SeedError> {
    let mut store = super::open_store()?;

    if !store.is_empty() {
        if !force {
            return Err(SeedError::NotEmpty(store.len()));
        }
        info!(replaced = store.len(), "replacing existing inventory");
        store.replace_all(Vec::new())?;
    }

    let drafts = starter_inventory();
    let count = store.insert_imported(drafts)?;

    info!(count, "starter inventory seeded");
    Ok(())
}

/// The static starter dataset.
fn starter_inventory() -> Vec<CarDraft> {
    let car = |brand: &str,
               model: &str,
               year: u16,
               price: u32,
               mileage_km: u32,
               fuel: FuelType,
               transmission: Transmission,
               power_cv: u16,
               color: &str,
               body: BodyStyle,
               featured: bool,
               description: &str| CarDraft {
        brand: brand.to_string(),
        model: model.to_string(),
        year,
        price,
        mileage_km,
        fuel,
        transmission,
        power_cv,
        color: color.to_string(),
        body,
        doors: 5,
        seats: 5,
        images: Vec::new(),
        status: CarStatus::Active,
        featured,
        description: description.to_string(),
    };

    vec![
        car(
            "Fiat",
            "Panda",
            2021,
            9_500,
            45_000,
            FuelType::Petrol,
            Transmission::Manual,
            70,
            "white",
            BodyStyle::Citycar,
            false,
            "City car ideale per i neopatentati, unico proprietario.",
        ),
        car(
            "Fiat",
            "500X",
            2020,
            15_900,
            62_000,
            FuelType::Diesel,
            Transmission::Manual,
            120,
            "red",
            BodyStyle::Suv,
            false,
            "Crossover compatto con sensori di parcheggio e cruise control.",
        ),
        car(
            "Alfa Romeo",
            "Giulia",
            2022,
            38_500,
            25_000,
            FuelType::Petrol,
            Transmission::Automatic,
            200,
            "rosso alfa",
            BodyStyle::Sedan,
            true,
            "Berlina sportiva, tagliandi certificati in rete ufficiale.",
        ),
        car(
            "Alfa Romeo",
            "Stelvio",
            2021,
            34_900,
            48_000,
            FuelType::Diesel,
            Transmission::Automatic,
            210,
            "grigio vesuvio",
            BodyStyle::Suv,
            true,
            "Q4 a trazione integrale, interni in pelle.",
        ),
        car(
            "Lancia",
            "Ypsilon",
            2023,
            14_200,
            8_000,
            FuelType::Hybrid,
            Transmission::Manual,
            70,
            "blue",
            BodyStyle::Citycar,
            false,
            "Mild hybrid, ancora in garanzia ufficiale.",
        ),
        car(
            "BMW",
            "320d Touring",
            2020,
            27_500,
            78_000,
            FuelType::Diesel,
            Transmission::Automatic,
            190,
            "black",
            BodyStyle::Wagon,
            false,
            "Station wagon con gancio traino e navigatore professional.",
        ),
        car(
            "Audi",
            "A3 Sportback",
            2022,
            29_900,
            31_000,
            FuelType::Petrol,
            Transmission::Automatic,
            150,
            "grey",
            BodyStyle::Hatchback,
            false,
            "",
        ),
        car(
            "Tesla",
            "Model 3",
            2023,
            36_000,
            15_000,
            FuelType::Electric,
            Transmission::Automatic,
            325,
            "white",
            BodyStyle::Sedan,
            true,
            "Long Range, autopilot di serie, ricarica rapida.",
        ),
    ]
}
