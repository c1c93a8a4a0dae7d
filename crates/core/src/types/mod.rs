//! Domain types for the car catalog.

mod car;
mod id;
mod slug;

pub use car::{
    BodyStyle, CarDraft, CarRecord, CarStatus, CarUpdate, FieldError, FuelType, MIN_YEAR,
    Transmission, ValidationErrors, current_year,
};
pub use id::CarId;
pub use slug::{slugify, unique_slug};
