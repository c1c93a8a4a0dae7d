//! Car record, typed creation input, and partial update types.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::CarId;

/// Earliest model year accepted by validation.
pub const MIN_YEAR: u16 = 1900;

/// The current calendar year, used as the upper validation bound and as the
/// fallback when import rows carry an unparseable year.
#[must_use]
pub fn current_year() -> u16 {
    u16::try_from(chrono::Utc::now().year()).unwrap_or(u16::MAX)
}

/// Fuel type of a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    #[default]
    Petrol,
    Diesel,
    Hybrid,
    Electric,
    Lpg,
}

impl FuelType {
    /// Parse a loosely-formatted value (either case, Italian or English).
    ///
    /// Returns `None` for unknown values so callers can ignore or default
    /// the dimension instead of failing.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "petrol" | "benzina" | "gasoline" => Some(Self::Petrol),
            "diesel" | "gasolio" => Some(Self::Diesel),
            "hybrid" | "ibrida" | "ibrido" => Some(Self::Hybrid),
            "electric" | "elettrica" | "elettrico" => Some(Self::Electric),
            "lpg" | "gpl" => Some(Self::Lpg),
            _ => None,
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Petrol => write!(f, "petrol"),
            Self::Diesel => write!(f, "diesel"),
            Self::Hybrid => write!(f, "hybrid"),
            Self::Electric => write!(f, "electric"),
            Self::Lpg => write!(f, "lpg"),
        }
    }
}

impl std::str::FromStr for FuelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s).ok_or_else(|| format!("invalid fuel type: {s}"))
    }
}

/// Transmission type of a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Transmission {
    #[default]
    Manual,
    Automatic,
}

impl Transmission {
    /// Parse a loosely-formatted value (either case, Italian or English).
    #[must_use]
    pub fn parse_lenient(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "manual" | "manuale" => Some(Self::Manual),
            "automatic" | "automatico" | "automatica" => Some(Self::Automatic),
            _ => None,
        }
    }
}

impl std::fmt::Display for Transmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Manual => write!(f, "manual"),
            Self::Automatic => write!(f, "automatic"),
        }
    }
}

impl std::str::FromStr for Transmission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s).ok_or_else(|| format!("invalid transmission: {s}"))
    }
}

/// Body style (category) of a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BodyStyle {
    Citycar,
    Hatchback,
    Sedan,
    Suv,
    Wagon,
    Coupe,
    Convertible,
    Van,
    /// Catch-all for import rows whose category does not map to a known
    /// style. Admin creation requires an explicit style.
    #[default]
    Other,
}

impl BodyStyle {
    /// Parse a loosely-formatted value (either case, Italian or English).
    #[must_use]
    pub fn parse_lenient(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "citycar" | "city car" | "utilitaria" => Some(Self::Citycar),
            "hatchback" | "due volumi" => Some(Self::Hatchback),
            "sedan" | "berlina" => Some(Self::Sedan),
            "suv" | "crossover" => Some(Self::Suv),
            "wagon" | "station wagon" | "familiare" => Some(Self::Wagon),
            "coupe" | "coupé" => Some(Self::Coupe),
            "convertible" | "cabrio" | "cabriolet" | "spider" => Some(Self::Convertible),
            "van" | "furgone" | "monovolume" => Some(Self::Van),
            "other" | "altro" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for BodyStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Citycar => write!(f, "citycar"),
            Self::Hatchback => write!(f, "hatchback"),
            Self::Sedan => write!(f, "sedan"),
            Self::Suv => write!(f, "suv"),
            Self::Wagon => write!(f, "wagon"),
            Self::Coupe => write!(f, "coupe"),
            Self::Convertible => write!(f, "convertible"),
            Self::Van => write!(f, "van"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for BodyStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s).ok_or_else(|| format!("invalid body style: {s}"))
    }
}

/// Lifecycle status of a car record.
///
/// Non-[`Active`](Self::Active) records are excluded from customer-facing
/// default views but remain in the store for admin visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CarStatus {
    /// Listed in the public showroom.
    #[default]
    Active,
    /// Being prepared by admin, not yet public.
    Draft,
    /// Sold or withdrawn; kept for admin history.
    Archived,
}

impl std::fmt::Display for CarStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Draft => write!(f, "draft"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for CarStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" | "available" => Ok(Self::Active),
            "draft" => Ok(Self::Draft),
            "archived" | "sold" => Ok(Self::Archived),
            other => Err(format!("invalid status: {other}")),
        }
    }
}

/// A car in the catalog.
///
/// The inventory store guarantees that `id` is unique and that `slug` does
/// not collide with any other record's slug at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarRecord {
    pub id: CarId,
    /// URL slug derived from brand and model at creation time.
    pub slug: String,
    pub brand: String,
    pub model: String,
    pub year: u16,
    /// Asking price in whole euros.
    pub price: u32,
    /// Odometer reading; 0 conventionally means "new".
    pub mileage_km: u32,
    pub fuel: FuelType,
    pub transmission: Transmission,
    /// Engine power in CV.
    pub power_cv: u16,
    pub color: String,
    pub body: BodyStyle,
    pub doors: u8,
    pub seats: u8,
    /// Ordered image URLs; the first is the primary image.
    pub images: Vec<String>,
    pub status: CarStatus,
    pub featured: bool,
    pub description: String,
}

impl CarRecord {
    /// Display title, `"{brand} {model}"`.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    /// The primary (first) image, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether the record appears in customer-facing default views.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self.status, CarStatus::Active)
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: &'static str,
    /// Human-readable explanation.
    pub message: String,
}

impl FieldError {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Aggregate of per-field validation failures for one draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.0.iter().map(|e| e.field).collect();
        write!(f, "validation failed for: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Typed input for creating a car record.
///
/// Replaces the original system's loosely-typed key-value form records:
/// input is parsed into this struct at the HTTP/CSV boundary and validated
/// before it reaches the inventory store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarDraft {
    pub brand: String,
    pub model: String,
    pub year: u16,
    pub price: u32,
    #[serde(default)]
    pub mileage_km: u32,
    #[serde(default)]
    pub fuel: FuelType,
    #[serde(default)]
    pub transmission: Transmission,
    #[serde(default)]
    pub power_cv: u16,
    #[serde(default)]
    pub color: String,
    pub body: BodyStyle,
    #[serde(default = "default_doors")]
    pub doors: u8,
    #[serde(default = "default_seats")]
    pub seats: u8,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub status: CarStatus,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub description: String,
}

const fn default_doors() -> u8 {
    5
}

const fn default_seats() -> u8 {
    5
}

impl CarDraft {
    /// Check the required-field and plausibility invariants.
    ///
    /// # Errors
    ///
    /// Returns every failing field at once, so callers can surface the full
    /// set to the user in a single round trip.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if self.brand.trim().is_empty() {
            errors.push(FieldError::new("brand", "brand is required"));
        }
        if self.model.trim().is_empty() {
            errors.push(FieldError::new("model", "model is required"));
        }
        if self.year < MIN_YEAR || self.year > current_year() + 1 {
            errors.push(FieldError::new(
                "year",
                format!("year must be between {MIN_YEAR} and {}", current_year() + 1),
            ));
        }
        if self.price == 0 {
            errors.push(FieldError::new("price", "price must be greater than zero"));
        }
        // `Other` exists as the import catch-all; direct creation must pick
        // a real category.
        if self.body == BodyStyle::Other {
            errors.push(FieldError::new("category", "category is required"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    /// Build the record this draft describes.
    ///
    /// The store assigns `id` and `slug`; callers should have validated the
    /// draft first.
    #[must_use]
    pub fn into_record(self, id: CarId, slug: String) -> CarRecord {
        CarRecord {
            id,
            slug,
            brand: self.brand,
            model: self.model,
            year: self.year,
            price: self.price,
            mileage_km: self.mileage_km,
            fuel: self.fuel,
            transmission: self.transmission,
            power_cv: self.power_cv,
            color: self.color,
            body: self.body,
            doors: self.doors,
            seats: self.seats,
            images: self.images,
            status: self.status,
            featured: self.featured,
            description: self.description,
        }
    }
}

/// Partial update for a car record.
///
/// Every field is optional; [`apply`](Self::apply) shallow-merges the set
/// fields over an existing record, preserving the rest. `id` and `slug` are
/// not updatable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarUpdate {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<u16>,
    pub price: Option<u32>,
    pub mileage_km: Option<u32>,
    pub fuel: Option<FuelType>,
    pub transmission: Option<Transmission>,
    pub power_cv: Option<u16>,
    pub color: Option<String>,
    pub body: Option<BodyStyle>,
    pub doors: Option<u8>,
    pub seats: Option<u8>,
    pub images: Option<Vec<String>>,
    pub status: Option<CarStatus>,
    pub featured: Option<bool>,
    pub description: Option<String>,
}

impl From<CarDraft> for CarUpdate {
    /// A full-record update carrying every draft field.
    ///
    /// Used by the admin editor, whose form submits a complete draft even
    /// in edit mode.
    fn from(draft: CarDraft) -> Self {
        Self {
            brand: Some(draft.brand),
            model: Some(draft.model),
            year: Some(draft.year),
            price: Some(draft.price),
            mileage_km: Some(draft.mileage_km),
            fuel: Some(draft.fuel),
            transmission: Some(draft.transmission),
            power_cv: Some(draft.power_cv),
            color: Some(draft.color),
            body: Some(draft.body),
            doors: Some(draft.doors),
            seats: Some(draft.seats),
            images: Some(draft.images),
            status: Some(draft.status),
            featured: Some(draft.featured),
            description: Some(draft.description),
        }
    }
}

impl CarUpdate {
    /// Merge the set fields into `record`.
    pub fn apply(self, record: &mut CarRecord) {
        if let Some(brand) = self.brand {
            record.brand = brand;
        }
        if let Some(model) = self.model {
            record.model = model;
        }
        if let Some(year) = self.year {
            record.year = year;
        }
        if let Some(price) = self.price {
            record.price = price;
        }
        if let Some(mileage_km) = self.mileage_km {
            record.mileage_km = mileage_km;
        }
        if let Some(fuel) = self.fuel {
            record.fuel = fuel;
        }
        if let Some(transmission) = self.transmission {
            record.transmission = transmission;
        }
        if let Some(power_cv) = self.power_cv {
            record.power_cv = power_cv;
        }
        if let Some(color) = self.color {
            record.color = color;
        }
        if let Some(body) = self.body {
            record.body = body;
        }
        if let Some(doors) = self.doors {
            record.doors = doors;
        }
        if let Some(seats) = self.seats {
            record.seats = seats;
        }
        if let Some(images) = self.images {
            record.images = images;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(featured) = self.featured {
            record.featured = featured;
        }
        if let Some(description) = self.description {
            record.description = description;
        }
    }

    /// Whether the update carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.model.is_none()
            && self.year.is_none()
            && self.price.is_none()
            && self.mileage_km.is_none()
            && self.fuel.is_none()
            && self.transmission.is_none()
            && self.power_cv.is_none()
            && self.color.is_none()
            && self.body.is_none()
            && self.doors.is_none()
            && self.seats.is_none()
            && self.images.is_none()
            && self.status.is_none()
            && self.featured.is_none()
            && self.description.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft() -> CarDraft {
        CarDraft {
            brand: "BMW".to_string(),
            model: "320d".to_string(),
            year: 2023,
            price: 50_000,
            mileage_km: 12_000,
            fuel: FuelType::Diesel,
            transmission: Transmission::Automatic,
            power_cv: 190,
            color: "black".to_string(),
            body: BodyStyle::Sedan,
            doors: 4,
            seats: 5,
            images: vec!["https://img.example/bmw-1.jpg".to_string()],
            status: CarStatus::Active,
            featured: false,
            description: "Single owner, full service history".to_string(),
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_validate_collects_all_failures() {
        let mut d = draft();
        d.brand = "  ".to_string();
        d.model = String::new();
        d.price = 0;
        d.year = 1234;

        let errors = d.validate().unwrap_err();
        let fields: Vec<&str> = errors.0.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["brand", "model", "year", "price"]);
    }

    #[test]
    fn test_validate_requires_a_real_category() {
        let mut d = draft();
        d.body = BodyStyle::Other;

        let errors = d.validate().unwrap_err();
        assert_eq!(errors.0.first().unwrap().field, "category");
    }

    #[test]
    fn test_validate_rejects_far_future_year() {
        let mut d = draft();
        d.year = current_year() + 2;
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_update_preserves_unset_fields() {
        let mut record = draft().into_record(CarId::new(1), "bmw-320d".to_string());
        let update = CarUpdate {
            price: Some(45_000),
            ..CarUpdate::default()
        };

        update.apply(&mut record);

        assert_eq!(record.price, 45_000);
        assert_eq!(record.brand, "BMW");
        assert_eq!(record.mileage_km, 12_000);
        assert_eq!(record.status, CarStatus::Active);
    }

    #[test]
    fn test_lenient_parsing_bilingual() {
        assert_eq!(FuelType::parse_lenient("Benzina"), Some(FuelType::Petrol));
        assert_eq!(FuelType::parse_lenient("DIESEL"), Some(FuelType::Diesel));
        assert_eq!(FuelType::parse_lenient("jet fuel"), None);
        assert_eq!(
            Transmission::parse_lenient("Automatico"),
            Some(Transmission::Automatic)
        );
        assert_eq!(BodyStyle::parse_lenient("Berlina"), Some(BodyStyle::Sedan));
        assert_eq!(
            BodyStyle::parse_lenient("station wagon"),
            Some(BodyStyle::Wagon)
        );
    }

    #[test]
    fn test_status_from_str_accepts_legacy_names() {
        assert_eq!("available".parse::<CarStatus>().unwrap(), CarStatus::Active);
        assert_eq!("sold".parse::<CarStatus>().unwrap(), CarStatus::Archived);
    }

    #[test]
    fn test_primary_image_is_first() {
        let mut d = draft();
        d.images = vec!["a.jpg".to_string(), "b.jpg".to_string()];
        let record = d.into_record(CarId::new(1), "bmw-320d".to_string());
        assert_eq!(record.primary_image(), Some("a.jpg"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let record = draft().into_record(CarId::new(7), "bmw-320d".to_string());
        let json = serde_json::to_string(&record).unwrap();
        let parsed: CarRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
