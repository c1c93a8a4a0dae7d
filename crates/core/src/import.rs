//! CSV bulk import for the inventory.
//!
//! The import format is a comma-separated file with a header row. Column
//! names are accepted in Italian or English, in either case (`Marca`,
//! `marca`, `brand`, ...). Numeric fields are coerced with a fallback when
//! parsing fails: a malformed price becomes 0 and a malformed year becomes
//! the current year. A row is admitted only when brand, model, and a
//! positive price are all present; anything else is counted and skipped.
//!
//! The batch as a whole always completes: per-row failures go into the
//! report instead of aborting the import.

use std::io;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::types::{
    BodyStyle, CarDraft, CarStatus, FuelType, Transmission, current_year,
};

/// The fixed template header row, in template column order.
pub const TEMPLATE_HEADERS: [&str; 14] = [
    "Marca",
    "Modello",
    "Anno",
    "Prezzo",
    "Km",
    "Carburante",
    "Cambio",
    "Potenza",
    "Colore",
    "Categoria",
    "Porte",
    "Posti",
    "Immagini",
    "Descrizione",
];

/// Errors that abort the import before any row is processed.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The header row could not be read at all.
    #[error("could not read CSV header: {0}")]
    Header(#[source] csv::Error),
}

/// Why one row was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// 1-based data-row index (the header row is not counted).
    pub row: usize,
    pub reason: String,
}

/// Aggregate outcome of a bulk import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<RowError>,
}

impl ImportReport {
    fn skip(&mut self, row: usize, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(row, %reason, "import row skipped");
        self.skipped += 1;
        self.errors.push(RowError { row, reason });
    }
}

/// Generate the fixed CSV import template (header row only).
#[must_use]
pub fn csv_template() -> String {
    let mut template = TEMPLATE_HEADERS.join(",");
    template.push('\n');
    template
}

/// Parse CSV rows into admitted drafts plus a per-row report.
///
/// Never aborts on a bad row; the report carries the skip reasons. The
/// returned drafts still need to be applied to the store (see
/// [`CarStore::insert_imported`](crate::store::CarStore::insert_imported)).
///
/// # Errors
///
/// Returns [`ImportError::Header`] only when the header row itself is
/// unreadable.
pub fn read_drafts<R: io::Read>(reader: R) -> Result<(Vec<CarDraft>, ImportReport), ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(ImportError::Header)?;
    let columns: Vec<Option<Column>> = headers.iter().map(Column::parse).collect();

    let mut drafts = Vec::new();
    let mut report = ImportReport::default();

    for (index, result) in csv_reader.records().enumerate() {
        let row = index + 1;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                report.skip(row, format!("unreadable row: {e}"));
                continue;
            }
        };

        match coerce_row(&columns, &record) {
            Ok(draft) => {
                drafts.push(draft);
                report.imported += 1;
            }
            Err(reason) => report.skip(row, reason),
        }
    }

    Ok((drafts, report))
}

/// Canonical import columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Brand,
    Model,
    Year,
    Price,
    Km,
    Fuel,
    Transmission,
    Power,
    Color,
    Category,
    Doors,
    Seats,
    Images,
    Description,
    Status,
}

impl Column {
    /// Map a header cell to a canonical column, tolerating either language
    /// and either case. Unknown headers are ignored.
    fn parse(header: &str) -> Option<Self> {
        match header.trim().to_lowercase().as_str() {
            "marca" | "brand" => Some(Self::Brand),
            "modello" | "model" => Some(Self::Model),
            "anno" | "year" => Some(Self::Year),
            "prezzo" | "price" => Some(Self::Price),
            "km" | "chilometraggio" | "mileage" => Some(Self::Km),
            "carburante" | "fuel" => Some(Self::Fuel),
            "cambio" | "transmission" => Some(Self::Transmission),
            "potenza" | "power" | "cv" => Some(Self::Power),
            "colore" | "color" => Some(Self::Color),
            "categoria" | "category" => Some(Self::Category),
            "porte" | "doors" => Some(Self::Doors),
            "posti" | "seats" => Some(Self::Seats),
            "immagini" | "immagine" | "images" | "image" => Some(Self::Images),
            "descrizione" | "description" => Some(Self::Description),
            "stato" | "status" => Some(Self::Status),
            _ => None,
        }
    }
}

/// The value under `wanted` in one record, or `""` when absent.
fn cell_value<'r>(
    columns: &[Option<Column>],
    record: &'r csv::StringRecord,
    wanted: Column,
) -> &'r str {
    columns
        .iter()
        .zip(record.iter())
        .find_map(|(column, value)| (*column == Some(wanted)).then_some(value))
        .unwrap_or("")
}

/// Coerce one record into a draft, or explain why it is inadmissible.
fn coerce_row(columns: &[Option<Column>], record: &csv::StringRecord) -> Result<CarDraft, String> {
    let cell = |wanted| cell_value(columns, record, wanted);

    let brand = cell(Column::Brand).trim();
    let model = cell(Column::Model).trim();
    // Malformed price coerces to 0 and then fails admission below.
    let price: u32 = cell(Column::Price).parse().unwrap_or(0);

    let mut missing = Vec::new();
    if brand.is_empty() {
        missing.push("brand");
    }
    if model.is_empty() {
        missing.push("model");
    }
    if price == 0 {
        missing.push("positive price");
    }
    if !missing.is_empty() {
        return Err(format!("missing {}", missing.join(", ")));
    }

    Ok(CarDraft {
        brand: brand.to_string(),
        model: model.to_string(),
        year: cell(Column::Year).parse().unwrap_or_else(|_| current_year()),
        price,
        mileage_km: cell(Column::Km).parse().unwrap_or(0),
        fuel: FuelType::parse_lenient(cell(Column::Fuel)).unwrap_or_default(),
        transmission: Transmission::parse_lenient(cell(Column::Transmission)).unwrap_or_default(),
        power_cv: cell(Column::Power).parse().unwrap_or(0),
        color: cell(Column::Color).trim().to_string(),
        body: BodyStyle::parse_lenient(cell(Column::Category)).unwrap_or_default(),
        doors: cell(Column::Doors).parse().unwrap_or(5),
        seats: cell(Column::Seats).parse().unwrap_or(5),
        images: cell(Column::Images)
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        status: cell(Column::Status).parse().unwrap_or(CarStatus::Active),
        featured: false,
        description: cell(Column::Description).trim().to_string(),
    })
}
