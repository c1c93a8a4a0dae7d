//! CLI command implementations.

pub mod import;
pub mod seed;

use std::path::PathBuf;

use scuderia_core::{CarStore, JsonStore, StorageError};

/// Open the shared inventory store from `SCUDERIA_DATA_DIR`.
///
/// # Errors
///
/// Returns an error if the data directory cannot be opened or the persisted
/// inventory fails to parse.
pub fn open_store() -> Result<CarStore, StorageError> {
    dotenvy::dotenv().ok();
    let data_dir =
        PathBuf::from(std::env::var("SCUDERIA_DATA_DIR").unwrap_or_else(|_| "data".to_string()));

    let storage = JsonStore::open(data_dir)?;
    CarStore::open(storage)
}
