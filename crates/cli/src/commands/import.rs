//! CSV import and template commands.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use scuderia_core::import::{ImportError, csv_template, read_drafts};
use scuderia_core::{StorageError, StoreError};

/// Errors that can occur while importing.
#[derive(Debug, Error)]
pub enum CliImportError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("could not read {0}: {1}")]
    Read(String, #[source] std::io::Error),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Every row was skipped.
    #[error("no rows imported ({skipped} skipped)")]
    NothingImported { skipped: usize },
}

/// Import cars from a CSV file into the shared store.
///
/// # Errors
///
/// Per-row failures only show up in the logged report; the command fails
/// only when the file is unreadable or nothing at all was imported.
pub fn run(file: &str) -> Result<(), CliImportError> {
    let path = Path::new(file);
    if !path.exists() {
        return Err(CliImportError::FileNotFound(file.to_string()));
    }

    let content =
        fs::read(path).map_err(|e| CliImportError::Read(file.to_string(), e))?;
    let (drafts, report) = read_drafts(content.as_slice())?;

    for error in &report.errors {
        warn!(row = error.row, reason = %error.reason, "row skipped");
    }

    if report.imported == 0 {
        return Err(CliImportError::NothingImported {
            skipped: report.skipped,
        });
    }

    let mut store = super::open_store()?;
    store.insert_imported(drafts)?;

    info!(
        imported = report.imported,
        skipped = report.skipped,
        total = store.len(),
        "import finished"
    );
    Ok(())
}

/// Write the CSV import template to `out`, or log it when absent.
///
/// # Errors
///
/// Returns an error if the output file cannot be written.
pub fn template(out: Option<&str>) -> Result<(), std::io::Error> {
    let template = csv_template();

    match out {
        Some(path) => {
            fs::write(path, &template)?;
            info!(path, "template written");
        }
        None => info!(template = %template.trim_end(), "import template"),
    }

    Ok(())
}
