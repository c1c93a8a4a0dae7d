//! CSV bulk import route handlers.

use axum::{
    Json,
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
};
use tracing::{info, instrument};

use scuderia_core::import::{self, ImportReport};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Upload a CSV file and import its rows.
///
/// Partial-failure tolerant: bad rows are skipped and counted, the batch
/// always completes, and the response reports imported vs. skipped counts
/// with per-row reasons.
#[instrument(skip(state, _auth, multipart))]
pub async fn upload(
    _auth: RequireAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportReport>> {
    let mut file: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("could not read upload: {e}")))?;
            file = Some(bytes.to_vec());
        }
    }

    let file = file.ok_or_else(|| AppError::BadRequest("missing 'file' field".to_string()))?;

    let (drafts, report) = import::read_drafts(file.as_slice())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    state.cars().write().await.insert_imported(drafts)?;

    info!(
        imported = report.imported,
        skipped = report.skipped,
        "CSV import finished"
    );
    Ok(Json(report))
}

/// Download the fixed CSV import template.
#[instrument(skip(_auth))]
pub async fn template(_auth: RequireAuth) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"inventory_template.csv\"",
            ),
        ],
        import::csv_template(),
    )
}
