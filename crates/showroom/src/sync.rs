//! Background inventory reconciliation.
//!
//! The admin binary writes the same `cars` document this process reads. A
//! background task periodically re-reads it and replaces the in-memory
//! inventory when the record count differs - the same coarse, best-effort
//! reconciliation the store exposes via `reload_if_changed`.

use std::time::Duration;

use tracing::{error, info};

use crate::state::AppState;

/// Spawn the reconciliation task.
///
/// Runs until the process exits; errors reading the persisted document are
/// logged and the next tick retries.
pub fn spawn_inventory_sync(state: AppState) {
    let period = Duration::from_secs(state.config().sync_interval_secs.max(1));
    info!(period_secs = period.as_secs(), "Spawning inventory sync task");

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick fires immediately; skip it, the state was just
        // hydrated.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match state.cars().write().await.reload_if_changed() {
                Ok(true) => info!("Inventory reloaded from disk"),
                Ok(false) => {}
                Err(e) => error!(error = %e, "Inventory sync failed"),
            }
        }
    });
}
