//! Background inventory reconciliation.
//!
//! Mirrors the showroom's sync task: the other process may add or delete
//! cars in the shared data directory, and this view re-reads the persisted
//! inventory whenever the record count differs from memory.

use std::time::Duration;

use tracing::{error, info};

use crate::state::AppState;

/// Spawn the reconciliation task.
pub fn spawn_inventory_sync(state: AppState) {
    let period = Duration::from_secs(state.config().sync_interval_secs.max(1));
    info!(period_secs = period.as_secs(), "Spawning inventory sync task");

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
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
