//! Scuderia Admin - Internal inventory administration panel.
//!
//! This binary serves the admin panel on port 3001.
//!
//! # Architecture
//!
//! - Axum web framework serving JSON endpoints
//! - File-backed JSON store shared with the showroom binary
//! - Identity-provider glue mirroring sign-in state into local storage
//! - In-memory sessions for the signed-in identity and editor state
//! - Background task reconciling out-of-band inventory writes
//!
//! # Security
//!
//! This binary performs every inventory write. It is meant to run on an
//! internal network; the showroom binary has no write path to the
//! inventory.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod middleware;
mod models;
mod routes;
mod services;
mod state;
mod sync;

use config::AdminConfig;
use scuderia_core::keys;
use scuderia_core::types::CarRecord;
use state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter.
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "scuderia_admin=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = AdminConfig::from_env().expect("Failed to load configuration");

    // Build application state (hydrates inventory, builds auth glue)
    let state = AppState::new(config.clone()).expect("Failed to initialize application state");
    tracing::info!(
        data_dir = %config.data_dir.display(),
        "Application state initialized"
    );

    // Mirror out-of-band provider session events
    state.auth().spawn_watch();

    // Start reconciling out-of-band inventory writes
    sync::spawn_inventory_sync(state.clone());

    // Create session layer
    let session_layer = middleware::create_session_layer();

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("admin listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the data directory is readable before returning OK.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.storage().load::<Vec<CarRecord>>(keys::CARS) {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
