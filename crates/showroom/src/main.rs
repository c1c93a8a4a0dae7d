//! Scuderia Showroom - Public dealership catalog.
//!
//! This binary serves the customer-facing catalog on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework serving JSON endpoints
//! - File-backed JSON store shared with the admin binary
//! - In-memory sessions for the session-scoped comparison list
//! - Background task reconciling out-of-band inventory writes
//!
//! The showroom never mutates the inventory; car writes happen in the
//! admin binary and arrive here through the shared data directory.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod middleware;
mod models;
mod routes;
mod state;
mod sync;

use config::ShowroomConfig;
use scuderia_core::keys;
use scuderia_core::types::CarRecord;
use state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter.
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "scuderia_showroom=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ShowroomConfig::from_env().expect("Failed to load configuration");

    // Build application state (hydrates inventory, cart, favorites)
    let state = AppState::new(config.clone()).expect("Failed to initialize application state");
    tracing::info!(
        data_dir = %config.data_dir.display(),
        "Application state initialized"
    );

    // Start reconciling out-of-band inventory writes
    sync::spawn_inventory_sync(state.clone());

    // Create session layer (comparison list only)
    let session_layer = middleware::create_session_layer();

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .layer(session_layer)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("showroom listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the data directory is readable before returning OK.
/// Returns 503 Service Unavailable otherwise.
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
