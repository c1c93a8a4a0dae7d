//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health               - Liveness check
//! GET    /health/ready         - Readiness check
//!
//! # Auth
//! POST   /auth/sign-in         - Sign in via the identity provider
//! POST   /auth/sign-out        - Sign out, clear the mirrored identity
//! GET    /auth/session         - Current session state
//!
//! # Inventory (requires auth)
//! GET    /cars                 - Admin table, all statuses, filterable
//! POST   /cars                 - Create from a typed draft
//! GET    /cars/{id}            - One record, any status
//! PATCH  /cars/{id}            - Shallow-merge partial update
//! DELETE /cars/{id}            - Delete
//!
//! # Record editor (requires auth, session-tagged)
//! GET    /editor               - Current editor mode
//! POST   /cars/{id}/edit       - Enter edit mode, returns pre-fill record
//! POST   /editor/submit        - Update when tagged, create otherwise
//! POST   /editor/cancel        - Back to create mode
//!
//! # Bulk import (requires auth)
//! POST   /import               - Multipart CSV upload, reports counts
//! GET    /import/template      - Fixed CSV header template
//! ```

pub mod auth;
pub mod cars;
pub mod editor;
pub mod import;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/sign-in", post(auth::sign_in))
        .route("/sign-out", post(auth::sign_out))
        .route("/session", get(auth::session))
}

/// Create the inventory routes router.
pub fn car_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cars::index).post(cars::create))
        .route(
            "/{id}",
            get(cars::show).patch(cars::update).delete(cars::destroy),
        )
        .route("/{id}/edit", post(editor::begin))
}

/// Create the editor routes router.
pub fn editor_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(editor::status))
        .route("/submit", post(editor::submit))
        .route("/cancel", post(editor::cancel))
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/cars", car_routes())
        .nest("/editor", editor_routes())
        .route("/import", post(import::upload))
        .route("/import/template", get(import::template))
}
