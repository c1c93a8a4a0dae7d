//! Session middleware configuration.
//!
//! Sessions are held in memory and expire with the browsing session. The
//! only session-scoped state is the comparison list; everything durable
//! goes through the JSON store instead.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "sm_session";

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer() -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnSessionEnd)
        .with_secure(false)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
