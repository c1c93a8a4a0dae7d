//! Middleware and extractors for the admin panel.

mod auth;
mod session;

pub use auth::RequireAuth;
pub use session::create_session_layer;
