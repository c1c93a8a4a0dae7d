//! Middleware configuration for the showroom.

mod session;

pub use session::create_session_layer;
