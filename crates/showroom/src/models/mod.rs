//! Session-related types for the showroom.

/// Session keys for showroom state.
///
/// Only the comparison list lives in the session: it is deliberately
/// session-scoped, unlike the durably persisted cart and favorites.
pub mod session_keys {
    /// Key for the comparison list (a plain array of car ids).
    pub const COMPARISON: &str = "comparison";
}
