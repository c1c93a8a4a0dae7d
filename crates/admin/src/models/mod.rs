//! Session-related types for the admin panel.

/// Session keys for admin state.
pub mod session_keys {
    /// Key for the signed-in identity mirrored into this client's session.
    pub const CURRENT_IDENTITY: &str = "current_identity";

    /// Key tagging an editor session with the car being edited.
    ///
    /// Present: the editor is in edit mode for that id and submit performs
    /// an update. Absent: the editor is in create mode.
    pub const EDITING_CAR: &str = "editing_car";
}
