//! Newtype ID for type-safe car references.

use serde::{Deserialize, Serialize};

/// Identifier of a [`CarRecord`](super::CarRecord).
///
/// Stable for the record's lifetime and unique within the inventory store.
/// Fresh ids are assigned by the store at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarId(i64);

impl CarId {
    /// Create a new car ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for CarId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CarId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<CarId> for i64 {
    fn from(id: CarId) -> Self {
        id.0
    }
}
