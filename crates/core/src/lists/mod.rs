//! List managers for cart, favorites, and comparison.
//!
//! The original system grew three separately-implemented id lists with
//! drifting rules (a comparison cap of 3 in one page and 4 in another).
//! [`MembershipList`] is the single shared implementation, parameterized by
//! an optional cap; durability is the caller's concern (the showroom
//! persists favorites through the storage adapter and keeps the comparison
//! list in the session).

mod cart;

pub use cart::{Cart, CartLine};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::CarId;

/// The comparison list cap shared by every call site.
pub const COMPARISON_CAP: usize = 4;

/// Errors from list mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// The list is at its cap; the toggle was rejected and the list is
    /// unchanged.
    #[error("the comparison list is full (maximum {cap} cars)")]
    AtCapacity { cap: usize },
}

/// What a successful toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// An ordered list of car ids with optional capacity.
///
/// Ids are unique within the list; toggling twice restores the original
/// list, elements and order included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipList {
    ids: Vec<CarId>,
    #[serde(default)]
    cap: Option<usize>,
}

impl MembershipList {
    /// An unbounded list (favorites).
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            ids: Vec::new(),
            cap: None,
        }
    }

    /// A capped list (comparison).
    #[must_use]
    pub const fn capped(cap: usize) -> Self {
        Self {
            ids: Vec::new(),
            cap: Some(cap),
        }
    }

    /// Rebuild a capped list from previously-stored ids.
    ///
    /// Duplicates are dropped and the list is truncated to the cap, so a
    /// list read back from an older session always satisfies the current
    /// invariants.
    #[must_use]
    pub fn capped_from(cap: usize, ids: impl IntoIterator<Item = CarId>) -> Self {
        let mut list = Self::capped(cap);
        for id in ids {
            if list.ids.len() >= cap {
                break;
            }
            if !list.contains(id) {
                list.ids.push(id);
            }
        }
        list
    }

    /// Toggle membership of `id`.
    ///
    /// Removes the id if present; otherwise appends it.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::AtCapacity`] when adding to a full list; the
    /// list is left unchanged.
    pub fn toggle(&mut self, id: CarId) -> Result<ToggleOutcome, ListError> {
        if let Some(pos) = self.ids.iter().position(|&existing| existing == id) {
            self.ids.remove(pos);
            return Ok(ToggleOutcome::Removed);
        }

        if let Some(cap) = self.cap
            && self.ids.len() >= cap
        {
            return Err(ListError::AtCapacity { cap });
        }

        self.ids.push(id);
        Ok(ToggleOutcome::Added)
    }

    /// Whether `id` is in the list.
    #[must_use]
    pub fn contains(&self, id: CarId) -> bool {
        self.ids.contains(&id)
    }

    /// The ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[CarId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_idempotent_over_two_calls() {
        let mut list = MembershipList::unbounded();
        list.toggle(CarId::new(1)).unwrap();
        list.toggle(CarId::new(2)).unwrap();
        let before = list.clone();

        assert_eq!(list.toggle(CarId::new(3)).unwrap(), ToggleOutcome::Added);
        assert_eq!(list.toggle(CarId::new(3)).unwrap(), ToggleOutcome::Removed);

        // Same elements, same order.
        assert_eq!(list, before);
    }

    #[test]
    fn test_cap_rejects_and_leaves_list_unchanged() {
        let mut list = MembershipList::capped(3);
        for id in 1..=3 {
            list.toggle(CarId::new(id)).unwrap();
        }

        let err = list.toggle(CarId::new(4)).unwrap_err();
        assert_eq!(err, ListError::AtCapacity { cap: 3 });
        let ids: Vec<i64> = list.ids().iter().map(|id| id.as_i64()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_toggle_off_a_full_list_still_works() {
        let mut list = MembershipList::capped(2);
        list.toggle(CarId::new(1)).unwrap();
        list.toggle(CarId::new(2)).unwrap();

        assert_eq!(list.toggle(CarId::new(1)).unwrap(), ToggleOutcome::Removed);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_capped_from_sanitizes_stored_ids() {
        let ids = [1, 2, 2, 3, 4, 5].map(CarId::new);
        let list = MembershipList::capped_from(3, ids);

        let kept: Vec<i64> = list.ids().iter().map(|id| id.as_i64()).collect();
        assert_eq!(kept, vec![1, 2, 3]);
    }
}
