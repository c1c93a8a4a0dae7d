//! Cross-process reconciliation over the shared data directory.
//!
//! The admin and showroom binaries each hold their own in-memory inventory
//! and reconcile through `reload_if_changed`: a count difference on disk
//! replaces the in-memory copy wholesale. This is the deliberate,
//! best-effort analogue of the original cross-tab polling.

#![allow(clippy::unwrap_used)]

use scuderia_core::types::CarUpdate;
use scuderia_integration_tests::{open_store, sample_draft};

#[test]
fn test_showroom_picks_up_admin_create_and_delete() {
    let dir = tempfile::tempdir().unwrap();
    let mut admin = open_store(dir.path());
    let mut showroom = open_store(dir.path());

    let created = admin.create(sample_draft("Alfa Romeo", "Giulia", 38_500)).unwrap();

    assert!(showroom.reload_if_changed().unwrap());
    assert_eq!(showroom.len(), 1);
    assert_eq!(showroom.get(created.id).unwrap().brand, "Alfa Romeo");

    admin.delete(created.id).unwrap();

    assert!(showroom.reload_if_changed().unwrap());
    assert!(showroom.is_empty());
}

#[test]
fn test_no_change_no_reload() {
    let dir = tempfile::tempdir().unwrap();
    let mut admin = open_store(dir.path());
    let mut showroom = open_store(dir.path());

    admin.create(sample_draft("Fiat", "Panda", 9_000)).unwrap();
    assert!(showroom.reload_if_changed().unwrap());

    // Stable disk state: the poll is a no-op.
    assert!(!showroom.reload_if_changed().unwrap());
    assert!(!showroom.reload_if_changed().unwrap());
}

#[test]
fn test_same_count_edit_is_not_detected() {
    // The count heuristic cannot see a price edit; this is documented
    // best-effort behavior, not a bug in the poll loop.
    let dir = tempfile::tempdir().unwrap();
    let mut admin = open_store(dir.path());
    let mut showroom = open_store(dir.path());

    let created = admin.create(sample_draft("Fiat", "Panda", 9_000)).unwrap();
    assert!(showroom.reload_if_changed().unwrap());

    admin
        .update(
            created.id,
            CarUpdate {
                price: Some(7_000),
                ..CarUpdate::default()
            },
        )
        .unwrap();

    assert!(!showroom.reload_if_changed().unwrap());
    assert_eq!(showroom.get(created.id).unwrap().price, 9_000);
}

#[test]
fn test_last_writer_wins_on_concurrent_edits() {
    // No lock discipline exists between the two processes: whoever
    // persists last owns the document.
    let dir = tempfile::tempdir().unwrap();
    let mut admin = open_store(dir.path());
    let mut other_admin = open_store(dir.path());

    admin.create(sample_draft("Fiat", "Panda", 9_000)).unwrap();
    other_admin
        .create(sample_draft("Lancia", "Ypsilon", 14_000))
        .unwrap();

    // The second writer never saw the first write, so its array replaced it.
    let fresh = open_store(dir.path());
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh.all().first().unwrap().brand, "Lancia");
}
