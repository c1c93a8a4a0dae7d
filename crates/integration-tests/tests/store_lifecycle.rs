//! Inventory lifecycle: every mutation survives a store reopen.

#![allow(clippy::unwrap_used)]

use scuderia_core::types::{CarStatus, CarUpdate};
use scuderia_core::{JsonStore, StoreError, keys};
use scuderia_integration_tests::{open_store, sample_draft};

#[test]
fn test_crud_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let created = {
        let mut store = open_store(dir.path());
        let created = store.create(sample_draft("BMW", "320d", 27_500)).unwrap();
        store.create(sample_draft("Audi", "A4", 31_000)).unwrap();
        store
            .update(
                created.id,
                CarUpdate {
                    price: Some(26_000),
                    ..CarUpdate::default()
                },
            )
            .unwrap()
    };

    // A fresh process sees exactly what the first one committed.
    let mut store = open_store(dir.path());
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(created.id).unwrap().price, 26_000);

    store.delete(created.id).unwrap();

    let reopened = open_store(dir.path());
    assert_eq!(reopened.len(), 1);
    assert!(reopened.get(created.id).is_none());
}

#[test]
fn test_persisted_array_round_trips_deep_equal() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(dir.path());
    store.create(sample_draft("Fiat", "Tipo", 18_000)).unwrap();
    store.create(sample_draft("Fiat", "Tipo", 17_500)).unwrap();

    // Reading the raw document back through the adapter yields the exact
    // array the store holds.
    let adapter = JsonStore::open(dir.path()).unwrap();
    let persisted: Vec<scuderia_core::types::CarRecord> =
        adapter.load(keys::CARS).unwrap().unwrap();

    assert_eq!(persisted, store.all());
}

#[test]
fn test_colliding_titles_stay_unique_across_restarts() {
    let dir = tempfile::tempdir().unwrap();

    let first = {
        let mut store = open_store(dir.path());
        store.create(sample_draft("Fiat", "Panda", 9_000)).unwrap()
    };

    // Same title created by a later process still gets a fresh slug.
    let mut store = open_store(dir.path());
    let second = store.create(sample_draft("Fiat", "Panda", 8_500)).unwrap();

    assert_eq!(first.slug, "fiat-panda");
    assert_eq!(second.slug, "fiat-panda-2");
    assert_ne!(first.id, second.id);
}

#[test]
fn test_not_found_signals_do_not_disturb_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(dir.path());
    store.create(sample_draft("Fiat", "Panda", 9_000)).unwrap();
    let before = store.all().to_vec();

    let missing = scuderia_core::types::CarId::new(404);
    assert!(matches!(
        store.update(missing, CarUpdate::default()),
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        store.delete(missing),
        Err(StoreError::NotFound(_))
    ));

    assert_eq!(store.all(), before.as_slice());
    assert_eq!(open_store(dir.path()).all(), before.as_slice());
}

#[test]
fn test_archived_record_stays_in_store_but_not_in_default_view() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(dir.path());
    let car = store.create(sample_draft("Fiat", "Panda", 9_000)).unwrap();

    store
        .update(
            car.id,
            CarUpdate {
                status: Some(CarStatus::Archived),
                ..CarUpdate::default()
            },
        )
        .unwrap();

    let reopened = open_store(dir.path());
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.visible().count(), 0);
}
