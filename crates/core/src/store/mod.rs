//! The in-memory inventory store.
//!
//! [`CarStore`] holds the canonical `Vec<CarRecord>` for one process and
//! write-throughs every mutation to the [`JsonStore`] as a full-array
//! replace. Mutations persist the candidate array *before* committing it to
//! memory, so a failed write leaves both memory and disk on the prior
//! state.

use thiserror::Error;
use tracing::{debug, info};

use crate::storage::{JsonStore, StorageError, keys};
use crate::types::{CarDraft, CarId, CarRecord, CarUpdate, ValidationErrors, unique_slug};

/// Errors from inventory operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with the given id.
    #[error("car {0} not found")]
    NotFound(CarId),

    /// Draft failed required-field validation.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    /// The persistence adapter failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The inventory store: in-memory array plus persistence adapter.
#[derive(Debug)]
pub struct CarStore {
    cars: Vec<CarRecord>,
    storage: JsonStore,
}

impl CarStore {
    /// Hydrate a store from the `cars` key; empty if never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted document exists but cannot be
    /// read or parsed.
    pub fn open(storage: JsonStore) -> Result<Self, StorageError> {
        let cars: Vec<CarRecord> = storage.load(keys::CARS)?.unwrap_or_default();
        debug!(count = cars.len(), "inventory hydrated");
        Ok(Self { cars, storage })
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// Every record, all statuses (admin view).
    #[must_use]
    pub fn all(&self) -> &[CarRecord] {
        &self.cars
    }

    /// Customer-facing records (active only), in source order.
    pub fn visible(&self) -> impl Iterator<Item = &CarRecord> {
        self.cars.iter().filter(|car| car.is_visible())
    }

    #[must_use]
    pub fn get(&self, id: CarId) -> Option<&CarRecord> {
        self.cars.iter().find(|car| car.id == id)
    }

    #[must_use]
    pub fn get_by_slug(&self, slug: &str) -> Option<&CarRecord> {
        self.cars.iter().find(|car| car.slug == slug)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create a record from a validated draft.
    ///
    /// Assigns a fresh unique id and a collision-free slug, appends, and
    /// persists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] with per-field errors if the draft
    /// fails validation, or [`StoreError::Storage`] if persisting fails (in
    /// which case nothing was committed).
    pub fn create(&mut self, draft: CarDraft) -> Result<CarRecord, StoreError> {
        draft.validate()?;

        let id = self.next_id();
        let slug = unique_slug(
            &format!("{} {}", draft.brand, draft.model),
            self.cars.iter().map(|car| car.slug.as_str()),
        );
        let record = draft.into_record(id, slug);

        let mut next = self.cars.clone();
        next.push(record.clone());
        self.commit(next)?;

        info!(%id, slug = %record.slug, "car created");
        Ok(record)
    }

    /// Shallow-merge `update` over the record with `id` and persist.
    ///
    /// Fields absent from the update are preserved; `id` and `slug` never
    /// change.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has that id; the store
    /// is left unchanged.
    pub fn update(&mut self, id: CarId, update: CarUpdate) -> Result<CarRecord, StoreError> {
        let mut next = self.cars.clone();
        let record = next
            .iter_mut()
            .find(|car| car.id == id)
            .ok_or(StoreError::NotFound(id))?;

        update.apply(record);
        let updated = record.clone();
        self.commit(next)?;

        info!(%id, "car updated");
        Ok(updated)
    }

    /// Delete the record with `id` and persist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the id is absent, so callers can
    /// signal it, and the store is left unchanged.
    pub fn delete(&mut self, id: CarId) -> Result<(), StoreError> {
        if self.get(id).is_none() {
            return Err(StoreError::NotFound(id));
        }

        let mut next = self.cars.clone();
        next.retain(|car| car.id != id);
        self.commit(next)?;

        info!(%id, "car deleted");
        Ok(())
    }

    /// Append a batch of admitted import rows with a single persist.
    ///
    /// Each row gets a fresh id and a collision-free slug, including
    /// against earlier rows of the same batch.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if persisting fails; nothing is
    /// committed.
    pub fn insert_imported(&mut self, drafts: Vec<CarDraft>) -> Result<usize, StoreError> {
        let mut next = self.cars.clone();
        let mut next_id = self.next_id().as_i64();

        for draft in drafts {
            let slug = unique_slug(
                &format!("{} {}", draft.brand, draft.model),
                next.iter().map(|car| car.slug.as_str()),
            );
            next.push(draft.into_record(CarId::new(next_id), slug));
            next_id += 1;
        }

        let added = next.len() - self.cars.len();
        self.commit(next)?;

        info!(added, "import batch committed");
        Ok(added)
    }

    /// Replace the whole inventory (seeding) and persist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if persisting fails.
    pub fn replace_all(&mut self, records: Vec<CarRecord>) -> Result<(), StoreError> {
        self.commit(records)?;
        info!(count = self.cars.len(), "inventory replaced");
        Ok(())
    }

    // =========================================================================
    // Reconciliation
    // =========================================================================

    /// Re-read the persisted inventory and reconcile out-of-band writes.
    ///
    /// If the persisted record count differs from memory, the in-memory
    /// copy is replaced wholesale and `true` is returned. This is a coarse,
    /// best-effort check: edits that keep the count unchanged are not
    /// detected.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted document cannot be read.
    pub fn reload_if_changed(&mut self) -> Result<bool, StorageError> {
        let persisted: Vec<CarRecord> = self.storage.load(keys::CARS)?.unwrap_or_default();

        if persisted.len() == self.cars.len() {
            return Ok(false);
        }

        info!(
            from = self.cars.len(),
            to = persisted.len(),
            "inventory count changed on disk, reloading"
        );
        self.cars = persisted;
        Ok(true)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Persist `next` and only then make it the in-memory state.
    fn commit(&mut self, next: Vec<CarRecord>) -> Result<(), StorageError> {
        self.storage.save(keys::CARS, &next)?;
        self.cars = next;
        Ok(())
    }

    fn next_id(&self) -> CarId {
        let max = self.cars.iter().map(|car| car.id.as_i64()).max().unwrap_or(0);
        CarId::new(max + 1)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{BodyStyle, CarStatus, FuelType, Transmission};

    fn draft(brand: &str, model: &str, price: u32) -> CarDraft {
        CarDraft {
            brand: brand.to_string(),
            model: model.to_string(),
            year: 2022,
            price,
            mileage_km: 0,
            fuel: FuelType::Petrol,
            transmission: Transmission::Manual,
            power_cv: 100,
            color: "blue".to_string(),
            body: BodyStyle::Citycar,
            doors: 5,
            seats: 5,
            images: Vec::new(),
            status: CarStatus::Active,
            featured: false,
            description: String::new(),
        }
    }

    fn open_store(dir: &std::path::Path) -> CarStore {
        CarStore::open(JsonStore::open(dir).unwrap()).unwrap()
    }

    #[test]
    fn test_create_assigns_fresh_ids_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(dir.path());

        let a = store.create(draft("Fiat", "Panda", 9_000)).unwrap();
        let b = store.create(draft("Fiat", "500", 12_000)).unwrap();
        assert_eq!(a.id, CarId::new(1));
        assert_eq!(b.id, CarId::new(2));

        // Survives a reopen.
        let reopened = open_store(dir.path());
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.all(), store.all());
    }

    #[test]
    fn test_create_rejects_invalid_draft() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(dir.path());

        let err = store.create(draft("", "Panda", 0)).unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_colliding_titles_get_suffixed_slugs() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(dir.path());

        let a = store.create(draft("Fiat", "Panda", 9_000)).unwrap();
        let b = store.create(draft("Fiat", "Panda", 8_000)).unwrap();

        assert_eq!(a.slug, "fiat-panda");
        assert_eq!(b.slug, "fiat-panda-2");
    }

    #[test]
    fn test_update_missing_id_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(dir.path());
        store.create(draft("Fiat", "Panda", 9_000)).unwrap();
        let before = store.all().to_vec();

        let err = store
            .update(
                CarId::new(99),
                CarUpdate {
                    price: Some(1_000),
                    ..CarUpdate::default()
                },
            )
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound(id) if id == CarId::new(99)));
        assert_eq!(store.all(), before.as_slice());
    }

    #[test]
    fn test_update_merges_and_preserves() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(dir.path());
        let created = store.create(draft("Fiat", "Panda", 9_000)).unwrap();

        let updated = store
            .update(
                created.id,
                CarUpdate {
                    price: Some(8_500),
                    status: Some(CarStatus::Archived),
                    ..CarUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(updated.price, 8_500);
        assert_eq!(updated.status, CarStatus::Archived);
        assert_eq!(updated.brand, "Fiat");
        assert_eq!(updated.slug, created.slug);
    }

    #[test]
    fn test_delete_signals_absence() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(dir.path());
        let created = store.create(draft("Fiat", "Panda", 9_000)).unwrap();

        store.delete(created.id).unwrap();
        assert!(store.is_empty());

        let err = store.delete(created.id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_archived_cars_hidden_from_visible() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(dir.path());
        let kept = store.create(draft("Fiat", "Panda", 9_000)).unwrap();
        let sold = store.create(draft("Fiat", "500", 12_000)).unwrap();
        store
            .update(
                sold.id,
                CarUpdate {
                    status: Some(CarStatus::Archived),
                    ..CarUpdate::default()
                },
            )
            .unwrap();

        let visible: Vec<CarId> = store.visible().map(|car| car.id).collect();
        assert_eq!(visible, vec![kept.id]);
        // Still present for admin.
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_reload_detects_count_change() {
        let dir = tempfile::tempdir().unwrap();
        let mut customer_tab = open_store(dir.path());
        let mut admin_tab = open_store(dir.path());

        admin_tab.create(draft("Fiat", "Panda", 9_000)).unwrap();

        assert!(customer_tab.reload_if_changed().unwrap());
        assert_eq!(customer_tab.len(), 1);
        // Nothing new: no reload.
        assert!(!customer_tab.reload_if_changed().unwrap());
    }

    #[test]
    fn test_reload_misses_same_count_edit() {
        // Documented limitation of the coarse count-based reconciliation.
        let dir = tempfile::tempdir().unwrap();
        let mut customer_tab = open_store(dir.path());
        let mut admin_tab = open_store(dir.path());

        let created = admin_tab.create(draft("Fiat", "Panda", 9_000)).unwrap();
        assert!(customer_tab.reload_if_changed().unwrap());

        admin_tab
            .update(
                created.id,
                CarUpdate {
                    price: Some(1),
                    ..CarUpdate::default()
                },
            )
            .unwrap();

        assert!(!customer_tab.reload_if_changed().unwrap());
        assert_eq!(customer_tab.get(created.id).unwrap().price, 9_000);
    }
}
