//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use scuderia_core::{Cart, CarStore, JsonStore, MembershipList, StorageError, keys};

use crate::config::ShowroomConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds the hydrated inventory store plus the
/// durable cart and favorites lists; every mutation writes through to the
/// JSON store immediately.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ShowroomConfig,
    storage: JsonStore,
    cars: RwLock<CarStore>,
    cart: RwLock<Cart>,
    favorites: RwLock<MembershipList>,
}

impl AppState {
    /// Create a new application state, hydrating from the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be opened or a
    /// persisted document fails to parse.
    pub fn new(config: ShowroomConfig) -> Result<Self, StorageError> {
        let storage = JsonStore::open(&config.data_dir)?;
        let cars = CarStore::open(storage.clone())?;
        let cart: Cart = storage.load(keys::CART)?.unwrap_or_default();
        let favorites: MembershipList = storage
            .load(keys::FAVORITES)?
            .unwrap_or_else(MembershipList::unbounded);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                storage,
                cars: RwLock::new(cars),
                cart: RwLock::new(cart),
                favorites: RwLock::new(favorites),
            }),
        })
    }

    /// Get a reference to the showroom configuration.
    #[must_use]
    pub fn config(&self) -> &ShowroomConfig {
        &self.inner.config
    }

    /// Get a reference to the JSON persistence adapter.
    #[must_use]
    pub fn storage(&self) -> &JsonStore {
        &self.inner.storage
    }

    /// Get a reference to the inventory store.
    #[must_use]
    pub fn cars(&self) -> &RwLock<CarStore> {
        &self.inner.cars
    }

    /// Get a reference to the cart.
    #[must_use]
    pub fn cart(&self) -> &RwLock<Cart> {
        &self.inner.cart
    }

    /// Get a reference to the favorites list.
    #[must_use]
    pub fn favorites(&self) -> &RwLock<MembershipList> {
        &self.inner.favorites
    }
}
