//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use scuderia_core::{CarStore, JsonStore, StorageError};

use crate::config::AdminConfig;
use crate::services::auth::{AuthSession, DirectoryProvider, IdentityProvider};

/// Errors building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("invalid identity directory: {0}")]
    Directory(String),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    storage: JsonStore,
    cars: RwLock<CarStore>,
    auth: Arc<AuthSession>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Opens the shared data directory, hydrates the inventory, and builds
    /// the identity provider glue from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be opened, a persisted
    /// document fails to parse, or the identity directory spec is
    /// malformed.
    pub fn new(config: AdminConfig) -> Result<Self, StateError> {
        use secrecy::ExposeSecret;

        let storage = JsonStore::open(&config.data_dir)?;
        let cars = CarStore::open(storage.clone())?;

        let provider = DirectoryProvider::from_spec(
            config.auth.users.expose_secret(),
            config.auth.allowed_domain.clone(),
            config.auth.interactive,
        )
        .map_err(StateError::Directory)?;
        let provider: Arc<dyn IdentityProvider> = Arc::new(provider);
        let auth = Arc::new(AuthSession::new(provider, storage.clone())?);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                storage,
                cars: RwLock::new(cars),
                auth,
            }),
        })
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
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

    /// Get a reference to the auth session glue.
    #[must_use]
    pub fn auth(&self) -> &Arc<AuthSession> {
        &self.inner.auth
    }
}
