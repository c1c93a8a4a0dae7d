//! JSON key-value persistence adapter.
//!
//! One JSON document per fixed key, stored as `<key>.json` under a data
//! directory shared by the showroom and admin processes. The adapter is a
//! pure load/save boundary: it does not validate documents.
//!
//! Every save is a full-document replace through a temporary file and an
//! atomic rename, so a failure during serialization or writing never leaves
//! a half-written document behind.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// The fixed storage keys used across the platform.
pub mod keys {
    /// The car inventory array.
    pub const CARS: &str = "cars";
    /// The shopping cart.
    pub const CART: &str = "cart";
    /// The favorites id list.
    pub const FAVORITES: &str = "favorites";
    /// The mirrored identity-provider session.
    pub const IDENTITY: &str = "identity";
}

/// Errors from the persistence adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// File-backed JSON key-value store.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The directory backing this store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the document stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let path = self.path_for(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Replace the document stored under `key`.
    ///
    /// Serializes fully before touching the filesystem, then writes to a
    /// temporary sibling and renames it into place.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails; on failure the
    /// previously stored document is intact.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(value)?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, &path)?;

        debug!(key, bytes = bytes.len(), "saved document");
        Ok(())
    }

    /// Delete the document stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error for I/O failures other than the key being absent.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}
