//! Durable key/value storage for client state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session record is the only state the client persists across reloads.
//! Browser builds back it with `localStorage`; native builds and tests use an
//! in-memory map with the same semantics.
//!
//! TRADE-OFFS
//! ==========
//! Reads and writes are not transactional. Two tabs sharing one
//! `localStorage` can race on read-then-write; the last writer wins.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Errors raised when a value cannot be written to storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No storage backend is reachable (e.g. `localStorage` disabled).
    #[error("storage unavailable")]
    Unavailable,
    /// The backend refused the write (quota, privacy mode, ...).
    #[error("storage write rejected: {0}")]
    Rejected(String),
    /// The value could not be serialized.
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Minimal string key/value store modeled on the Web Storage API.
pub trait KeyValueStorage: Send + Sync {
    /// Read the raw value stored under `key`.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable or rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is a no-op.
    fn remove_item(&self, key: &str);
}

/// Load and decode a JSON value stored under `key`.
///
/// Returns `Ok(None)` when nothing is stored.
///
/// # Errors
///
/// Returns the decode error when a value exists but is not valid JSON for `T`.
pub fn load_json<T: DeserializeOwned>(
    storage: &dyn KeyValueStorage,
    key: &str,
) -> Result<Option<T>, serde_json::Error> {
    storage
        .get_item(key)
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns an error if encoding fails or the backend rejects the write.
pub fn save_json<T: Serialize>(storage: &dyn KeyValueStorage, key: &str, value: &T) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    storage.set_item(key, &raw)
}

/// In-memory storage. Clones share the same map, which lets tests model
/// several tabs looking at one `localStorage`.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// `window.localStorage`, looked up on every call so the type stays
/// `Send + Sync`.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

#[cfg(feature = "csr")]
impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Rejected(format!("{e:?}")))
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Storage used by the running application.
#[cfg(feature = "csr")]
pub type PlatformStorage = BrowserStorage;

/// Storage used by the running application.
#[cfg(not(feature = "csr"))]
pub type PlatformStorage = MemoryStorage;
