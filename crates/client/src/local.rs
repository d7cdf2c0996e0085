//! Guest-tier local persistence.
//!
//! A [`LocalStore`] is a flat string-keyed map of opaque JSON documents.
//! The two fixed keys mirror the storage keys the web storefront uses, so
//! a profile directory written here round-trips with what a browser
//! session would have persisted.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::SyncError;

/// Local storage key for the cart collection.
pub const CART_KEY: &str = "cart";

/// Local storage key for the wishlist collection.
pub const WISHLIST_KEY: &str = "wishlist";

/// Key-value persistence for the Guest tier.
///
/// Values are opaque JSON strings; the store never inspects them. Writes
/// are synchronous with respect to the caller, which is what makes the
/// Guest tier race-free within a single session.
pub trait LocalStore {
    /// Read the value under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, SyncError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn write(&mut self, key: &str, value: &str) -> Result<(), SyncError>;

    /// Remove `key` entirely. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), SyncError>;
}

/// File-per-key store rooted at a profile directory.
///
/// `cart` lives at `<dir>/cart.json`, `wishlist` at `<dir>/wishlist.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, SyncError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl LocalStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, SyncError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SyncError> {
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SyncError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
///
/// Clones share the same underlying map, so a second reconciler built from
/// a clone sees what the first one persisted - the same-profile analogue.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key directly, bypassing the trait. Test convenience.
    pub fn seed(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    /// Snapshot of the keys currently present.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl LocalStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, SyncError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| std::io::Error::other("storage mutex poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SyncError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| std::io::Error::other("storage mutex poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SyncError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| std::io::Error::other("storage mutex poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.read(CART_KEY).unwrap().is_none());
        store.write(CART_KEY, "[]").unwrap();
        assert_eq!(store.read(CART_KEY).unwrap().as_deref(), Some("[]"));
        store.remove(CART_KEY).unwrap();
        assert!(store.read(CART_KEY).unwrap().is_none());
    }

    #[test]
    fn test_memory_store_clones_share_data() {
        let mut store = MemoryStore::new();
        let clone = store.clone();
        store.write(WISHLIST_KEY, "[1]").unwrap();
        assert_eq!(clone.read(WISHLIST_KEY).unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path()).unwrap();

        assert!(store.read(CART_KEY).unwrap().is_none());
        store.write(CART_KEY, r#"[{"productId":1}]"#).unwrap();
        assert_eq!(
            store.read(CART_KEY).unwrap().as_deref(),
            Some(r#"[{"productId":1}]"#)
        );

        // A second store over the same directory sees the same data.
        let reopened = FileStore::new(dir.path()).unwrap();
        assert!(reopened.read(CART_KEY).unwrap().is_some());

        store.remove(CART_KEY).unwrap();
        assert!(store.read(CART_KEY).unwrap().is_none());
        // Removing twice is fine.
        store.remove(CART_KEY).unwrap();
    }
}
