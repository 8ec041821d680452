//! Storage backends for saved filters.
//!
//! `LocalStorage` is what pages use in the browser; `MemoryStorage` keeps the
//! same contract in memory for tests and for pages that should not persist.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage is not available")]
    Unavailable,

    #[error("Failed to write to storage: {0}")]
    Write(String),

    #[error("Failed to serialize saved filters: {0}")]
    Serialize(String),
}

/// Keyed string storage
pub trait FilterStorage: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Browser `localStorage`. The handle is looked up on every call, the
/// struct itself holds nothing browser-bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

fn get_local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

impl FilterStorage for LocalStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|_| StorageError::Unavailable)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .remove_item(key)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

/// In-memory storage, cheap to clone; clones share the same entries
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut entries) = storage.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        storage
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}

impl FilterStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Unavailable)?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Unavailable)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Unavailable)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.save("k", "v").unwrap();
        assert_eq!(other.load("k").unwrap(), Some("v".to_string()));
        other.remove("k").unwrap();
        assert_eq!(storage.get("k"), None);
    }
}
