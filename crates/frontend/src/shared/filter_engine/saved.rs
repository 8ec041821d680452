//! Named filter sets saved per page.

use super::storage::{FilterStorage, StorageError};
use contracts::shared::filters::{FilterSelection, SavedFilter};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SaveFilterError {
    #[error("Filter name is required")]
    EmptyName,

    #[error("A filter named \"{0}\" already exists")]
    DuplicateName(String),
}

/// Named filter snapshots of one page, in creation order.
///
/// The in-memory list is authoritative for the session; every change is
/// written through to storage under `storage_key`, write failures are
/// logged and do not undo the change.
pub struct SavedFilterStore {
    storage_key: String,
    storage: Arc<dyn FilterStorage>,
    filters: Vec<SavedFilter>,
}

impl SavedFilterStore {
    /// Opens the store and reads previously saved filters. Unreadable data
    /// is logged and treated as "nothing saved".
    pub fn open(storage_key: impl Into<String>, storage: Arc<dyn FilterStorage>) -> Self {
        let storage_key = storage_key.into();
        let filters = match storage.load(&storage_key) {
            Ok(Some(json)) => parse_saved(&storage_key, &json),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Saved filters '{}' not loaded: {}", storage_key, e);
                Vec::new()
            }
        };

        Self {
            storage_key,
            storage,
            filters,
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Saves `selection` under the trimmed `name`. Names are unique ignoring
    /// case; an existing name is rejected, not overwritten.
    pub fn save(&mut self, name: &str, selection: FilterSelection) -> Result<&SavedFilter, SaveFilterError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SaveFilterError::EmptyName);
        }
        if self.find(name).is_some() {
            return Err(SaveFilterError::DuplicateName(name.to_string()));
        }

        self.filters.push(SavedFilter::new(name, selection));
        self.persist();
        let index = self.filters.len() - 1;
        Ok(&self.filters[index])
    }

    pub fn list(&self) -> &[SavedFilter] {
        &self.filters
    }

    pub fn names(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.name.clone()).collect()
    }

    pub fn find(&self, name: &str) -> Option<&SavedFilter> {
        let name = name.trim().to_lowercase();
        self.filters.iter().find(|f| f.name.to_lowercase() == name)
    }

    /// Selection to hand to `FilterStateStore::replace_selection`
    pub fn apply(saved: &SavedFilter) -> FilterSelection {
        saved.filters.clone()
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        let before = self.filters.len();
        self.filters.retain(|f| f.name.to_lowercase() != name);
        if self.filters.len() == before {
            return false;
        }
        self.persist();
        true
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    fn persist(&self) {
        if let Err(e) = self.write() {
            log::warn!("Saved filters '{}' not persisted: {}", self.storage_key, e);
        }
    }

    fn write(&self) -> Result<(), StorageError> {
        if self.filters.is_empty() {
            return self.storage.remove(&self.storage_key);
        }
        let json = serde_json::to_string(&self.filters)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.storage.save(&self.storage_key, &json)
    }
}

/// Reads the stored list, skipping entries that cannot be read or have a
/// blank or repeated name
fn parse_saved(storage_key: &str, json: &str) -> Vec<SavedFilter> {
    let raw: Vec<serde_json::Value> = match serde_json::from_str(json) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("Saved filters '{}' are unreadable: {}", storage_key, e);
            return Vec::new();
        }
    };

    let mut filters: Vec<SavedFilter> = Vec::with_capacity(raw.len());
    for value in raw {
        match serde_json::from_value::<SavedFilter>(value) {
            Ok(mut saved) => {
                saved.name = saved.name.trim().to_string();
                let duplicate = filters
                    .iter()
                    .any(|f| f.name.to_lowercase() == saved.name.to_lowercase());
                if saved.name.is_empty() || duplicate {
                    log::warn!("Skipping saved filter '{}' in '{}'", saved.name, storage_key);
                    continue;
                }
                filters.push(saved);
            }
            Err(e) => log::warn!("Skipping saved filter in '{}': {}", storage_key, e),
        }
    }
    filters
}

impl std::fmt::Debug for SavedFilterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SavedFilterStore")
            .field("storage_key", &self.storage_key)
            .field("filters", &self.filters)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::filter_engine::storage::MemoryStorage;

    const KEY: &str = "saved_filters:equipment";

    fn open(storage: &MemoryStorage) -> SavedFilterStore {
        SavedFilterStore::open(KEY, Arc::new(storage.clone()))
    }

    #[test]
    fn test_save_rejects_blank_name() {
        let mut store = open(&MemoryStorage::new());
        assert_eq!(
            store.save("   ", FilterSelection::new()).unwrap_err(),
            SaveFilterError::EmptyName
        );
        assert_eq!(SaveFilterError::EmptyName.to_string(), "Filter name is required");
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_rejects_duplicate_name() {
        let mut store = open(&MemoryStorage::new());
        store.save("My View", FilterSelection::new()).unwrap();
        let err = store
            .save(" my view ", FilterSelection::new().with("status", ["active"]))
            .unwrap_err();
        assert_eq!(err, SaveFilterError::DuplicateName("my view".to_string()));
        assert_eq!(store.list().len(), 1);
        assert!(store.list()[0].filters.is_unconstrained());
    }

    #[test]
    fn test_round_trip() {
        let mut store = open(&MemoryStorage::new());
        let selections = [
            FilterSelection::new(),
            FilterSelection::new()
                .with("status", Vec::<String>::new())
                .with("category", Vec::<String>::new()),
            FilterSelection::new()
                .with("status", ["active", "inactive"])
                .with("category", ["HVAC"]),
        ];
        for (i, selection) in selections.iter().enumerate() {
            let saved = store.save(&format!("View {}", i), selection.clone()).unwrap();
            assert_eq!(&SavedFilterStore::apply(saved), selection);
        }
    }

    #[test]
    fn test_list_keeps_creation_order_and_trims_names() {
        let mut store = open(&MemoryStorage::new());
        store.save(" Zeta ", FilterSelection::new()).unwrap();
        store.save("Alpha", FilterSelection::new()).unwrap();
        assert_eq!(store.names(), ["Zeta", "Alpha"]);
    }

    #[test]
    fn test_persists_and_reloads() {
        let storage = MemoryStorage::new();
        let mut store = open(&storage);
        store
            .save("Active HVAC", FilterSelection::new().with("status", ["active"]).with("category", ["HVAC"]))
            .unwrap();

        let reopened = open(&storage);
        assert_eq!(reopened.list(), store.list());
    }

    #[test]
    fn test_remove() {
        let storage = MemoryStorage::new();
        let mut store = open(&storage);
        store.save("One", FilterSelection::new()).unwrap();
        store.save("Two", FilterSelection::new()).unwrap();

        assert!(store.remove("one"));
        assert!(!store.remove("one"));
        assert_eq!(store.names(), ["Two"]);
        assert_eq!(open(&storage).names(), ["Two"]);

        store.remove("Two");
        assert_eq!(storage.get(KEY), None);
    }

    #[test]
    fn test_reads_older_entries_permissively() {
        let json = r#"[
            {"name": "Legacy", "filters": {"status": ["active", "__no_items__"], "property": null}},
            {"name": "No filters"},
            {"name": "  "},
            {"filters": {}},
            {"name": "legacy", "filters": {}}
        ]"#;
        let store = open(&MemoryStorage::with_entry(KEY, json));

        assert_eq!(store.names(), ["Legacy", "No filters"]);
        let legacy = store.find("LEGACY").unwrap();
        assert_eq!(legacy.filters.values("status"), ["active"]);
        assert!(legacy.filters.values("property").is_empty());
    }

    #[test]
    fn test_corrupt_storage_starts_empty() {
        let store = open(&MemoryStorage::with_entry(KEY, "{not json"));
        assert!(store.is_empty());
    }
}
