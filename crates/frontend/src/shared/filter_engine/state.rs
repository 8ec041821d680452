//! Current filter state of a list: search text and selected values.

use contracts::shared::filters::{FilterCategory, FilterSelection};
use std::sync::Arc;

/// Read-only copy of the store state handed to consumers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSnapshot {
    pub search: String,
    pub selection: FilterSelection,
}

impl FilterSnapshot {
    /// Search as used for matching: trimmed, lower-cased
    pub fn normalized_search(&self) -> String {
        self.search.trim().to_lowercase()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.search.trim().is_empty() && self.selection.is_unconstrained()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&FilterSnapshot) + Send + Sync>;

/// Holds search text and per-category selections for one list page.
///
/// Every effective mutation notifies subscribers synchronously with a fresh
/// snapshot. Mutations inside [`FilterStateStore::batch`] notify once.
pub struct FilterStateStore {
    search: String,
    selection: FilterSelection,
    categories: Vec<FilterCategory>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    batch_depth: usize,
    dirty: bool,
}

impl FilterStateStore {
    pub fn new(categories: Vec<FilterCategory>) -> Self {
        let mut store = Self {
            search: String::new(),
            selection: FilterSelection::new(),
            categories: Vec::new(),
            listeners: Vec::new(),
            next_subscription: 0,
            batch_depth: 0,
            dirty: false,
        };
        store.apply_categories(categories);
        store
    }

    pub fn categories(&self) -> &[FilterCategory] {
        &self.categories
    }

    pub fn category(&self, key: &str) -> Option<&FilterCategory> {
        self.categories.iter().find(|c| c.key == key)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Stores the query verbatim; trimming and casing happen at match time
    pub fn set_search(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if query == self.search {
            return false;
        }
        self.search = query;
        self.changed();
        true
    }

    /// Adds the value to the category selection, or removes it if present.
    /// Unknown and placeholder categories are ignored, as are values that
    /// are not options of the category.
    pub fn toggle_option(&mut self, category: &str, value: &str) -> bool {
        match self.category(category) {
            None => {
                log::warn!("Ignoring toggle of '{}' on unknown filter category '{}'", value, category);
                return false;
            }
            Some(c) if c.is_empty => {
                log::warn!("Ignoring toggle of '{}' on empty filter category '{}'", value, category);
                return false;
            }
            Some(c) if !c.has_option(value) => {
                log::warn!("Ignoring toggle of unknown option '{}' in filter category '{}'", value, category);
                return false;
            }
            Some(_) => {}
        }
        self.selection.toggle(category, value);
        self.changed();
        true
    }

    /// Empties the search and every category; category keys stay in place
    pub fn clear_all(&mut self) -> bool {
        if self.search.is_empty() && self.selection.is_unconstrained() {
            return false;
        }
        self.search.clear();
        self.selection.clear_values();
        self.changed();
        true
    }

    /// Full replace: categories missing from `selection` become empty.
    /// Values that are not options of a known, non-empty category are dropped.
    pub fn replace_selection(&mut self, selection: FilterSelection) -> bool {
        let mut next = FilterSelection::new();
        for category in &self.categories {
            next.ensure_category(&category.key);
            if category.is_empty {
                continue;
            }
            let values: Vec<String> = selection
                .values(&category.key)
                .iter()
                .filter(|v| category.has_option(v))
                .cloned()
                .collect();
            next.set(category.key.clone(), values);
        }

        let unknown = selection
            .active()
            .filter(|(key, _)| self.category(key).is_none())
            .count();
        if unknown > 0 {
            log::debug!("Dropped {} unknown categories from replaced selection", unknown);
        }

        if next == self.selection {
            self.selection = next;
            return false;
        }
        self.selection = next;
        self.changed();
        true
    }

    /// Swaps in new option lists. Selections of surviving categories are
    /// kept minus values whose option disappeared; vanished categories are
    /// removed, new ones start empty.
    pub fn set_categories(&mut self, categories: Vec<FilterCategory>) -> bool {
        let before = self.selection.clone();
        self.apply_categories(categories);
        if before == self.selection {
            return false;
        }
        self.changed();
        true
    }

    fn apply_categories(&mut self, categories: Vec<FilterCategory>) {
        let stale: Vec<String> = self
            .selection
            .categories()
            .filter(|key| !categories.iter().any(|c| c.key == *key))
            .map(str::to_string)
            .collect();
        for key in stale {
            self.selection.remove_category(&key);
        }

        for category in &categories {
            self.selection.ensure_category(&category.key);
        }

        let dropped = self.selection.retain(|key, value| {
            categories
                .iter()
                .find(|c| c.key == key)
                .map(|c| !c.is_empty && c.has_option(value))
                .unwrap_or(false)
        });
        if dropped > 0 {
            log::debug!("Dropped {} selected values missing from new options", dropped);
        }

        self.categories = categories;
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> FilterSnapshot {
        FilterSnapshot {
            search: self.search.clone(),
            selection: self.selection.clone(),
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&FilterSnapshot) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        before != self.listeners.len()
    }

    /// Runs several mutations as one: subscribers see only the final state.
    /// Returns whether anything changed.
    pub fn batch<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut Self),
    {
        let was_dirty = self.dirty;
        self.dirty = false;
        self.batch_depth += 1;
        f(self);
        self.batch_depth -= 1;

        let changed = self.dirty;
        self.dirty = was_dirty || changed;
        if self.batch_depth == 0 && self.dirty {
            self.dirty = false;
            self.notify();
        }
        changed
    }

    fn changed(&mut self) {
        if self.batch_depth > 0 {
            self.dirty = true;
        } else {
            self.notify();
        }
    }

    fn notify(&self) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for (_, listener) in &self.listeners {
            listener(&snapshot);
        }
    }
}

impl std::fmt::Debug for FilterStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterStateStore")
            .field("search", &self.search)
            .field("selection", &self.selection)
            .field("categories", &self.categories)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
