//! Filter model for lists: categories, selected values and saved filters.
//!
//! Types here are shared by the filter engine, the list components and the
//! persisted saved-filter format, so every type is serde-friendly and
//! tolerant of older stored shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Sentinel option value older pages used for "category has nothing to show".
/// Never a real option; stripped whenever a selection enters the engine.
pub const LEGACY_PLACEHOLDER_VALUE: &str = "__no_items__";

/// How selected option values are compared with a record's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Record value equals one of the selected values (case-insensitive)
    #[default]
    Exact,
    /// Record value contains one of the selected values (case-insensitive)
    Contains,
}

/// One selectable value of a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A facet of filtering ("status", "category", "property") with its options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCategory {
    /// Category key, used in selections and field extractors
    pub key: String,
    /// Human-readable label
    pub label: String,
    /// Ordered options, values unique within the category
    pub options: Vec<FilterOption>,
    /// Category has nothing to offer: never constrains, toggles are ignored
    #[serde(default)]
    pub is_empty: bool,
}

impl FilterCategory {
    /// Builds a category from the given options. Duplicate values keep the
    /// first occurrence; an empty option list yields a placeholder category.
    pub fn new(key: impl Into<String>, label: impl Into<String>, options: Vec<FilterOption>) -> Self {
        let mut seen = BTreeSet::new();
        let options: Vec<FilterOption> = options
            .into_iter()
            .filter(|o| o.value != LEGACY_PLACEHOLDER_VALUE && seen.insert(o.value.clone()))
            .collect();
        let is_empty = options.is_empty();

        Self {
            key: key.into(),
            label: label.into(),
            options,
            is_empty,
        }
    }

    /// Category with nothing to show yet
    pub fn placeholder(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, Vec::new())
    }

    /// Options from the distinct non-blank values present in the data,
    /// sorted case-insensitively. Labels equal values.
    ///
    /// Matching ignores case, so values differing only in case collapse
    /// into one option spelled as the first occurrence.
    pub fn from_values<I, S>(key: impl Into<String>, label: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let mut distinct: Vec<String> = values
            .into_iter()
            .map(|v| v.as_ref().trim().to_string())
            .filter(|v| !v.is_empty() && seen.insert(v.to_lowercase()))
            .collect();
        distinct.sort_by_key(|v| v.to_lowercase());

        let options = distinct
            .into_iter()
            .map(|v| FilterOption::new(v.clone(), v))
            .collect();
        Self::new(key, label, options)
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    pub fn option_label(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }
}

/// Selected option values per category.
///
/// An empty list for a category means "no constraint", so equality ignores
/// categories with nothing selected: `{status: []}` equals `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Option<Vec<String>>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct FilterSelection {
    values: BTreeMap<String, Vec<String>>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper: sets the values of one category
    pub fn with<I, S>(mut self, category: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(category, values.into_iter().map(Into::into).collect());
        self
    }

    /// Selected values of a category, in selection order
    pub fn values(&self, category: &str) -> &[String] {
        self.values.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_selected(&self, category: &str, value: &str) -> bool {
        self.values(category).iter().any(|v| v == value)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.values.contains_key(category)
    }

    /// Makes sure the category is present (with an empty list if new)
    pub fn ensure_category(&mut self, category: &str) {
        if !self.values.contains_key(category) {
            self.values.insert(category.to_string(), Vec::new());
        }
    }

    /// Replaces the values of a category. Duplicates and the legacy
    /// placeholder value are dropped, first occurrence wins.
    pub fn set(&mut self, category: impl Into<String>, values: Vec<String>) {
        self.values.insert(category.into(), sanitize(values));
    }

    /// Removes `value` if selected, appends it otherwise. Returns whether the
    /// value is selected afterwards. The legacy placeholder is never selected.
    pub fn toggle(&mut self, category: &str, value: &str) -> bool {
        if value == LEGACY_PLACEHOLDER_VALUE {
            return false;
        }
        let entry = self.values.entry(category.to_string()).or_default();
        if let Some(pos) = entry.iter().position(|v| v == value) {
            entry.remove(pos);
            false
        } else {
            entry.push(value.to_string());
            true
        }
    }

    /// Empties every category, keeping the keys
    pub fn clear_values(&mut self) {
        for values in self.values.values_mut() {
            values.clear();
        }
    }

    pub fn remove_category(&mut self, category: &str) -> Option<Vec<String>> {
        self.values.remove(category)
    }

    /// Keeps only values accepted by `keep`; returns how many were dropped
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&str, &str) -> bool,
    {
        let mut dropped = 0;
        for (category, values) in self.values.iter_mut() {
            let before = values.len();
            values.retain(|v| keep(category, v));
            dropped += before - values.len();
        }
        dropped
    }

    /// Category keys present in the selection (including empty ones)
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Categories with at least one selected value
    pub fn active(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.values
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of selected values across all categories
    pub fn active_count(&self) -> usize {
        self.values.values().map(Vec::len).sum()
    }

    /// True when no category constrains anything
    pub fn is_unconstrained(&self) -> bool {
        self.active_count() == 0
    }
}

impl PartialEq for FilterSelection {
    fn eq(&self, other: &Self) -> bool {
        self.active().eq(other.active())
    }
}

impl Eq for FilterSelection {}

impl From<BTreeMap<String, Option<Vec<String>>>> for FilterSelection {
    fn from(raw: BTreeMap<String, Option<Vec<String>>>) -> Self {
        let mut selection = FilterSelection::new();
        for (category, values) in raw {
            selection.set(category, values.unwrap_or_default());
        }
        selection
    }
}

impl From<FilterSelection> for BTreeMap<String, Vec<String>> {
    fn from(selection: FilterSelection) -> Self {
        selection.values
    }
}

fn sanitize(values: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .into_iter()
        .filter(|v| v != LEGACY_PLACEHOLDER_VALUE && seen.insert(v.clone()))
        .collect()
}

/// Named snapshot of a selection, as persisted per page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedFilter {
    pub name: String,
    #[serde(default)]
    pub filters: FilterSelection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SavedFilter {
    pub fn new(name: impl Into<String>, filters: FilterSelection) -> Self {
        Self {
            name: name.into(),
            filters,
            created_at: Some(Utc::now()),
        }
    }
}
