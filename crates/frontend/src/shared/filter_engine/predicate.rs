//! Decides whether a record passes the current filters.
//!
//! Search is OR across the searchable fields, categories are AND across
//! categories and OR within one. A category with nothing selected never
//! constrains. Missing field values never match.

use super::state::FilterSnapshot;
use contracts::shared::filters::{FilterSelection, MatchMode};
use std::collections::HashMap;
use std::sync::Arc;

type TextField<T> = Arc<dyn Fn(&T) -> Option<String> + Send + Sync>;
type FacetField<T> = Arc<dyn Fn(&T) -> Vec<String> + Send + Sync>;

struct Facet<T> {
    mode: MatchMode,
    extract: FacetField<T>,
}

/// Per-page mapping from search/category keys to record values
pub struct FieldExtractors<T> {
    search: Vec<TextField<T>>,
    facets: HashMap<String, Facet<T>>,
}

impl<T> Default for FieldExtractors<T> {
    fn default() -> Self {
        Self {
            search: Vec::new(),
            facets: HashMap::new(),
        }
    }
}

impl<T: 'static> FieldExtractors<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field taking part in free-text search
    pub fn search<F>(mut self, field: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        self.search.push(Arc::new(field));
        self
    }

    /// Single-valued category field compared by exact (case-insensitive) match
    pub fn facet<F>(self, category: &str, field: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        self.facet_with_mode(category, MatchMode::Exact, move |r| {
            field(r).into_iter().collect()
        })
    }

    /// Multi-valued category field: any record value may satisfy a selection
    pub fn facet_values<F>(self, category: &str, field: F) -> Self
    where
        F: Fn(&T) -> Vec<String> + Send + Sync + 'static,
    {
        self.facet_with_mode(category, MatchMode::Exact, field)
    }

    /// Category field where a selected value matches if it is contained in the
    /// record value ("HVAC" matches "HVAC / Boiler")
    pub fn facet_contains<F>(self, category: &str, field: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        self.facet_with_mode(category, MatchMode::Contains, move |r| {
            field(r).into_iter().collect()
        })
    }

    pub fn facet_with_mode<F>(mut self, category: &str, mode: MatchMode, field: F) -> Self
    where
        F: Fn(&T) -> Vec<String> + Send + Sync + 'static,
    {
        self.facets.insert(
            category.to_string(),
            Facet {
                mode,
                extract: Arc::new(field),
            },
        );
        self
    }

    pub fn has_facet(&self, category: &str) -> bool {
        self.facets.contains_key(category)
    }
}

/// Free-text part: `needle` must already be trimmed and lower-cased
fn matches_search<T>(record: &T, needle: &str, extractors: &FieldExtractors<T>) -> bool {
    if needle.is_empty() {
        return true;
    }
    extractors.search.iter().any(|field| {
        field(record)
            .map(|v| v.to_lowercase().contains(needle))
            .unwrap_or(false)
    })
}

fn matches_facet<T>(record: &T, selected: &[String], facet: &Facet<T>) -> bool {
    let values: Vec<String> = (facet.extract)(record)
        .into_iter()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_lowercase())
        .collect();
    if values.is_empty() {
        return false;
    }

    selected.iter().any(|s| {
        let s = s.to_lowercase();
        values.iter().any(|v| match facet.mode {
            MatchMode::Exact => *v == s,
            MatchMode::Contains => v.contains(&s),
        })
    })
}

/// Category part of the decision, AND across categories.
///
/// A selected category without an extractor cannot be evaluated and
/// excludes everything, so misconfigured pages show up as empty lists.
fn matches_selection<T>(record: &T, selection: &FilterSelection, extractors: &FieldExtractors<T>) -> bool {
    selection.active().all(|(category, selected)| {
        match extractors.facets.get(category) {
            Some(facet) => matches_facet(record, selected, facet),
            None => false,
        }
    })
}

/// Does `record` satisfy the search and every category selection
pub fn matches<T>(
    record: &T,
    search: &str,
    selection: &FilterSelection,
    extractors: &FieldExtractors<T>,
) -> bool {
    let needle = search.trim().to_lowercase();
    matches_search(record, &needle, extractors) && matches_selection(record, selection, extractors)
}

/// Indices of matching records, in source order
pub fn filter_indices<T>(records: &[T], snapshot: &FilterSnapshot, extractors: &FieldExtractors<T>) -> Vec<usize> {
    let needle = snapshot.normalized_search();
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            matches_search(*r, &needle, extractors)
                && matches_selection(*r, &snapshot.selection, extractors)
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::filters::LEGACY_PLACEHOLDER_VALUE;

    #[derive(Debug, Clone)]
    struct Item {
        id: u32,
        name: String,
        status: Option<String>,
        category: Option<String>,
        tags: Vec<String>,
    }

    fn item(id: u32, name: &str, status: Option<&str>, category: Option<&str>) -> Item {
        Item {
            id,
            name: name.to_string(),
            status: status.map(str::to_string),
            category: category.map(str::to_string),
            tags: Vec::new(),
        }
    }

    fn extractors() -> FieldExtractors<Item> {
        FieldExtractors::new()
            .search(|i: &Item| Some(i.name.clone()))
            .search(|i: &Item| i.category.clone())
            .facet("status", |i: &Item| i.status.clone())
            .facet_contains("category", |i: &Item| i.category.clone())
            .facet_values("tag", |i: &Item| i.tags.clone())
    }

    fn records() -> Vec<Item> {
        vec![
            item(1, "Rooftop unit", Some("active"), Some("HVAC")),
            item(2, "Boiler", Some("inactive"), Some("HVAC / Boiler")),
            item(3, "Water heater", Some("active"), Some("Plumbing")),
            item(4, "Unlabelled", None, None),
        ]
    }

    fn ids(snapshot: &FilterSnapshot) -> Vec<u32> {
        let records = records();
        filter_indices(&records, snapshot, &extractors())
            .into_iter()
            .map(|i| records[i].id)
            .collect()
    }

    fn snapshot(search: &str, selection: FilterSelection) -> FilterSnapshot {
        FilterSnapshot {
            search: search.to_string(),
            selection,
        }
    }

    #[test]
    fn test_empty_state_matches_everything() {
        assert_eq!(ids(&snapshot("", FilterSelection::new())), [1, 2, 3, 4]);
        assert_eq!(ids(&snapshot("   ", FilterSelection::new())), [1, 2, 3, 4]);
    }

    #[test]
    fn test_search_is_case_insensitive_or_across_fields() {
        assert_eq!(ids(&snapshot("BOIL", FilterSelection::new())), [2]);
        assert_eq!(ids(&snapshot("  plumb ", FilterSelection::new())), [3]);
        assert_eq!(ids(&snapshot("hvac", FilterSelection::new())), [1, 2]);
    }

    #[test]
    fn test_empty_category_selection_is_neutral() {
        let touched = FilterSelection::new()
            .with("status", Vec::<String>::new())
            .with("category", Vec::<String>::new());
        assert_eq!(ids(&snapshot("", touched)), ids(&snapshot("", FilterSelection::new())));
    }

    #[test]
    fn test_or_within_category() {
        let selection = FilterSelection::new().with("status", ["active", "inactive"]);
        assert_eq!(ids(&snapshot("", selection)), [1, 2, 3]);
    }

    #[test]
    fn test_and_across_categories() {
        let selection = FilterSelection::new().with("status", ["active"]);
        assert_eq!(ids(&snapshot("", selection.clone())), [1, 3]);

        let selection = selection.with("category", ["hvac"]);
        assert_eq!(ids(&snapshot("", selection.clone())), [1]);

        assert!(ids(&snapshot("heater", selection)).is_empty());
    }

    #[test]
    fn test_exact_vs_contains_modes() {
        // "HVAC / Boiler" contains "HVAC"
        let selection = FilterSelection::new().with("category", ["HVAC"]);
        assert_eq!(ids(&snapshot("", selection)), [1, 2]);

        // exact mode does not accept a partial status
        let selection = FilterSelection::new().with("status", ["act"]);
        assert!(ids(&snapshot("", selection)).is_empty());
    }

    #[test]
    fn test_missing_values_never_match() {
        let selection = FilterSelection::new().with("status", [""]);
        assert!(ids(&snapshot("", selection)).is_empty());

        let record = item(9, "", None, None);
        let selection = FilterSelection::new().with("category", ["HVAC"]);
        assert!(!matches(&record, "", &selection, &extractors()));
        assert!(!matches(&record, "x", &FilterSelection::new(), &extractors()));
    }

    #[test]
    fn test_multi_valued_field() {
        let mut record = item(5, "Gate", Some("active"), None);
        record.tags = vec!["outdoor".to_string(), "Security".to_string()];
        let selection = FilterSelection::new().with("tag", ["security"]);
        assert!(matches(&record, "", &selection, &extractors()));
        let selection = FilterSelection::new().with("tag", ["indoor"]);
        assert!(!matches(&record, "", &selection, &extractors()));
    }

    #[test]
    fn test_placeholder_value_never_constrains() {
        let selection = FilterSelection::new().with("status", [LEGACY_PLACEHOLDER_VALUE]);
        assert_eq!(ids(&snapshot("", selection)), [1, 2, 3, 4]);
    }

    #[test]
    fn test_selected_category_without_extractor_excludes() {
        let selection = FilterSelection::new().with("colour", ["red"]);
        assert!(ids(&snapshot("", selection)).is_empty());
    }
}
