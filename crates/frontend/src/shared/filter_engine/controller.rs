//! List controller: ties together filters, saved filters, sorting and
//! pagination of one page.
//!
//! Pages mutate list state only through the intent methods here. Every
//! filter intent recomputes the visible rows and moves back to page 1
//! before anything is rendered; loading new records only clamps the page.

use super::paginator::Paginator;
use super::predicate::{filter_indices, FieldExtractors};
use super::saved::{SaveFilterError, SavedFilterStore};
use super::state::{FilterSnapshot, FilterStateStore, SubscriptionId};
use crate::shared::list_utils::Sortable;
use contracts::shared::filters::{FilterCategory, FilterSelection, SavedFilter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub field: String,
    pub ascending: bool,
}

pub struct ListController<T> {
    // Data
    records: Vec<T>,
    is_loaded: bool,
    load_error: Option<String>,

    // Filters
    fields: FieldExtractors<T>,
    filters: FilterStateStore,
    saved: SavedFilterStore,
    /// Saved selection applied before the first load, re-applied once
    /// data-derived options are known
    pending_selection: Option<FilterSelection>,
    /// Bumped whenever the search is cleared from outside the search input
    search_resets: u64,

    // Sorting and pagination
    sort: Option<SortState>,
    paginator: Paginator,

    /// Indices into `records` after filtering and sorting
    visible: Vec<usize>,
}

impl<T: Sortable + 'static> ListController<T> {
    pub fn new(
        fields: FieldExtractors<T>,
        categories: Vec<FilterCategory>,
        saved: SavedFilterStore,
        page_size: usize,
    ) -> Self {
        Self {
            records: Vec::new(),
            is_loaded: false,
            load_error: None,
            fields,
            filters: FilterStateStore::new(categories),
            saved,
            pending_selection: None,
            search_resets: 0,
            sort: None,
            paginator: Paginator::new(page_size),
            visible: Vec::new(),
        }
    }

    /// Initial sort applied to every recomputation
    pub fn with_sort(mut self, field: &str, ascending: bool) -> Self {
        self.sort = Some(SortState {
            field: field.to_string(),
            ascending,
        });
        self.refresh(false);
        self
    }

    // ------------------------------------------------------------------
    // Record source
    // ------------------------------------------------------------------

    /// Replaces the source collection after a successful fetch
    pub fn set_records(&mut self, records: Vec<T>) {
        self.records = records;
        self.is_loaded = true;
        self.load_error = None;
        match self.pending_selection.take() {
            Some(selection) => {
                self.filters.replace_selection(selection);
                self.refresh(true);
            }
            None => self.refresh(false),
        }
    }

    /// Keeps showing the last successful collection
    pub fn load_failed(&mut self, error: impl Into<String>) {
        self.load_error = Some(error.into());
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    // ------------------------------------------------------------------
    // Filter intents
    // ------------------------------------------------------------------

    pub fn set_search(&mut self, query: impl Into<String>) {
        if self.filters.set_search(query) {
            self.refresh(true);
        }
    }

    pub fn toggle_option(&mut self, category: &str, value: &str) {
        self.pending_selection = None;
        if self.filters.toggle_option(category, value) {
            self.refresh(true);
        }
    }

    pub fn clear_all(&mut self) {
        self.pending_selection = None;
        self.search_resets += 1;
        if self.filters.clear_all() {
            self.refresh(true);
        }
    }

    pub fn replace_selection(&mut self, selection: FilterSelection) {
        self.pending_selection = None;
        if self.filters.replace_selection(selection) {
            self.refresh(true);
        }
    }

    /// New option lists, e.g. derived from freshly loaded records
    pub fn set_categories(&mut self, categories: Vec<FilterCategory>) {
        if self.filters.set_categories(categories) {
            self.refresh(true);
        }
    }

    // ------------------------------------------------------------------
    // Saved filters
    // ------------------------------------------------------------------

    /// Saves the current selection (not the search text) under `name`
    pub fn save_current(&mut self, name: &str) -> Result<(), SaveFilterError> {
        let selection = self.filters.selection().clone();
        self.saved.save(name, selection)?;
        Ok(())
    }

    /// Replaces the selection with the saved one and clears the search.
    /// Before the first load, options derived from data are still
    /// placeholders, so the saved selection is kept and applied in full
    /// by [`ListController::set_records`].
    pub fn apply_saved(&mut self, name: &str) -> bool {
        let Some(saved) = self.saved.find(name) else {
            log::warn!("Saved filter '{}' not found in '{}'", name, self.saved.storage_key());
            return false;
        };
        let selection = SavedFilterStore::apply(saved);
        self.search_resets += 1;
        self.pending_selection = if self.is_loaded {
            None
        } else {
            log::debug!("Deferring saved filter '{}' until records are loaded", name);
            Some(selection.clone())
        };

        self.filters.batch(|filters| {
            filters.set_search("");
            filters.replace_selection(selection);
        });
        self.refresh(true);
        true
    }

    pub fn remove_saved(&mut self, name: &str) -> bool {
        self.saved.remove(name)
    }

    pub fn saved_filters(&self) -> &[SavedFilter] {
        self.saved.list()
    }

    // ------------------------------------------------------------------
    // Sorting and pagination
    // ------------------------------------------------------------------

    /// Header-click semantics: same field flips direction, new field sorts ascending
    pub fn sort_by(&mut self, field: &str) {
        self.sort = match self.sort.take() {
            Some(s) if s.field == field => Some(SortState {
                field: s.field,
                ascending: !s.ascending,
            }),
            _ => Some(SortState {
                field: field.to_string(),
                ascending: true,
            }),
        };
        self.refresh(true);
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.paginator.go_to(page);
    }

    pub fn next_page(&mut self) {
        self.paginator.next();
    }

    pub fn previous_page(&mut self) {
        self.paginator.previous();
    }

    pub fn first_page(&mut self) {
        self.paginator.first();
    }

    pub fn last_page(&mut self) {
        self.paginator.last();
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    // ------------------------------------------------------------------
    // Outputs
    // ------------------------------------------------------------------

    pub fn snapshot(&self) -> FilterSnapshot {
        self.filters.snapshot()
    }

    pub fn search(&self) -> &str {
        self.filters.search()
    }

    /// Counter of external search resets (clear all, saved filter applied).
    /// Inputs that buffer typing drop their pending text when it moves.
    pub fn search_resets(&self) -> u64 {
        self.search_resets
    }

    pub fn selection(&self) -> &FilterSelection {
        self.filters.selection()
    }

    pub fn categories(&self) -> &[FilterCategory] {
        self.filters.categories()
    }

    pub fn active_filters_count(&self) -> usize {
        self.filters.selection().active_count()
    }

    /// Rows matching the current filters, sorted
    pub fn filtered(&self) -> Vec<&T> {
        self.visible.iter().map(|&i| &self.records[i]).collect()
    }

    pub fn filtered_count(&self) -> usize {
        self.visible.len()
    }

    /// Rows of the current page
    pub fn page_items(&self) -> Vec<&T> {
        self.paginator
            .slice(&self.visible)
            .iter()
            .map(|&i| &self.records[i])
            .collect()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&FilterSnapshot) + Send + Sync + 'static,
    {
        self.filters.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.filters.unsubscribe(id)
    }

    fn refresh(&mut self, reset_page: bool) {
        let snapshot = self.filters.snapshot();
        let mut visible = filter_indices(&self.records, &snapshot, &self.fields);

        if let Some(sort) = &self.sort {
            let records = &self.records;
            visible.sort_by(|&a, &b| {
                let cmp = records[a].compare_by_field(&records[b], &sort.field);
                if sort.ascending {
                    cmp
                } else {
                    cmp.reverse()
                }
            });
        }

        self.visible = visible;
        if reset_page {
            self.paginator.reset();
        }
        self.paginator.set_total_items(self.visible.len());
    }
}

impl<T> std::fmt::Debug for ListController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("records", &self.records.len())
            .field("visible", &self.visible.len())
            .field("filters", &self.filters)
            .field("sort", &self.sort)
            .field("paginator", &self.paginator)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::filter_engine::storage::MemoryStorage;
    use contracts::shared::filters::FilterOption;
    use std::cmp::Ordering;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        status: String,
        category: String,
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "id" => self.id.cmp(&other.id),
                "category" => self.category.to_lowercase().cmp(&other.category.to_lowercase()),
                _ => Ordering::Equal,
            }
        }
    }

    fn row(id: u32, status: &str, category: &str) -> Row {
        Row {
            id,
            status: status.to_string(),
            category: category.to_string(),
        }
    }

    fn categories() -> Vec<FilterCategory> {
        vec![
            FilterCategory::new(
                "status",
                "Status",
                vec![
                    FilterOption::new("active", "Active"),
                    FilterOption::new("inactive", "Inactive"),
                ],
            ),
            FilterCategory::new(
                "category",
                "Category",
                vec![
                    FilterOption::new("HVAC", "HVAC"),
                    FilterOption::new("Plumbing", "Plumbing"),
                ],
            ),
        ]
    }

    fn controller_with(storage: &MemoryStorage, page_size: usize) -> ListController<Row> {
        let fields = FieldExtractors::new()
            .search(|r: &Row| Some(r.category.clone()))
            .facet("status", |r: &Row| Some(r.status.clone()))
            .facet("category", |r: &Row| Some(r.category.clone()));
        let saved = SavedFilterStore::open("saved_filters:test", Arc::new(storage.clone()));
        ListController::new(fields, categories(), saved, page_size)
    }

    /// Same page, but the category options come from the data
    fn unloaded_controller(storage: &MemoryStorage) -> ListController<Row> {
        let mut c = controller_with(storage, 9);
        c.set_categories(vec![
            categories().remove(0),
            FilterCategory::placeholder("category", "Category"),
        ]);
        c
    }

    fn controller() -> ListController<Row> {
        let mut c = controller_with(&MemoryStorage::new(), 9);
        c.set_records(vec![
            row(1, "active", "HVAC"),
            row(2, "inactive", "HVAC"),
            row(3, "active", "Plumbing"),
        ]);
        c
    }

    fn ids(c: &ListController<Row>) -> Vec<u32> {
        c.filtered().iter().map(|r| r.id).collect()
    }

    fn many(n: u32) -> Vec<Row> {
        (1..=n)
            .map(|i| row(i, if i % 2 == 0 { "inactive" } else { "active" }, "HVAC"))
            .collect()
    }

    #[test]
    fn test_scenario_select_narrow_clear() {
        let mut c = controller();
        c.toggle_option("status", "active");
        assert_eq!(ids(&c), [1, 3]);
        c.toggle_option("category", "HVAC");
        assert_eq!(ids(&c), [1]);
        c.clear_all();
        assert_eq!(ids(&c), [1, 2, 3]);
    }

    #[test]
    fn test_toggling_off_restores_match_set() {
        let mut c = controller();
        let before = ids(&c);
        c.toggle_option("status", "active");
        c.toggle_option("status", "inactive");
        c.toggle_option("status", "active");
        c.toggle_option("status", "inactive");
        assert_eq!(ids(&c), before);
    }

    #[test]
    fn test_scenario_pagination_page_size_nine() {
        let mut c = controller_with(&MemoryStorage::new(), 9);
        c.set_records(many(9));
        assert_eq!(c.paginator().total_pages(), 1);

        c.set_records(many(10));
        assert_eq!(c.paginator().total_pages(), 2);
        c.go_to_page(2);
        assert_eq!(c.page_items().len(), 1);
        assert_eq!(c.page_items()[0].id, 10);
    }

    #[test]
    fn test_scenario_apply_saved_replaces_selection() {
        let mut c = controller();
        c.toggle_option("status", "active");
        c.save_current("My View").unwrap();

        c.toggle_option("status", "active");
        c.toggle_option("status", "inactive");
        c.toggle_option("category", "Plumbing");
        c.set_search("plumb");

        assert!(c.apply_saved("My View"));
        assert_eq!(c.selection(), &FilterSelection::new().with("status", ["active"]));
        assert!(c.selection().values("category").is_empty());
        assert_eq!(c.search(), "");
        assert_eq!(ids(&c), [1, 3]);
    }

    #[test]
    fn test_toggling_unknown_option_keeps_every_row() {
        let mut c = controller();
        c.toggle_option("status", "bogus");
        assert!(c.selection().is_unconstrained());
        assert_eq!(ids(&c), [1, 2, 3]);
    }

    #[test]
    fn test_apply_unknown_saved_is_noop() {
        let mut c = controller();
        c.toggle_option("status", "active");
        assert!(!c.apply_saved("Nope"));
        assert_eq!(c.selection().values("status"), ["active"]);
    }

    #[test]
    fn test_save_current_validates_name() {
        let mut c = controller();
        assert_eq!(c.save_current(" "), Err(SaveFilterError::EmptyName));
        c.save_current("A").unwrap();
        assert!(matches!(c.save_current("a"), Err(SaveFilterError::DuplicateName(_))));
        assert_eq!(c.saved_filters().len(), 1);
        assert!(c.remove_saved("A"));
        assert!(c.saved_filters().is_empty());
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut c = controller_with(&MemoryStorage::new(), 2);
        c.set_records(many(10));
        c.go_to_page(4);
        c.toggle_option("status", "active");
        assert_eq!(c.paginator().current_page(), 1);

        c.go_to_page(3);
        c.set_search("hv");
        assert_eq!(c.paginator().current_page(), 1);

        c.go_to_page(2);
        c.clear_all();
        assert_eq!(c.paginator().current_page(), 1);

        c.go_to_page(5);
        c.replace_selection(FilterSelection::new().with("status", ["inactive"]));
        assert_eq!(c.paginator().current_page(), 1);
    }

    #[test]
    fn test_reload_clamps_without_reset() {
        let mut c = controller_with(&MemoryStorage::new(), 2);
        c.set_records(many(10));
        c.go_to_page(3);
        c.set_records(many(10));
        assert_eq!(c.paginator().current_page(), 3);
        c.set_records(many(3));
        assert_eq!(c.paginator().current_page(), 2);
    }

    #[test]
    fn test_load_failure_keeps_last_collection() {
        let mut c = controller_with(&MemoryStorage::new(), 9);
        assert!(!c.is_loaded());
        assert!(c.page_items().is_empty());

        c.load_failed("Failed to fetch: 500");
        assert_eq!(c.load_error(), Some("Failed to fetch: 500"));
        assert_eq!(c.paginator().total_pages(), 1);

        c.set_records(many(4));
        c.load_failed("timeout");
        assert_eq!(c.filtered_count(), 4);

        c.set_records(many(5));
        assert_eq!(c.load_error(), None);
    }

    #[test]
    fn test_sort_by_toggles_direction() {
        let mut c = controller();
        c.sort_by("id");
        assert_eq!(ids(&c), [1, 2, 3]);
        c.sort_by("id");
        assert_eq!(ids(&c), [3, 2, 1]);
        c.sort_by("category");
        assert_eq!(c.sort().map(|s| s.ascending), Some(true));
        assert_eq!(ids(&c), [1, 2, 3]);
    }

    #[test]
    fn test_option_change_prunes_and_refilters() {
        let mut c = controller();
        c.toggle_option("category", "Plumbing");
        assert_eq!(ids(&c), [3]);

        c.set_categories(vec![
            categories().remove(0),
            FilterCategory::from_values("category", "Category", ["HVAC"]),
        ]);
        assert!(c.selection().values("category").is_empty());
        assert_eq!(ids(&c), [1, 2, 3]);
    }

    #[test]
    fn test_subscribers_see_single_snapshot_on_apply() {
        let mut c = controller();
        c.toggle_option("status", "inactive");
        c.save_current("Inactive").unwrap();
        c.set_search("hvac");

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        c.subscribe(move |s| sink.lock().unwrap().push(s.clone()));
        c.apply_saved("Inactive");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].search, "");
    }

    #[test]
    fn test_saved_filters_survive_new_controller() {
        let storage = MemoryStorage::new();
        let mut c = controller_with(&storage, 9);
        c.toggle_option("category", "HVAC");
        c.save_current("HVAC only").unwrap();

        let mut fresh = controller_with(&storage, 9);
        fresh.set_records(many(3));
        assert!(fresh.apply_saved("hvac only"));
        assert_eq!(fresh.selection().values("category"), ["HVAC"]);
    }

    #[test]
    fn test_saved_filter_applied_before_load_survives_load() {
        let storage = MemoryStorage::new();
        let mut c = controller_with(&storage, 9);
        c.toggle_option("category", "HVAC");
        c.toggle_option("status", "active");
        c.save_current("HVAC active").unwrap();

        let mut fresh = unloaded_controller(&storage);
        fresh.set_search("pump");
        assert!(fresh.apply_saved("HVAC active"));
        assert_eq!(fresh.search(), "");
        assert_eq!(fresh.selection().values("status"), ["active"]);

        let rows = vec![
            row(1, "active", "HVAC"),
            row(2, "inactive", "HVAC"),
            row(3, "active", "Plumbing"),
        ];
        fresh.set_categories(categories());
        fresh.set_records(rows);

        assert_eq!(
            fresh.selection(),
            &FilterSelection::new()
                .with("status", ["active"])
                .with("category", ["HVAC"])
        );
        assert_eq!(ids(&fresh), [1]);
    }

    #[test]
    fn test_user_intent_before_load_drops_deferred_saved_filter() {
        let storage = MemoryStorage::new();
        let mut c = controller_with(&storage, 9);
        c.toggle_option("category", "HVAC");
        c.save_current("HVAC").unwrap();

        let mut fresh = unloaded_controller(&storage);
        fresh.apply_saved("HVAC");
        fresh.toggle_option("status", "inactive");
        fresh.set_categories(categories());
        fresh.set_records(vec![row(1, "active", "HVAC"), row(2, "inactive", "Plumbing")]);

        assert!(fresh.selection().values("category").is_empty());
        assert_eq!(ids(&fresh), [2]);
    }

    #[test]
    fn test_external_resets_are_counted() {
        let mut c = controller();
        let start = c.search_resets();

        c.toggle_option("status", "active");
        c.set_search("hv");
        assert_eq!(c.search_resets(), start);

        c.save_current("Active").unwrap();
        c.apply_saved("Active");
        assert_eq!(c.search_resets(), start + 1);

        // Nothing left to clear, but a buffered query must still be dropped
        c.clear_all();
        c.clear_all();
        assert_eq!(c.search_resets(), start + 3);

        c.apply_saved("Missing");
        assert_eq!(c.search_resets(), start + 3);
    }
}
