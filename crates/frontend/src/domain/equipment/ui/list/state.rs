use crate::config::Config;
use crate::shared::filter_engine::{FieldExtractors, FilterStorage, ListController, SavedFilterStore};
use crate::shared::list_utils::{compare_text, Sortable};
use contracts::domain::equipment::{Equipment, EquipmentStatus};
use contracts::shared::filters::{FilterCategory, FilterOption};
use leptos::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;

pub const PAGE_KEY: &str = "equipment";

#[derive(Clone, Debug, PartialEq)]
pub struct EquipmentRow {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub status: Option<EquipmentStatus>,
    pub property_name: Option<String>,
    pub manufacturer: Option<String>,
    pub serial_number: Option<String>,
}

impl From<Equipment> for EquipmentRow {
    fn from(e: Equipment) -> Self {
        Self {
            id: e.id,
            name: e.name,
            category: e.category,
            status: e.status,
            property_name: e.property_name,
            manufacturer: e.manufacturer,
            serial_number: e.serial_number,
        }
    }
}

impl EquipmentRow {
    pub fn status_label(&self) -> &'static str {
        self.status.map(|s| s.display_name()).unwrap_or("Unknown")
    }
}

impl Sortable for EquipmentRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "name" => compare_text(Some(&self.name), Some(&other.name)),
            "category" => compare_text(self.category.as_deref(), other.category.as_deref()),
            "status" => compare_text(
                self.status.map(|s| s.display_name()),
                other.status.map(|s| s.display_name()),
            ),
            "property" => compare_text(self.property_name.as_deref(), other.property_name.as_deref()),
            _ => Ordering::Equal,
        }
    }
}

/// Search covers name, category, property, manufacturer, serial number and status
pub fn field_extractors() -> FieldExtractors<EquipmentRow> {
    FieldExtractors::new()
        .search(|r: &EquipmentRow| Some(r.name.clone()))
        .search(|r: &EquipmentRow| r.category.clone())
        .search(|r: &EquipmentRow| r.property_name.clone())
        .search(|r: &EquipmentRow| r.manufacturer.clone())
        .search(|r: &EquipmentRow| r.serial_number.clone())
        .search(|r: &EquipmentRow| r.status.map(|s| s.display_name().to_string()))
        .facet("status", |r: &EquipmentRow| r.status.map(|s| s.code().to_string()))
        // Categories are free text, "HVAC" should also find "HVAC / Boiler"
        .facet_contains("category", |r: &EquipmentRow| r.category.clone())
        .facet("property", |r: &EquipmentRow| r.property_name.clone())
}

fn status_category() -> FilterCategory {
    FilterCategory::new(
        "status",
        "Status",
        EquipmentStatus::all()
            .into_iter()
            .map(|s| FilterOption::new(s.code(), s.display_name()))
            .collect(),
    )
}

/// Option lists for the loaded rows. Category and property options come from
/// the data, so before the first load they are placeholders.
pub fn categories_from(rows: &[EquipmentRow]) -> Vec<FilterCategory> {
    vec![
        status_category(),
        FilterCategory::from_values("category", "Category", rows.iter().filter_map(|r| r.category.as_deref())),
        FilterCategory::from_values("property", "Property", rows.iter().filter_map(|r| r.property_name.as_deref())),
    ]
}

pub fn build_controller(config: &Config, storage: Arc<dyn FilterStorage>) -> ListController<EquipmentRow> {
    let saved = SavedFilterStore::open(config.saved_filters.storage_key(PAGE_KEY), storage);
    ListController::new(
        field_extractors(),
        categories_from(&[]),
        saved,
        config.pagination.page_size,
    )
    .with_sort("name", true)
}

pub fn create_state(config: &Config, storage: Arc<dyn FilterStorage>) -> RwSignal<ListController<EquipmentRow>> {
    RwSignal::new(build_controller(config, storage))
}
