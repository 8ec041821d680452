use crate::config::Config;
use crate::shared::filter_engine::{FieldExtractors, FilterStorage, ListController, SavedFilterStore};
use crate::shared::date_utils::format_date;
use crate::shared::list_utils::{compare_text, Sortable};
use contracts::domain::lease::{BalanceTier, Lease, LeaseStatus};
use contracts::shared::filters::{FilterCategory, FilterOption};
use leptos::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;

pub const PAGE_KEY: &str = "leases";

#[derive(Clone, Debug, PartialEq)]
pub struct LeaseRow {
    pub id: String,
    pub tenant_name: String,
    pub property_name: Option<String>,
    pub unit: Option<String>,
    pub status: LeaseStatus,
    pub balance_tier: BalanceTier,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub monthly_rent: f64,
    pub balance: f64,
}

impl From<Lease> for LeaseRow {
    fn from(l: Lease) -> Self {
        let balance_tier = BalanceTier::of(&l);
        Self {
            id: l.id,
            tenant_name: l.tenant_name,
            property_name: l.property_name,
            unit: l.unit,
            status: l.status,
            balance_tier,
            start_date: l.start_date,
            end_date: l.end_date,
            monthly_rent: l.monthly_rent,
            balance: l.balance,
        }
    }
}

impl LeaseRow {
    /// "Maple Court, 4B"
    pub fn location(&self) -> String {
        match (&self.property_name, &self.unit) {
            (Some(p), Some(u)) => format!("{}, {}", p, u),
            (Some(p), None) => p.clone(),
            (None, Some(u)) => u.clone(),
            (None, None) => "-".to_string(),
        }
    }

    /// "01.01.2024 – 31.12.2024", open ends shown as "…"
    pub fn term(&self) -> String {
        let side = |d: &Option<String>| d.as_deref().map(format_date).unwrap_or_else(|| "…".to_string());
        format!("{} – {}", side(&self.start_date), side(&self.end_date))
    }
}

impl Sortable for LeaseRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "tenant" => compare_text(Some(&self.tenant_name), Some(&other.tenant_name)),
            "property" => compare_text(self.property_name.as_deref(), other.property_name.as_deref()),
            "status" => compare_text(Some(self.status.display_name()), Some(other.status.display_name())),
            // ISO dates sort lexically
            "start_date" => self.start_date.cmp(&other.start_date),
            "end_date" => self.end_date.cmp(&other.end_date),
            "monthly_rent" => self
                .monthly_rent
                .partial_cmp(&other.monthly_rent)
                .unwrap_or(Ordering::Equal),
            "balance" => self.balance.partial_cmp(&other.balance).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        }
    }
}

pub fn field_extractors() -> FieldExtractors<LeaseRow> {
    FieldExtractors::new()
        .search(|r: &LeaseRow| Some(r.tenant_name.clone()))
        .search(|r: &LeaseRow| r.property_name.clone())
        .search(|r: &LeaseRow| r.unit.clone())
        .search(|r: &LeaseRow| Some(r.status.display_name().to_string()))
        .facet("status", |r: &LeaseRow| Some(r.status.code().to_string()))
        .facet("balance", |r: &LeaseRow| Some(r.balance_tier.code().to_string()))
        .facet("property", |r: &LeaseRow| r.property_name.clone())
}

pub fn categories_from(rows: &[LeaseRow]) -> Vec<FilterCategory> {
    vec![
        FilterCategory::new(
            "status",
            "Status",
            LeaseStatus::all()
                .into_iter()
                .map(|s| FilterOption::new(s.code(), s.display_name()))
                .collect(),
        ),
        FilterCategory::new(
            "balance",
            "Balance",
            BalanceTier::all()
                .into_iter()
                .map(|t| FilterOption::new(t.code(), t.display_name()))
                .collect(),
        ),
        FilterCategory::from_values("property", "Property", rows.iter().filter_map(|r| r.property_name.as_deref())),
    ]
}

pub fn build_controller(config: &Config, storage: Arc<dyn FilterStorage>) -> ListController<LeaseRow> {
    let saved = SavedFilterStore::open(config.saved_filters.storage_key(PAGE_KEY), storage);
    ListController::new(
        field_extractors(),
        categories_from(&[]),
        saved,
        config.pagination.page_size,
    )
    .with_sort("tenant", true)
}

pub fn create_state(config: &Config, storage: Arc<dyn FilterStorage>) -> RwSignal<ListController<LeaseRow>> {
    RwSignal::new(build_controller(config, storage))
}
