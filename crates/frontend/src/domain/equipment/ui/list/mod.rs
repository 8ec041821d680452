pub mod state;

use self::state::{categories_from, create_state, EquipmentRow};
use crate::config::Config;
use crate::domain::equipment::api::fetch_equipment;
use crate::shared::components::ui::badge::Badge as UiBadge;
use crate::shared::filter_engine::LocalStorage;
use crate::shared::icons::icon;
use crate::shared::list_controls::{load_into, ListFilterBar, ListStatus};
use crate::shared::list_utils::{get_sort_indicator, highlight_matches};
use contracts::domain::equipment::EquipmentStatus;
use leptos::prelude::*;
use std::sync::Arc;
use thaw::*;

fn status_variant(status: Option<EquipmentStatus>) -> &'static str {
    match status {
        Some(EquipmentStatus::Active) => "success",
        Some(EquipmentStatus::UnderRepair) => "warning",
        Some(EquipmentStatus::Inactive) => "neutral",
        None => "neutral",
    }
}

#[component]
fn EquipmentCard(row: EquipmentRow, #[prop(into)] search: Signal<String>) -> impl IntoView {
    let name = row.name.clone();
    let category = row.category.clone().unwrap_or_else(|| "-".to_string());
    let property = row.property_name.clone().unwrap_or_else(|| "-".to_string());
    let manufacturer = row.manufacturer.clone();
    let serial = row.serial_number.clone();
    let status_class = status_variant(row.status).to_string();
    let status_label = row.status_label();

    view! {
        <div class="equipment-card">
            <Card>
                <div class="equipment-card__header">
                    <span class="equipment-card__title">
                        {move || highlight_matches(&name, &search.get())}
                    </span>
                    <UiBadge variant=status_class>
                        {status_label}
                    </UiBadge>
                </div>
                <div class="equipment-card__field">
                    <span class="equipment-card__label">"Category"</span>
                    <span>{move || highlight_matches(&category, &search.get())}</span>
                </div>
                <div class="equipment-card__field">
                    <span class="equipment-card__label">"Property"</span>
                    <span>{move || highlight_matches(&property, &search.get())}</span>
                </div>
                {manufacturer.map(|m| view! {
                    <div class="equipment-card__field">
                        <span class="equipment-card__label">"Manufacturer"</span>
                        <span>{move || highlight_matches(&m, &search.get())}</span>
                    </div>
                })}
                {serial.map(|s| view! {
                    <div class="equipment-card__field">
                        <span class="equipment-card__label">"Serial no."</span>
                        <span>{move || highlight_matches(&s, &search.get())}</span>
                    </div>
                })}
            </Card>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn EquipmentList() -> impl IntoView {
    let config = use_context::<Config>().expect("Config context not found");
    let controller = create_state(&config, Arc::new(LocalStorage));
    let search = Signal::derive(move || controller.with(|c| c.search().to_string()));

    load_into(
        controller,
        async {
            fetch_equipment()
                .await
                .map(|items| items.into_iter().map(EquipmentRow::from).collect())
        },
        categories_from,
    );

    let sort_button = move |field: &'static str, label: &'static str| {
        view! {
            <Button
                appearance=ButtonAppearance::Subtle
                size=ButtonSize::Small
                on_click=move |_| controller.update(|c| c.sort_by(field))
            >
                {label}
                {move || controller.with(|c| {
                    let sort = c.sort();
                    get_sort_indicator(sort.map(|s| s.field.as_str()), field, sort.map(|s| s.ascending).unwrap_or(true))
                })}
            </Button>
        }
    };

    view! {
        <div class="page">
            <div class="page__header">
                <h2 class="page__title">{icon("equipment")}"Equipment"</h2>
                <div class="page__sort">
                    {sort_button("name", "Name")}
                    {sort_button("category", "Category")}
                    {sort_button("status", "Status")}
                    {sort_button("property", "Property")}
                </div>
            </div>

            <ListFilterBar
                controller=controller
                search_placeholder="Search equipment..."
                debounce_ms=config.search.debounce_ms
            />
            <ListStatus controller=controller />

            <div class="equipment-grid">
                {move || {
                    controller
                        .with(|c| c.page_items().into_iter().cloned().collect::<Vec<_>>())
                        .into_iter()
                        .map(|row| view! { <EquipmentCard row=row search=search /> })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
