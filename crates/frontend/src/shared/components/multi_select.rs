use crate::shared::components::filter_panel::FilterTag;
use crate::shared::icons::icon;
use contracts::shared::filters::{FilterCategory, FilterSelection};
use leptos::prelude::*;

/// One chip per selected value: (category key, value, "Category: Option")
pub fn active_tags(categories: &[FilterCategory], selection: &FilterSelection) -> Vec<(String, String, String)> {
    categories
        .iter()
        .flat_map(|category| {
            selection.values(&category.key).iter().map(move |value| {
                let option = category.option_label(value).unwrap_or(value.as_str());
                (
                    category.key.clone(),
                    value.clone(),
                    format!("{}: {}", category.label, option),
                )
            })
        })
        .collect()
}

/// Dropdown with a checkbox per option of one category.
///
/// Open state is local: the list closes on a click outside it (backdrop) or
/// after an option is toggled.
#[component]
pub fn MultiSelectFilter(
    #[prop(into)]
    category: Signal<FilterCategory>,
    /// Selected values of this category
    #[prop(into)]
    selected: Signal<Vec<String>>,
    on_toggle: Callback<String>,
) -> impl IntoView {
    let is_open = RwSignal::new(false);

    let button_label = move || {
        let label = category.with(|c| c.label.clone());
        match selected.with(Vec::len) {
            0 => label,
            n => format!("{} ({})", label, n),
        }
    };

    view! {
        <div class="multi-select">
            <button
                class=move || if selected.with(|s| !s.is_empty()) { "multi-select__button multi-select__button--active" } else { "multi-select__button" }
                on:click=move |_| is_open.update(|o| *o = !*o)
            >
                <span>{button_label}</span>
                {icon("chevron-down")}
            </button>
            <Show when=move || is_open.get()>
                <div class="multi-select__backdrop" on:click=move |_| is_open.set(false)></div>
                <div class="multi-select__menu">
                    {move || {
                        let category = category.get();
                        if category.is_empty {
                            return view! {
                                <div class="multi-select__empty">"No items available"</div>
                            }.into_any();
                        }
                        category
                            .options
                            .into_iter()
                            .map(|option| {
                                let value = option.value.clone();
                                let value_for_check = option.value.clone();
                                view! {
                                    <label class="multi-select__option">
                                        <input
                                            type="checkbox"
                                            prop:checked=move || selected.with(|s| s.contains(&value_for_check))
                                            on:change=move |_| {
                                                on_toggle.run(value.clone());
                                                is_open.set(false);
                                            }
                                        />
                                        <span>{option.label}</span>
                                    </label>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </div>
            </Show>
        </div>
    }
}

/// Removable chips for every selected value
#[component]
pub fn ActiveFilterTags(
    #[prop(into)]
    categories: Signal<Vec<FilterCategory>>,
    #[prop(into)]
    selection: Signal<FilterSelection>,
    /// (category, value) to toggle off
    on_remove: Callback<(String, String)>,
) -> impl IntoView {
    let tags = move || {
        categories.with(|categories| selection.with(|selection| active_tags(categories, selection)))
    };

    view! {
        <div class="filter-tags">
            {move || {
                tags()
                    .into_iter()
                    .map(|(key, value, label)| {
                        view! {
                            <FilterTag
                                label=label
                                on_remove=Callback::new(move |_: ()| on_remove.run((key.clone(), value.clone())))
                            />
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
