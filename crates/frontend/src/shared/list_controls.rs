//! Shared list wiring: the filter bar over a `ListController` and data loading.
//!
//! Pages keep their controller in an `RwSignal` and hand it to
//! [`ListFilterBar`]; every user action goes through a controller intent,
//! so filtering, page reset and re-render happen in one signal update.

use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::multi_select::{ActiveFilterTags, MultiSelectFilter};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::saved_filters::{SaveFilterDialog, SavedFiltersList};
use crate::shared::filter_engine::ListController;
use crate::shared::list_utils::{SearchInput, Sortable};
use contracts::shared::filters::FilterCategory;
use leptos::prelude::*;
use std::future::Future;

/// Runs `fetch` and feeds the outcome into the controller. Option lists
/// derived from the data are rebuilt with `categories_from` before the rows
/// are swapped in. A failure keeps the previous rows and is reported through
/// `load_error()`.
pub fn load_into<T, F, C>(controller: RwSignal<ListController<T>>, fetch: F, categories_from: C)
where
    T: Sortable + Send + Sync + 'static,
    F: Future<Output = Result<Vec<T>, String>> + 'static,
    C: Fn(&[T]) -> Vec<FilterCategory> + 'static,
{
    wasm_bindgen_futures::spawn_local(async move {
        match fetch.await {
            Ok(rows) => {
                log::debug!("Loaded {} rows", rows.len());
                let categories = categories_from(&rows);
                controller.update(|c| {
                    c.set_categories(categories);
                    c.set_records(rows);
                });
            }
            Err(e) => {
                log::error!("Failed to load list: {}", e);
                controller.update(|c| c.load_failed(e));
            }
        }
    });
}

#[component]
pub fn ListFilterBar<T>(
    controller: RwSignal<ListController<T>>,
    #[prop(optional, into)]
    search_placeholder: String,
    #[prop(optional)]
    debounce_ms: Option<u32>,
) -> impl IntoView
where
    T: Sortable + Send + Sync + 'static,
{
    let is_expanded = RwSignal::new(true);
    let show_save_dialog = RwSignal::new(false);

    let search = Memo::new(move |_| controller.with(|c| c.search().to_string()));
    let search_resets = Memo::new(move |_| controller.with(|c| c.search_resets()));
    let categories = Signal::derive(move || controller.with(|c| c.categories().to_vec()));
    let selection = Signal::derive(move || controller.with(|c| c.selection().clone()));
    let saved = Signal::derive(move || controller.with(|c| c.saved_filters().to_vec()));

    let on_search = Callback::new(move |query: String| controller.update(|c| c.set_search(query)));
    let on_clear_all = Callback::new(move |_: ()| controller.update(|c| c.clear_all()));
    let on_remove_tag = Callback::new(move |(key, value): (String, String)| {
        controller.update(|c| c.toggle_option(&key, &value))
    });
    let on_apply = Callback::new(move |name: String| {
        controller.update(|c| {
            c.apply_saved(&name);
        })
    });
    let on_delete = Callback::new(move |name: String| {
        controller.update(|c| {
            c.remove_saved(&name);
        })
    });
    let on_save = Callback::new(move |name: String| {
        let mut result = None;
        controller.update(|c| {
            result = c.save_current(&name).err().map(|e| e.to_string());
        });
        result
    });
    let on_page_change = Callback::new(move |page: usize| controller.update(|c| c.go_to_page(page)));

    view! {
        <FilterPanel
            is_expanded=is_expanded
            active_filters_count=Signal::derive(move || controller.with(|c| c.active_filters_count()))
            on_clear_all=on_clear_all
            pagination_controls=move || view! {
                <PaginationControls
                    current_page=Signal::derive(move || controller.with(|c| c.paginator().current_page()))
                    total_pages=Signal::derive(move || controller.with(|c| c.paginator().total_pages()))
                    total_count=Signal::derive(move || controller.with(|c| c.filtered_count()))
                    range=Signal::derive(move || controller.with(|c| c.paginator().range()))
                    on_page_change=on_page_change
                />
            }
            filter_content=move || view! {
                <div class="filter-panel__fields">
                    <SearchInput
                        value=search
                        reset=search_resets
                        on_change=on_search
                        debounce_ms=debounce_ms.unwrap_or(300)
                        placeholder=search_placeholder.clone()
                    />
                    {move || {
                        categories
                            .get()
                            .into_iter()
                            .map(|category| {
                                let key = category.key.clone();
                                let key_for_selected = category.key.clone();
                                view! {
                                    <MultiSelectFilter
                                        category=category
                                        selected=Signal::derive(move || {
                                            selection.with(|s| s.values(&key_for_selected).to_vec())
                                        })
                                        on_toggle=Callback::new(move |value: String| {
                                            controller.update(|c| c.toggle_option(&key, &value))
                                        })
                                    />
                                }
                            })
                            .collect_view()
                    }}
                </div>
                <div class="filter-panel__saved">
                    <SavedFiltersList filters=saved on_apply=on_apply on_delete=on_delete />
                    <button
                        class="btn btn-sm btn-primary"
                        on:click=move |_| show_save_dialog.set(true)
                    >
                        "Save filter"
                    </button>
                </div>
            }
            filter_tags=move || view! {
                <ActiveFilterTags
                    categories=categories
                    selection=selection
                    on_remove=on_remove_tag
                />
            }
        />
        <SaveFilterDialog show=show_save_dialog on_save=on_save />
    }
}

/// Error banner and the neutral "nothing matches" state under a list
#[component]
pub fn ListStatus<T>(controller: RwSignal<ListController<T>>) -> impl IntoView
where
    T: Sortable + Send + Sync + 'static,
{
    view! {
        {move || controller.with(|c| c.load_error().map(str::to_string)).map(|err| view! {
            <div class="alert alert--error">{err}</div>
        })}
        <Show when=move || controller.with(|c| c.is_loaded() && c.filtered_count() == 0)>
            <div class="list-empty">"No records match the current filters"</div>
        </Show>
    }
}
