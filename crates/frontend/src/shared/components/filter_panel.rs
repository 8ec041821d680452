use crate::shared::icons::icon;
use leptos::prelude::*;

/// FilterPanel component - collapsible filter panel with pagination in the
/// header and an optional row of active filter tags under the fields
#[component]
pub fn FilterPanel(
    /// Whether the filter panel is expanded
    #[prop(into)]
    is_expanded: RwSignal<bool>,

    /// Number of selected filter values (for badge display)
    #[prop(into)]
    active_filters_count: Signal<usize>,

    /// Resets search and every category
    on_clear_all: Callback<()>,

    /// Pagination controls (slot)
    #[prop(into)]
    pagination_controls: ViewFn,

    /// Filter content (search, dropdowns, saved filters)
    #[prop(into)]
    filter_content: ViewFn,

    /// Filter tags (active filter chips) - optional
    #[prop(optional, into)]
    filter_tags: Option<ViewFn>,
) -> impl IntoView {
    let toggle_expanded = move |_| {
        is_expanded.update(|e| *e = !*e);
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div class="filter-panel-header__left" on:click=toggle_expanded>
                    <span class=move || {
                        if is_expanded.get() {
                            "filter-panel__chevron filter-panel__chevron--expanded"
                        } else {
                            "filter-panel__chevron"
                        }
                    }>
                        {icon("chevron-down")}
                    </span>
                    {icon("filter")}
                    <span class="filter-panel__title">"Filters"</span>
                    <Show when=move || { active_filters_count.get() > 0 }>
                        <span class="badge badge--primary">{move || active_filters_count.get()}</span>
                    </Show>
                </div>
                <div class="filter-panel-header__center">
                    {pagination_controls.run()}
                </div>
                <div class="filter-panel-header__right">
                    <button
                        class="btn btn-sm btn-secondary"
                        on:click=move |_| on_clear_all.run(())
                    >
                        "Clear all"
                    </button>
                </div>
            </div>

            <div class=move || {
                if is_expanded.get() {
                    "filter-panel__collapsible filter-panel__collapsible--expanded"
                } else {
                    "filter-panel__collapsible filter-panel__collapsible--collapsed"
                }
            }>
                <div class="filter-panel-content">
                    {filter_content.run()}
                    {filter_tags.as_ref().map(|tags| view! {
                        <div class="filter-panel__tags">{tags.run()}</div>
                    })}
                </div>
            </div>
        </div>
    }
}

/// FilterTag component - individual filter tag/chip
#[component]
pub fn FilterTag(
    /// Tag label
    #[prop(into)]
    label: String,

    /// Callback when remove is clicked
    on_remove: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="filter-tag">
            <span>{label}</span>
            <span
                class="filter-tag__remove"
                on:click=move |e| {
                    e.stop_propagation();
                    on_remove.run(());
                }
            >
                {icon("x")}
            </span>
        </div>
    }
}
