use crate::shared::icons::icon;
use leptos::prelude::*;

/// Text shown next to the page buttons: "10-18 of 40", "0 of 0"
pub fn range_label(range: Option<(usize, usize)>, total_count: usize) -> String {
    match range {
        Some((from, to)) if from == to => format!("{} of {}", from, total_count),
        Some((from, to)) => format!("{}-{} of {}", from, to, total_count),
        None => format!("0 of {}", total_count),
    }
}

/// PaginationControls component - first/previous/next/last buttons over a
/// 1-based page number. Boundaries are handled by the list controller, the
/// buttons are only disabled for feedback.
#[component]
pub fn PaginationControls(
    /// Current page (1-based)
    #[prop(into)]
    current_page: Signal<usize>,

    /// Total number of pages, at least 1
    #[prop(into)]
    total_pages: Signal<usize>,

    /// Number of rows after filtering
    #[prop(into)]
    total_count: Signal<usize>,

    /// 1-based inclusive range of rows on the current page
    #[prop(into)]
    range: Signal<Option<(usize, usize)>>,

    /// Callback when page changes
    on_page_change: Callback<usize>,
) -> impl IntoView {
    let is_first = move || current_page.get() <= 1;
    let is_last = move || current_page.get() >= total_pages.get();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=is_first
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get().saturating_sub(1))
                disabled=is_first
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || format!("{} / {}", current_page.get(), total_pages.get())}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get() + 1)
                disabled=is_last
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(total_pages.get())
                disabled=is_last
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
            <span class="pagination-range">
                {move || range_label(range.get(), total_count.get())}
            </span>
        </div>
    }
}
