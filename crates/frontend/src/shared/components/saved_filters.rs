use crate::shared::date_utils::format_timestamp;
use crate::shared::icons::icon;
use contracts::shared::filters::SavedFilter;
use leptos::prelude::*;

#[component]
pub fn SavedFiltersList(
    /// Saved filters of the page, in creation order
    #[prop(into)]
    filters: Signal<Vec<SavedFilter>>,
    /// Callback when a filter is selected to apply
    on_apply: Callback<String>,
    /// Callback when a filter is deleted
    on_delete: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="saved-filters">
            <Show
                when=move || filters.with(|f| !f.is_empty())
                fallback=|| view! { <span class="saved-filters__empty">"No saved filters"</span> }
            >
                {move || {
                    filters
                        .get()
                        .into_iter()
                        .map(|saved| {
                            let name_for_apply = saved.name.clone();
                            let name_for_delete = saved.name.clone();
                            let created = saved
                                .created_at
                                .map(|t| format!("Saved {}", format_timestamp(&t)))
                                .unwrap_or_default();
                            view! {
                                <div class="saved-filters__item" title=created>
                                    <button
                                        class="saved-filters__apply"
                                        on:click=move |_| on_apply.run(name_for_apply.clone())
                                    >
                                        {icon("bookmark")}
                                        <span>{saved.name}</span>
                                    </button>
                                    <button
                                        class="saved-filters__delete"
                                        title="Delete"
                                        on:click=move |_| on_delete.run(name_for_delete.clone())
                                    >
                                        {icon("trash")}
                                    </button>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </Show>
        </div>
    }
}

#[component]
pub fn SaveFilterDialog(
    /// Show/hide the dialog
    #[prop(into)]
    show: RwSignal<bool>,
    /// Saves the current selection; returns the validation message on failure
    on_save: Callback<String, Option<String>>,
) -> impl IntoView {
    let (name, set_name) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let close = move || {
        set_name.set(String::new());
        set_error.set(None);
        show.set(false);
    };

    let handle_save = move |_| match on_save.run(name.get()) {
        Some(message) => set_error.set(Some(message)),
        None => close(),
    };

    view! {
        <Show when=move || show.get()>
            <div class="modal-overlay">
                <div class="modal-dialog">
                    <h3>"Save filter"</h3>
                    <div class="form-group">
                        <label>"Name"</label>
                        <input
                            type="text"
                            class=move || if error.get().is_some() { "form-control form-control--invalid" } else { "form-control" }
                            prop:value=name
                            on:input=move |ev| {
                                set_name.set(event_target_value(&ev));
                                set_error.set(None);
                            }
                        />
                        {move || error.get().map(|message| view! {
                            <div class="form-error">{message}</div>
                        })}
                    </div>
                    <div class="modal-actions">
                        <button class="btn btn-primary" on:click=handle_save>
                            "Save"
                        </button>
                        <button class="btn btn-secondary" on:click=move |_| close()>
                            "Cancel"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
