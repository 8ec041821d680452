/// Универсальные утилиты для работы со списками (сортировка, поиск, подсветка)
use leptos::prelude::*;
use std::cmp::Ordering;
use wasm_bindgen::JsCast;

/// Trait для типов данных, поддерживающих сортировку
pub trait Sortable {
    /// Сравнивает два объекта по указанному полю
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Сравнение необязательного текста без учета регистра, пустые значения первыми
pub fn compare_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    let a = a.map(str::to_lowercase).unwrap_or_default();
    let b = b.map(str::to_lowercase).unwrap_or_default();
    a.cmp(&b)
}

/// Разбивает `text` на части `(фрагмент, совпадение)` по всем вхождениям
/// `filter` без учета регистра. Границы берутся по символам исходного текста,
/// поэтому строки, у которых при `to_lowercase` меняется длина в байтах, не ломаются.
pub fn highlight_segments(text: &str, filter: &str) -> Vec<(String, bool)> {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return vec![(text.to_string(), false)];
    }

    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;

    while pos < text.len() {
        match match_len(&text[pos..], &needle) {
            Some(len) => {
                if pos > plain_start {
                    segments.push((text[plain_start..pos].to_string(), false));
                }
                segments.push((text[pos..pos + len].to_string(), true));
                pos += len;
                plain_start = pos;
            }
            None => {
                pos += text[pos..].chars().next().map(char::len_utf8).unwrap_or(1);
            }
        }
    }

    if plain_start < text.len() {
        segments.push((text[plain_start..].to_string(), false));
    }
    segments
}

/// Длина в байтах префикса `haystack`, который в нижнем регистре начинается с `needle`
fn match_len(haystack: &str, needle: &str) -> Option<usize> {
    let mut lowered = String::new();
    for (i, c) in haystack.char_indices() {
        lowered.extend(c.to_lowercase());
        if lowered.len() >= needle.len() {
            return lowered.starts_with(needle).then(|| i + c.len_utf8());
        }
        if !needle.starts_with(lowered.as_str()) {
            return None;
        }
    }
    None
}

/// Подсветка совпадений в тексте (case-insensitive)
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let parts = highlight_segments(text, filter)
        .into_iter()
        .map(|(segment, is_match)| {
            if is_match {
                view! { <mark class="search-highlight">{segment}</mark> }.into_any()
            } else {
                view! { <span>{segment}</span> }.into_any()
            }
        })
        .collect_view();

    view! { <>{parts}</> }.into_any()
}

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator(current_field: Option<&str>, field: &str, ascending: bool) -> &'static str {
    if current_field == Some(field) {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// Поле поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Текущее значение поиска (из состояния списка)
    #[prop(into)]
    value: Signal<String>,
    /// Вызывается с новым текстом после паузы ввода
    #[prop(into)]
    on_change: Callback<String>,
    /// Задержка перед отправкой, мс
    #[prop(optional)]
    debounce_ms: Option<u32>,
    #[prop(optional, into)]
    placeholder: String,
    /// Меняется при внешнем сбросе поиска; отменяет отложенную отправку
    #[prop(optional, into)]
    reset: Option<Signal<u64>>,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };
    let debounce_ms = debounce_ms.unwrap_or(300) as i32;

    // Локальное состояние для input (до debounce)
    let (input_value, set_input_value) = signal(value.get_untracked());
    let debounce_timeout = StoredValue::new(None::<i32>);

    let cancel_pending = move || {
        if let Some(timeout_id) = debounce_timeout.get_value() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(timeout_id);
            }
            debounce_timeout.set_value(None);
        }
    };

    // Значение поиска изменилось снаружи
    Effect::new(move |_| {
        let external = value.get();
        if external != input_value.get_untracked() {
            cancel_pending();
            set_input_value.set(external);
        }
    });

    // Внешний сброс (clear all, применение сохраненного фильтра): набранный,
    // но еще не отправленный текст отбрасывается
    if let Some(reset) = reset {
        Effect::new(move |prev: Option<u64>| {
            let current = reset.get();
            if prev.is_some_and(|p| p != current) {
                cancel_pending();
                set_input_value.set(value.get_untracked());
            }
            current
        });
    }

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        cancel_pending();

        let Some(window) = web_sys::window() else {
            on_change.run(new_value);
            return;
        };
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            on_change.run(new_value.clone());
        }) as Box<dyn Fn()>);

        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref::<js_sys::Function>(),
            debounce_ms,
        ) {
            Ok(timeout_id) => {
                closure.forget();
                debounce_timeout.set_value(Some(timeout_id));
            }
            Err(e) => log::warn!("setTimeout failed: {:?}", e),
        }
    };

    let is_search_active = move || !value.get().trim().is_empty();

    let clear_search = move |_| {
        cancel_pending();
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                class=move || if is_search_active() { "search-input__field search-input__field--active" } else { "search-input__field" }
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_search title="Clear">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}
