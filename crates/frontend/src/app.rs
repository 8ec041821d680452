use crate::config::{load_config, Config};
use crate::domain::equipment::ui::list::EquipmentList;
use crate::domain::leases::ui::list::LeaseList;
use crate::shared::filter_engine::LocalStorage;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Page {
    Equipment,
    Leases,
}

impl Page {
    fn title(&self) -> &'static str {
        match self {
            Page::Equipment => "Equipment",
            Page::Leases => "Leases",
        }
    }

    fn icon_name(&self) -> &'static str {
        match self {
            Page::Equipment => "equipment",
            Page::Leases => "leases",
        }
    }
}

#[component]
fn Nav(active: RwSignal<Page>) -> impl IntoView {
    let item = move |page: Page| {
        view! {
            <Button
                appearance=move || if active.get() == page { ButtonAppearance::Primary } else { ButtonAppearance::Subtle }
                on_click=move |_| active.set(page)
            >
                {icon(page.icon_name())}
                {page.title()}
            </Button>
        }
    };

    view! {
        <nav class="app-nav">
            {item(Page::Equipment)}
            {item(Page::Leases)}
        </nav>
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = match load_config(&LocalStorage) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {}", e);
            return view! {
                <div class="alert alert--error">{format!("Configuration error: {}", e)}</div>
            }
            .into_any();
        }
    };
    log::debug!("Page size {}, search debounce {}ms", config.pagination.page_size, config.search.debounce_ms);
    provide_context::<Config>(config);

    let active = RwSignal::new(Page::Equipment);

    view! {
        <div class="app">
            <Nav active=active />
            <main class="app-content">
                {move || match active.get() {
                    Page::Equipment => view! { <EquipmentList /> }.into_any(),
                    Page::Leases => view! { <LeaseList /> }.into_any(),
                }}
            </main>
        </div>
    }
    .into_any()
}
