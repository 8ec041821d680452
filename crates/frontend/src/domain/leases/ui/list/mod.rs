pub mod state;

use self::state::{categories_from, create_state, LeaseRow};
use crate::config::Config;
use crate::domain::leases::api::fetch_leases;
use crate::shared::components::ui::badge::Badge as UiBadge;
use crate::shared::filter_engine::LocalStorage;
use crate::shared::icons::icon;
use crate::shared::list_controls::{load_into, ListFilterBar, ListStatus};
use crate::shared::list_utils::{get_sort_indicator, highlight_matches};
use contracts::domain::lease::{BalanceTier, LeaseStatus};
use leptos::prelude::*;
use std::sync::Arc;
use thaw::*;

fn status_variant(status: LeaseStatus) -> &'static str {
    match status {
        LeaseStatus::Active => "success",
        LeaseStatus::Pending => "primary",
        LeaseStatus::Expired => "neutral",
        LeaseStatus::Terminated => "error",
    }
}

fn balance_variant(tier: BalanceTier) -> &'static str {
    match tier {
        BalanceTier::Paid => "success",
        BalanceTier::Owing => "warning",
        BalanceTier::Overdue => "error",
    }
}

fn format_money(value: f64) -> String {
    format!("${:.2}", value)
}

#[component]
#[allow(non_snake_case)]
pub fn LeaseList() -> impl IntoView {
    let config = use_context::<Config>().expect("Config context not found");
    let controller = create_state(&config, Arc::new(LocalStorage));
    let search = Signal::derive(move || controller.with(|c| c.search().to_string()));

    load_into(
        controller,
        async {
            fetch_leases()
                .await
                .map(|items| items.into_iter().map(LeaseRow::from).collect())
        },
        categories_from,
    );

    // Sortable column header
    let header = move |field: &'static str, label: &'static str| {
        view! {
            <TableHeaderCell resizable=false class="resizable">
                <div
                    class="table__sortable-header"
                    style="cursor: pointer;"
                    on:click=move |_| controller.update(|c| c.sort_by(field))
                >
                    {label}
                    <span class="sort-indicator">
                        {move || controller.with(|c| {
                            let sort = c.sort();
                            get_sort_indicator(sort.map(|s| s.field.as_str()), field, sort.map(|s| s.ascending).unwrap_or(true))
                        })}
                    </span>
                </div>
            </TableHeaderCell>
        }
    };

    view! {
        <div class="page">
            <div class="page__header">
                <h2 class="page__title">{icon("leases")}"Leases"</h2>
            </div>

            <ListFilterBar
                controller=controller
                search_placeholder="Search tenant, property, unit..."
                debounce_ms=config.search.debounce_ms
            />
            <ListStatus controller=controller />

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            {header("tenant", "Tenant")}
                            {header("property", "Property / Unit")}
                            {header("status", "Status")}
                            {header("start_date", "Term")}
                            {header("monthly_rent", "Rent")}
                            {header("balance", "Balance")}
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            controller
                                .with(|c| c.page_items().into_iter().cloned().collect::<Vec<_>>())
                                .into_iter()
                                .map(|row| {
                                    let tenant = row.tenant_name.clone();
                                    let location = row.location();
                                    let term = row.term();
                                    let rent = format_money(row.monthly_rent);
                                    let balance = format_money(row.balance);
                                    let status_class = status_variant(row.status).to_string();
                                    let status_label = row.status.display_name();
                                    let balance_class = balance_variant(row.balance_tier).to_string();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {move || highlight_matches(&tenant, &search.get())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {move || highlight_matches(&location, &search.get())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <UiBadge variant=status_class>
                                                    {status_label}
                                                </UiBadge>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{term}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{rent}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <UiBadge variant=balance_class>
                                                    {balance}
                                                </UiBadge>
                                            </TableCell>
                                        </TableRow>
                                    }
                                })
                                .collect_view()
                        }}
                    </TableBody>
                </Table>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1200.0), "$1200.00");
        assert_eq!(format_money(-50.5), "$-50.50");
    }

    #[test]
    fn test_badge_variants() {
        assert_eq!(status_variant(LeaseStatus::Active), "success");
        assert_eq!(status_variant(LeaseStatus::Terminated), "error");
        assert_eq!(balance_variant(BalanceTier::Paid), "success");
        assert_eq!(balance_variant(BalanceTier::Overdue), "error");
    }
}
