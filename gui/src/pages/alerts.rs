#![allow(non_snake_case)]
use dioxus::prelude::*;
use engine::analytics::alert_stats;
use engine::feed::WidgetFeed;
use shared::models::{AlertData, AlertType, Period};
use shared::utils::french_format::{format_decimal, format_percent, format_price, format_signed_percent};
use shared::utils::time::display_api_timestamp;

use super::{feed_view, PageFilters};
use crate::components::feedback::{Card, StatCard};
use crate::config::AppConfig;
use crate::services::dashboard_client::DashboardClient;
use crate::services::fetch;
use crate::state::app_state::{AppState, SelectorMode};

type AlertFeed = WidgetFeed<(String, Period), Vec<AlertData>>;

pub(crate) fn alert_badge(kind: AlertType) -> (&'static str, &'static str) {
    match kind {
        AlertType::PriceUp => ("badge badge-success", "📈 Hausse"),
        AlertType::PriceDown => ("badge badge-danger", "📉 Baisse"),
    }
}

fn change_class(change: f64) -> &'static str {
    if change >= 0.0 {
        "strong positive"
    } else {
        "strong negative"
    }
}

#[component]
pub fn AlertsPage() -> Element {
    let client = use_context::<DashboardClient>();
    let config = use_context::<AppConfig>();
    let app = use_context::<Signal<AppState>>();
    // Empty selection means every pair.
    let symbol = use_signal(String::new);
    let period = use_signal(|| app.peek().default_period);
    let feed = use_signal(AlertFeed::new);

    let fetcher = move |(symbol, period): (String, Period)| {
        let client = client.clone();
        async move { client.alerts(Some(symbol.as_str()), period).await }
    };
    let load = {
        let fetcher = fetcher.clone();
        move || fetch::launch(feed, (symbol(), period()), fetcher.clone())
    };
    let on_load = load.clone();
    use_effect(move || on_load());

    let max_rows = config.tables.max_rows;
    let body = feed_view(
        feed,
        "Chargement des alertes...",
        move |_| fetch::retry(feed, fetcher.clone()),
        |alerts, _| {
            let stats = alert_stats(alerts);
            let total = alerts.len().max(1) as f64;
            let up_width = stats.up as f64 / total * 100.0;
            let down_width = stats.down as f64 / total * 100.0;
            rsx! {
                div { class: "stat-grid",
                    StatCard { label: "Total alertes", value: alerts.len().to_string() }
                    StatCard { label: "Hausses 📈", value: stats.up.to_string(), tone: "success" }
                    StatCard { label: "Baisses 📉", value: stats.down.to_string(), tone: "danger" }
                    StatCard { label: "Variation max", value: format_percent(stats.max_abs_change), tone: "warning" }
                }
                Card { title: "Distribution des alertes", icon: "📊",
                    div { class: "distribution",
                        div { class: "distribution-main",
                            div { class: "distribution-legend",
                                span { class: "positive", "Hausses ({stats.up})" }
                                span { class: "negative", "Baisses ({stats.down})" }
                            }
                            div { class: "distribution-bar",
                                if stats.up > 0 {
                                    div { class: "segment positive", style: "width: {up_width:.1}%;", "{stats.up}" }
                                }
                                if stats.down > 0 {
                                    div { class: "segment negative", style: "width: {down_width:.1}%;", "{stats.down}" }
                                }
                            }
                        }
                        div { class: "distribution-side",
                            p { class: "stat-label", "Variation moyenne" }
                            p { class: "stat-value", "{format_percent(stats.mean_abs_change)}" }
                        }
                    }
                }
                Card { title: "Historique des alertes", subtitle: format!("{} alertes", alerts.len()), icon: "🔔",
                    AlertTable { alerts: alerts.iter().take(max_rows).cloned().collect::<Vec<_>>() }
                }
            }
        },
    );

    rsx! {
        div { class: "page",
            PageFilters {
                symbol: symbol,
                period: period,
                mode: SelectorMode::Pair,
                show_all: true,
                label: "Paire:",
                on_refresh: move |_| load(),
            }
            {body}
        }
    }
}

#[component]
pub(crate) fn AlertTable(alerts: Vec<AlertData>) -> Element {
    rsx! {
        div { class: "table-wrap",
            table { class: "data-table",
                thead {
                    tr {
                        th { "Horodatage" }
                        th { "Paire" }
                        th { "Type" }
                        th { "Variation" }
                        th { "Prix" }
                        th { "Seuil" }
                    }
                }
                tbody {
                    if alerts.is_empty() {
                        tr {
                            td { colspan: "6", class: "empty", "Aucune alerte pour cette période" }
                        }
                    }
                    for (i, alert) in alerts.iter().enumerate() {
                        tr { key: "{i}",
                            td { class: "muted", "{display_api_timestamp(&alert.timestamp)}" }
                            td { class: "strong", "{alert.pair}" }
                            td {
                                span { class: "{alert_badge(alert.alert_type).0}", "{alert_badge(alert.alert_type).1}" }
                            }
                            td { class: "{change_class(alert.change_percent)}", "{format_signed_percent(alert.change_percent)}" }
                            td { class: "mono", "${format_price(alert.last_price)}" }
                            td { class: "muted", "{format_decimal(alert.threshold, 1)} %" }
                        }
                    }
                }
            }
        }
    }
}
