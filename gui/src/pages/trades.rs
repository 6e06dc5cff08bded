#![allow(non_snake_case)]
use dioxus::prelude::*;
use engine::analytics::trade_stats;
use engine::feed::WidgetFeed;
use engine::render::{SeriesKind, SeriesSpec};
use shared::models::{Period, TradeData, TradeSide};
use shared::utils::french_format::{format_decimal, format_percent, format_price};
use shared::utils::time::display_api_timestamp;

use super::{feed_view, use_default_symbol, PageFilters};
use crate::components::chart::{ChartRequest, ChartView};
use crate::components::feedback::{Card, StatCard};
use crate::config::AppConfig;
use crate::services::dashboard_client::{chart_records, DashboardClient};
use crate::services::fetch;
use crate::state::app_state::{AppState, SelectorMode};

type TradeFeed = WidgetFeed<(String, Period), Vec<TradeData>>;

fn side_label(side: TradeSide) -> (&'static str, &'static str) {
    match side {
        TradeSide::Buy => ("badge badge-success", "Achat"),
        TradeSide::Sell => ("badge badge-danger", "Vente"),
    }
}

fn price_series() -> Vec<SeriesSpec> {
    vec![SeriesSpec::new("price", "Prix Exécuté", "success", SeriesKind::Line)]
}

#[component]
pub fn TradesPage() -> Element {
    let client = use_context::<DashboardClient>();
    let config = use_context::<AppConfig>();
    let app = use_context::<Signal<AppState>>();
    let symbol = use_signal(String::new);
    let period = use_signal(|| app.peek().default_period);
    let feed = use_signal(TradeFeed::new);
    use_default_symbol(symbol, SelectorMode::Pair);

    let fetcher = move |(symbol, period): (String, Period)| {
        let client = client.clone();
        async move { client.trades(&symbol, period).await }
    };
    let load = {
        let fetcher = fetcher.clone();
        move || {
            let pair = symbol();
            if !pair.is_empty() {
                fetch::launch(feed, (pair, period()), fetcher.clone());
            }
        }
    };
    let on_load = load.clone();
    use_effect(move || on_load());

    let max_rows = config.tables.max_rows;
    let body = feed_view(
        feed,
        "Chargement des transactions...",
        move |_| fetch::retry(feed, fetcher.clone()),
        |trades, version| {
            let stats = trade_stats(trades);
            let buy_ratio = stats.buy_ratio;
            let sell_ratio = if trades.is_empty() { 0.0 } else { 100.0 - buy_ratio };
            rsx! {
                Card { title: "Historique des Prix", icon: "⚖",
                    ChartView {
                        records: chart_records(trades),
                        chart: ChartRequest::Series { x_key: "timestamp".to_string(), series: price_series() },
                        period: period(),
                        source_version: version,
                    }
                }
                div { class: "stat-grid",
                    StatCard { label: "Total transactions", value: trades.len().to_string() }
                    StatCard { label: "Achats (Buy)", value: stats.buys.to_string(), tone: "success" }
                    StatCard { label: "Ventes (Sell)", value: stats.sells.to_string(), tone: "danger" }
                    StatCard { label: "Volume total", value: format_decimal(stats.total_volume, 4) }
                }
                Card { title: "Ratio Achat/Vente", icon: "⚖",
                    div { class: "ratio-bar",
                        div { class: "ratio-buy", style: "width: {buy_ratio:.1}%;" }
                        div { class: "ratio-sell", style: "width: {sell_ratio:.1}%;" }
                    }
                    div { class: "ratio-legend",
                        span { class: "positive", "Achats: {format_percent(buy_ratio)}" }
                        span { class: "negative", "Ventes: {format_percent(sell_ratio)}" }
                    }
                }
                Card { title: "Transactions", subtitle: format!("{} transactions", trades.len()), icon: "☰",
                    TradeTable { trades: trades.iter().take(max_rows).cloned().collect::<Vec<_>>() }
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
                label: "Paire:",
                on_refresh: move |_| load(),
            }
            {body}
        }
    }
}

#[component]
fn TradeTable(trades: Vec<TradeData>) -> Element {
    if trades.is_empty() {
        return rsx! { p { class: "empty", "Aucune transaction disponible" } };
    }
    rsx! {
        div { class: "table-wrap",
            table { class: "data-table",
                thead {
                    tr {
                        th { "Horodatage" }
                        th { "Paire" }
                        th { "Type" }
                        th { "Prix" }
                        th { "Volume" }
                        th { "Valeur USD" }
                    }
                }
                tbody {
                    for (i, trade) in trades.iter().enumerate() {
                        tr { key: "{i}",
                            td { class: "muted", "{display_api_timestamp(&trade.timestamp)}" }
                            td { class: "strong", "{trade.pair}" }
                            td {
                                span { class: "{side_label(trade.side).0}", "{side_label(trade.side).1}" }
                            }
                            td { "${format_price(trade.price)}" }
                            td { "{format_decimal(trade.volume, 6)}" }
                            td { "${format_decimal(trade.price * trade.volume, 2)}" }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_labels() {
        assert_eq!(side_label(TradeSide::Buy).1, "Achat");
        assert_eq!(side_label(TradeSide::Sell).0, "badge badge-danger");
    }

    #[test]
    fn test_trade_chart_draws_executed_price() {
        let series = price_series();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].key, "price");
        assert_eq!(series[0].kind, SeriesKind::Line);
    }
}
