#![allow(non_snake_case)]
use dioxus::prelude::*;
use engine::analytics::price_stats;
use engine::feed::WidgetFeed;
use engine::render::PriceChartSpec;
use shared::models::{ChartKind, Period, TickerData};
use shared::utils::french_format::{format_decimal, format_price};
use shared::utils::time::display_api_timestamp;

use super::{feed_view, use_default_symbol, PageFilters, PAGE_PERIODS};
use crate::components::chart::{ChartRequest, ChartView};
use crate::components::feedback::{Card, StatCard};
use crate::config::AppConfig;
use crate::services::dashboard_client::{chart_records, DashboardClient};
use crate::services::fetch;
use crate::state::app_state::{AppState, SelectorMode};

type TickerFeed = WidgetFeed<(String, Period), Vec<TickerData>>;

fn price_periods() -> Vec<Period> {
    let mut periods = vec![Period::Live];
    periods.extend(PAGE_PERIODS);
    periods
}

#[component]
pub fn PricesPage() -> Element {
    let client = use_context::<DashboardClient>();
    let config = use_context::<AppConfig>();
    let app = use_context::<Signal<AppState>>();
    let symbol = use_signal(String::new);
    let period = use_signal(|| app.peek().default_period);
    let feed = use_signal(TickerFeed::new);
    use_default_symbol(symbol, SelectorMode::Pair);
    let live_interval = client.live_refresh_interval();

    let fetcher = move |(symbol, period): (String, Period)| {
        let client = client.clone();
        async move { client.tickers(&symbol, period).await }
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

    let live_fetcher = fetcher.clone();
    use_future(move || {
        let fetcher = live_fetcher.clone();
        async move {
            loop {
                tokio::time::sleep(live_interval).await;
                if *period.peek() == Period::Live && !feed.peek().is_loading() {
                    fetch::retry(feed, fetcher.clone());
                }
            }
        }
    });

    let max_rows = config.tables.max_rows;
    let retry_fetcher = fetcher.clone();
    let body = feed_view(
        feed,
        "Chargement des prix...",
        move |_| fetch::retry(feed, retry_fetcher.clone()),
        |tickers, version| {
            let stats = price_stats(tickers);
            let pair = symbol();
            let current = period();
            let spec = PriceChartSpec::new(ChartKind::Candlestick).with_label(pair.clone());
            rsx! {
                div { class: "stat-grid",
                    StatCard { label: "Prix actuel", value: format!("${}", format_price(stats.latest)) }
                    StatCard { label: "Prix minimum", value: format!("${}", format_price(stats.min)), tone: "danger" }
                    StatCard { label: "Prix maximum", value: format!("${}", format_price(stats.max)), tone: "success" }
                    StatCard { label: "Prix moyen", value: format!("${}", format_price(stats.average)), tone: "primary" }
                }
                Card { title: "Évolution du prix", subtitle: format!("{} - {}", pair, current), icon: "📈",
                    ChartView {
                        records: chart_records(tickers),
                        chart: ChartRequest::Price(spec),
                        period: current,
                        source_version: version,
                        height: 256,
                    }
                }
                Card { title: "Historique détaillé", subtitle: format!("{} entrées", tickers.len()), icon: "☰",
                    TickerTable { tickers: tickers.iter().take(max_rows).cloned().collect::<Vec<_>>() }
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
                periods: price_periods(),
                label: "Paire:",
                on_refresh: move |_| load(),
            }
            {body}
        }
    }
}

#[component]
fn TickerTable(tickers: Vec<TickerData>) -> Element {
    if tickers.is_empty() {
        return rsx! { p { class: "empty", "Aucune donnée disponible" } };
    }
    rsx! {
        div { class: "table-wrap",
            table { class: "data-table",
                thead {
                    tr {
                        th { "Horodatage" }
                        th { "Paire" }
                        th { "Dernier prix" }
                        th { "Bid" }
                        th { "Ask" }
                        th { "Spread" }
                        th { "Volume 24h" }
                    }
                }
                tbody {
                    for (i, ticker) in tickers.iter().enumerate() {
                        tr { key: "{i}",
                            td { class: "muted", "{display_api_timestamp(&ticker.timestamp)}" }
                            td { class: "strong", "{ticker.pair}" }
                            td { "${format_price(ticker.last)}" }
                            td { class: "positive", "${format_price(ticker.bid)}" }
                            td { class: "negative", "${format_price(ticker.ask)}" }
                            td { class: "muted", "${format_price(ticker.ask - ticker.bid)}" }
                            td { "{format_decimal(ticker.volume_24h, 2)}" }
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
    fn test_prices_page_offers_live_first() {
        let periods = price_periods();
        assert_eq!(periods[0], Period::Live);
        assert_eq!(periods.len(), PAGE_PERIODS.len() + 1);
    }
}
