#![allow(non_snake_case)]
use dioxus::prelude::*;
use engine::analytics::{prediction_error_percent, prediction_stats};
use engine::feed::WidgetFeed;
use engine::render::{SeriesKind, SeriesSpec};
use shared::models::{Period, PredictionData};
use shared::utils::french_format::{format_decimal, format_price};
use shared::utils::time::display_api_timestamp;

use super::{feed_view, use_default_symbol, PageFilters};
use crate::components::chart::{ChartRequest, ChartView};
use crate::components::feedback::{Card, StatCard};
use crate::config::AppConfig;
use crate::services::dashboard_client::{chart_records, DashboardClient};
use crate::services::fetch;
use crate::state::app_state::{AppState, SelectorMode};

type PredictionFeed = WidgetFeed<(String, Period), Vec<PredictionData>>;

pub(crate) fn prediction_series() -> Vec<SeriesSpec> {
    vec![
        SeriesSpec::new("predicted_price", "Prix Prédit", "primary", SeriesKind::Line),
        SeriesSpec::new("actual_price", "Prix Réel", "success", SeriesKind::Line),
    ]
}

/// Whether the actual price fell inside the confidence interval; `None` without both.
fn within_interval(row: &PredictionData) -> Option<bool> {
    match (row.actual_price, row.confidence_interval_low, row.confidence_interval_high) {
        (Some(actual), Some(low), Some(high)) => Some(actual >= low && actual <= high),
        _ => None,
    }
}

fn optional_price(value: Option<f64>) -> String {
    value.map(|v| format!("${}", format_price(v))).unwrap_or_else(|| "N/A".to_string())
}

fn interval_text(row: &PredictionData) -> String {
    match (row.confidence_interval_low, row.confidence_interval_high) {
        (Some(low), Some(high)) => format!("${} - ${}", format_price(low), format_price(high)),
        _ => "--".to_string(),
    }
}

fn error_badge(row: &PredictionData) -> Option<(&'static str, String)> {
    let error = prediction_error_percent(row)?;
    let (class, mark) = match within_interval(row) {
        Some(true) => ("badge badge-success", "✓"),
        _ => ("badge badge-danger", "✗"),
    };
    Some((class, format!("{} {} %", mark, format_decimal(error, 2))))
}

#[component]
pub fn PredictionsPage() -> Element {
    let client = use_context::<DashboardClient>();
    let config = use_context::<AppConfig>();
    let app = use_context::<Signal<AppState>>();
    let symbol = use_signal(String::new);
    let period = use_signal(|| app.peek().default_period);
    let feed = use_signal(PredictionFeed::new);
    use_default_symbol(symbol, SelectorMode::Symbol);

    let fetcher = move |(symbol, period): (String, Period)| {
        let client = client.clone();
        async move { client.predictions(&symbol, period).await }
    };
    let load = {
        let fetcher = fetcher.clone();
        move || {
            let crypto = symbol();
            if !crypto.is_empty() {
                fetch::launch(feed, (crypto, period()), fetcher.clone());
            }
        }
    };
    let on_load = load.clone();
    use_effect(move || on_load());

    let max_rows = config.tables.max_rows;
    let body = feed_view(
        feed,
        "Chargement des prédictions...",
        move |_| fetch::retry(feed, fetcher.clone()),
        |rows, version| {
            let stats = prediction_stats(rows);
            let latest = rows.first().cloned();
            rsx! {
                if let Some(latest) = latest {
                    Card { title: "Dernière prédiction", subtitle: format!("Modèle: {}", latest.model_name), icon: "🔮",
                        div { class: "highlight-grid",
                            div { class: "highlight",
                                p { class: "stat-label", "Prix prédit" }
                                p { class: "stat-value primary", "${format_price(latest.predicted_price)}" }
                            }
                            div { class: "highlight",
                                p { class: "stat-label", "Intervalle bas" }
                                p { class: "stat-value negative", "{optional_price(latest.confidence_interval_low)}" }
                            }
                            div { class: "highlight",
                                p { class: "stat-label", "Intervalle haut" }
                                p { class: "stat-value positive", "{optional_price(latest.confidence_interval_high)}" }
                            }
                        }
                    }
                }
                if !rows.is_empty() {
                    Card { title: "Prédiction vs Réalité", icon: "🔮",
                        ChartView {
                            records: chart_records(rows),
                            chart: ChartRequest::Series { x_key: "timestamp".to_string(), series: prediction_series() },
                            period: period(),
                            source_version: version,
                            height: 350,
                        }
                    }
                }
                div { class: "stat-grid",
                    StatCard { label: "Total prédictions", value: stats.total.to_string() }
                    StatCard { label: "Avec prix réel", value: stats.with_actual.to_string() }
                    StatCard { label: "Erreur moyenne", value: format!("{} %", format_decimal(stats.mean_error_percent, 2)) }
                }
                Card { title: "Historique des prédictions", subtitle: format!("{} prédictions", rows.len()), icon: "☰",
                    PredictionTable { rows: rows.iter().take(max_rows).cloned().collect::<Vec<_>>() }
                }
            }
        },
    );

    rsx! {
        div { class: "page",
            PageFilters { symbol: symbol, period: period, on_refresh: move |_| load() }
            {body}
        }
    }
}

#[component]
fn PredictionTable(rows: Vec<PredictionData>) -> Element {
    if rows.is_empty() {
        return rsx! { p { class: "empty", "Aucune prédiction disponible" } };
    }
    rsx! {
        div { class: "table-wrap",
            table { class: "data-table",
                thead {
                    tr {
                        th { "Horodatage" }
                        th { "Crypto" }
                        th { "Prix prédit" }
                        th { "Prix réel" }
                        th { "Intervalle" }
                        th { "Erreur" }
                        th { "Modèle" }
                    }
                }
                tbody {
                    for (i, row) in rows.iter().enumerate() {
                        tr { key: "{i}",
                            td { class: "muted", "{display_api_timestamp(&row.timestamp)}" }
                            td { class: "strong", "{row.crypto_symbol}" }
                            td { class: "mono primary", "${format_price(row.predicted_price)}" }
                            td { class: "mono",
                                if let Some(actual) = row.actual_price {
                                    "${format_price(actual)}"
                                } else {
                                    span { class: "muted", "--" }
                                }
                            }
                            td { class: "mono muted", "{interval_text(row)}" }
                            td {
                                if let Some((class, text)) = error_badge(row) {
                                    span { class: "{class}", "{text}" }
                                } else {
                                    span { class: "muted", "--" }
                                }
                            }
                            td { class: "muted", "{row.model_name}" }
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

    fn row(actual: Option<f64>, low: Option<f64>, high: Option<f64>) -> PredictionData {
        PredictionData {
            timestamp: "2024-12-30T18:20:05Z".to_string(),
            crypto_symbol: "BTC".to_string(),
            predicted_price: 100.0,
            actual_price: actual,
            model_name: "lstm".to_string(),
            confidence_interval_low: low,
            confidence_interval_high: high,
        }
    }

    #[test]
    fn test_within_interval() {
        assert_eq!(within_interval(&row(Some(95.0), Some(90.0), Some(110.0))), Some(true));
        assert_eq!(within_interval(&row(Some(120.0), Some(90.0), Some(110.0))), Some(false));
        assert_eq!(within_interval(&row(Some(95.0), None, Some(110.0))), None);
    }

    #[test]
    fn test_error_badge_marks_out_of_interval_predictions() {
        let (class, text) = error_badge(&row(Some(80.0), Some(90.0), Some(110.0))).unwrap();
        assert_eq!(class, "badge badge-danger");
        assert_eq!(text, "✗ 25,00 %");
        assert!(error_badge(&row(None, None, None)).is_none());
    }

    #[test]
    fn test_interval_text_needs_both_bounds() {
        assert_eq!(interval_text(&row(None, Some(90.0), None)), "--");
        assert_eq!(interval_text(&row(None, Some(90.0), Some(110.0))), "$90,000 - $110,000");
    }
}
