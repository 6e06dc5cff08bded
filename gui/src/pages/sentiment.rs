#![allow(non_snake_case)]
use dioxus::prelude::*;
use engine::analytics::{sentiment_stats, Tone};
use engine::feed::WidgetFeed;
use engine::render::{SeriesKind, SeriesSpec};
use shared::models::{Period, SentimentData, SentimentLabel};
use shared::utils::french_format::{format_decimal, format_percent};
use shared::utils::time::display_api_timestamp;

use super::{feed_view, sentiment_class, sentiment_label_text, use_default_symbol, PageFilters};
use crate::components::chart::{ChartRequest, ChartView};
use crate::components::feedback::{Card, StatCard};
use crate::config::AppConfig;
use crate::services::dashboard_client::{chart_records, DashboardClient};
use crate::services::fetch;
use crate::state::app_state::{AppState, SelectorMode};

type SentimentFeed = WidgetFeed<(String, Period), Vec<SentimentData>>;

fn sentiment_series() -> Vec<SeriesSpec> {
    vec![
        SeriesSpec::new("sentiment_score", "Score (-1 à 1)", "primary", SeriesKind::Line),
        SeriesSpec::new("confidence", "Confiance", "muted", SeriesKind::Area),
    ]
}

fn emoji(label: SentimentLabel) -> &'static str {
    match label {
        SentimentLabel::Positive => "😊",
        SentimentLabel::Neutral => "😐",
        SentimentLabel::Negative => "😟",
    }
}

pub(crate) fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Positive => "success",
        Tone::Neutral => "warning",
        Tone::Negative => "danger",
    }
}

/// Percentage of `count` in `total`, 0 for an empty total.
fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

#[component]
pub fn SentimentPage() -> Element {
    let client = use_context::<DashboardClient>();
    let config = use_context::<AppConfig>();
    let app = use_context::<Signal<AppState>>();
    let symbol = use_signal(String::new);
    let period = use_signal(|| app.peek().default_period);
    let feed = use_signal(SentimentFeed::new);
    use_default_symbol(symbol, SelectorMode::Symbol);

    let fetcher = move |(symbol, period): (String, Period)| {
        let client = client.clone();
        async move { client.sentiment(&symbol, period).await }
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
        "Chargement du sentiment...",
        move |_| fetch::retry(feed, fetcher.clone()),
        |rows, version| {
            let stats = sentiment_stats(rows);
            let tone = stats.tone();
            let total = rows.len();
            let (positive, neutral, negative) = (stats.labels.positive, stats.labels.neutral, stats.labels.negative);
            let (positive_width, neutral_width, negative_width) =
                (share(positive, total), share(neutral, total), share(negative, total));
            rsx! {
                Card { title: "Tendance du Sentiment", icon: "📊",
                    ChartView {
                        records: chart_records(rows),
                        chart: ChartRequest::Series { x_key: "timestamp".to_string(), series: sentiment_series() },
                        period: period(),
                        source_version: version,
                    }
                }
                div { class: "stat-grid",
                    StatCard {
                        label: "Score moyen",
                        value: format!("{} ({})", format_decimal(stats.average_score, 2), tone.label()),
                        tone: tone_class(tone),
                    }
                    StatCard { label: "Positif 😊", value: positive.to_string(), tone: "success" }
                    StatCard { label: "Négatif 😟", value: negative.to_string(), tone: "danger" }
                    StatCard { label: "Confiance moyenne", value: format_percent(stats.average_confidence * 100.0) }
                }
                Card { title: "Distribution du sentiment", icon: "📊",
                    div { class: "distribution-bar",
                        if positive > 0 {
                            div { class: "segment positive", style: "width: {positive_width:.1}%;", "{positive}" }
                        }
                        if neutral > 0 {
                            div { class: "segment neutral", style: "width: {neutral_width:.1}%;", "{neutral}" }
                        }
                        if negative > 0 {
                            div { class: "segment negative", style: "width: {negative_width:.1}%;", "{negative}" }
                        }
                    }
                    div { class: "distribution-legend",
                        span { class: "positive", "Positif" }
                        span { "Neutre" }
                        span { class: "negative", "Négatif" }
                    }
                }
                Card { title: "Historique du sentiment", subtitle: format!("{} mesures", total), icon: "☰",
                    SentimentTable { rows: rows.iter().take(max_rows).cloned().collect::<Vec<_>>() }
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
fn SentimentTable(rows: Vec<SentimentData>) -> Element {
    if rows.is_empty() {
        return rsx! { p { class: "empty", "Aucune donnée de sentiment" } };
    }
    rsx! {
        div { class: "table-wrap",
            table { class: "data-table",
                thead {
                    tr {
                        th { "Horodatage" }
                        th { "Crypto" }
                        th { "Sentiment" }
                        th { "Score" }
                        th { "Confiance" }
                        th { "Source" }
                    }
                }
                tbody {
                    for (i, row) in rows.iter().enumerate() {
                        tr { key: "{i}",
                            td { class: "muted", "{display_api_timestamp(&row.timestamp)}" }
                            td { class: "strong", "{row.crypto_symbol}" }
                            td {
                                span { class: "badge {sentiment_class(row.sentiment_label)}",
                                    "{emoji(row.sentiment_label)} {sentiment_label_text(row.sentiment_label)}"
                                }
                            }
                            td { "{format_decimal(row.sentiment_score, 3)}" }
                            td { "{format_percent(row.confidence * 100.0)}" }
                            td { class: "muted", "{row.source}" }
                        }
                    }
                }
            }
        }
    }
}
