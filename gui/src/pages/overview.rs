// Market overview: headline stats, recent activity and the saved visualization widgets.
#![allow(non_snake_case)]
use dioxus::prelude::*;
use engine::analytics::{configuration_counts, latest_per_pair, sentiment_stats};
use engine::feed::WidgetFeed;
use engine::render::{SeriesKind, SeriesSpec};
use shared::models::Period;
use shared::utils::base_symbol;
use shared::utils::french_format::{format_decimal, format_price, format_signed_percent};

use super::alerts::alert_badge;
use super::sentiment::tone_class;
use super::{feed_view, sentiment_class, sentiment_label_text};
use crate::components::chart::{ChartRequest, ChartView};
use crate::components::feedback::{Card, StatCard};
use crate::components::visualization::{load_visualizations, VisualizationList, VisualizationManager, VisualizationWidget};
use crate::services::dashboard_client::{chart_records, DashboardClient, OverviewSnapshot};
use crate::services::fetch;

type OverviewFeed = WidgetFeed<(), OverviewSnapshot>;

fn overview_prediction_series() -> Vec<SeriesSpec> {
    vec![
        SeriesSpec::new("predicted_price", "Prédit", "primary", SeriesKind::Line),
        SeriesSpec::new("actual_price", "Réel", "success", SeriesKind::Line),
    ]
}

fn overview_trade_series() -> Vec<SeriesSpec> {
    vec![SeriesSpec::new("price", "Prix d'exécution", "success", SeriesKind::Line)]
}

/// Symbol the prediction card is about: the first active crypto.
fn prediction_subject(snapshot: &OverviewSnapshot) -> Option<String> {
    snapshot.cryptos.iter().find(|c| c.is_active).map(|c| base_symbol(&c.symbol).to_string())
}

#[component]
pub fn OverviewPage() -> Element {
    let client = use_context::<DashboardClient>();
    let feed = use_signal(OverviewFeed::new);
    let visualizations = use_signal(VisualizationList::new);
    let list_client = client.clone();

    let fetcher = move |_: ()| {
        let client = client.clone();
        async move { client.overview().await }
    };
    {
        let fetcher = fetcher.clone();
        let client = list_client;
        use_effect(move || {
            fetch::launch(feed, (), fetcher.clone());
            load_visualizations(visualizations, client.clone());
        });
    }

    let body = feed_view(
        feed,
        "Chargement du tableau de bord...",
        move |_| fetch::retry(feed, fetcher.clone()),
        |snapshot, version| {
            let counts = configuration_counts(&snapshot.cryptos);
            let sentiment = sentiment_stats(&snapshot.sentiments);
            let tone = sentiment.tone();
            let tickers: Vec<_> = latest_per_pair(&snapshot.tickers).into_iter().cloned().collect();
            let subject = prediction_subject(snapshot);
            rsx! {
                div { class: "stat-grid",
                    StatCard { label: "Cryptos suivies", value: counts.active.to_string(), tone: "primary" }
                    StatCard { label: "Alertes (24h)", value: snapshot.alerts.len().to_string(), tone: "warning" }
                    StatCard {
                        label: "Sentiment moyen",
                        value: format!("{} %", format_decimal(sentiment.average_score * 100.0, 0)),
                        tone: tone_class(tone),
                    }
                    StatCard { label: "Transactions (24h)", value: snapshot.trades.len().to_string(), tone: "success" }
                }
                div { class: "overview-grid",
                    if !snapshot.predictions.is_empty() {
                        Card { title: format!("Prédictions ({})", subject.unwrap_or_default()), icon: "📈",
                            ChartView {
                                records: chart_records(&snapshot.predictions),
                                chart: ChartRequest::Series { x_key: "timestamp".to_string(), series: overview_prediction_series() },
                                period: Period::Hour24,
                                source_version: version,
                            }
                        }
                    }
                    if !snapshot.trades.is_empty() {
                        Card { title: "Transactions", icon: "⚡",
                            ChartView {
                                records: chart_records(&snapshot.trades),
                                chart: ChartRequest::Series { x_key: "timestamp".to_string(), series: overview_trade_series() },
                                period: Period::Hour24,
                                source_version: version,
                            }
                        }
                    }
                    Card { title: "Prix en temps réel", subtitle: "Derniers prix enregistrés", icon: "💰",
                        if tickers.is_empty() {
                            p { class: "empty", "Aucune donnée de prix" }
                        }
                        ul { class: "compact-list",
                            for ticker in tickers {
                                li { key: "{ticker.pair}",
                                    span { class: "strong", "{ticker.pair}" }
                                    span { class: "mono", "${format_price(ticker.last)}" }
                                }
                            }
                        }
                    }
                    Card { title: "Alertes récentes", subtitle: "Variations significatives", icon: "🔔",
                        if snapshot.alerts.is_empty() {
                            p { class: "empty", "Aucune alerte récente" }
                        }
                        ul { class: "compact-list",
                            for (i, alert) in snapshot.alerts.iter().enumerate() {
                                li { key: "{i}",
                                    span { class: "{alert_badge(alert.alert_type).0}", "{alert_badge(alert.alert_type).1}" }
                                    span { class: "strong", "{alert.pair}" }
                                    span { "{format_signed_percent(alert.change_percent)}" }
                                }
                            }
                        }
                    }
                    Card { title: "Analyse de sentiment", subtitle: "Sentiment récent du marché", icon: "🎭",
                        if snapshot.sentiments.is_empty() {
                            p { class: "empty", "Aucune donnée de sentiment" }
                        }
                        ul { class: "compact-list",
                            for row in snapshot.sentiments.iter() {
                                li { key: "{row.crypto_symbol}",
                                    span { class: "strong", "{row.crypto_symbol}" }
                                    span { class: "badge {sentiment_class(row.sentiment_label)}", "{sentiment_label_text(row.sentiment_label)}" }
                                    span { class: "mono", "{format_decimal(row.sentiment_score * 100.0, 0)} %" }
                                }
                            }
                        }
                    }
                    Card { title: "Cryptos configurées", subtitle: "Liste des cryptos suivies", icon: "⚙",
                        ul { class: "compact-list",
                            for crypto in snapshot.cryptos.iter() {
                                li { key: "{crypto.id}",
                                    span { class: "strong", "{crypto.symbol}" }
                                    span { class: "muted", "{crypto.name}" }
                                    span { class: if crypto.is_active { "badge badge-success" } else { "badge badge-neutral" },
                                        if crypto.is_active { "Active" } else { "Inactive" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    );

    let saved = visualizations.read().data().cloned().unwrap_or_default();

    rsx! {
        div { class: "page",
            {body}
            if !saved.is_empty() {
                div { class: "widget-grid",
                    for config in saved {
                        VisualizationWidget { key: "{config.id}-{config.updated_at}", config: config }
                    }
                }
            }
            VisualizationManager { list: visualizations }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CryptoConfiguration;

    fn crypto(id: u64, symbol: &str, active: bool) -> CryptoConfiguration {
        CryptoConfiguration {
            id,
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            is_active: active,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_prediction_subject_is_first_active_base_symbol() {
        let snapshot = OverviewSnapshot {
            cryptos: vec![crypto(1, "DOGE/USD", false), crypto(2, "ETH/USD", true), crypto(3, "BTC", true)],
            ..OverviewSnapshot::default()
        };
        assert_eq!(prediction_subject(&snapshot).as_deref(), Some("ETH"));
        assert_eq!(prediction_subject(&OverviewSnapshot::default()), None);
    }

    #[test]
    fn test_overview_series_keys() {
        assert_eq!(overview_prediction_series()[1].key, "actual_price");
        assert_eq!(overview_trade_series()[0].key, "price");
    }
}
