#![allow(non_snake_case)]
use dioxus::prelude::*;
use engine::analytics::article_stats;
use engine::feed::WidgetFeed;
use shared::models::{ArticleData, Period, SentimentLabel};
use shared::utils::french_format::format_decimal;
use shared::utils::time::{format_date, parse_timestamp_millis};

use super::{feed_view, sentiment_class, PageFilters};
use crate::components::feedback::{Card, StatCard};
use crate::config::AppConfig;
use crate::services::dashboard_client::DashboardClient;
use crate::services::fetch;
use crate::state::app_state::{AppState, SelectorMode};

type ArticleFeed = WidgetFeed<(String, Period), Vec<ArticleData>>;

fn sentiment_icon(label: SentimentLabel) -> &'static str {
    match label {
        SentimentLabel::Positive => "🙂",
        SentimentLabel::Neutral => "😐",
        SentimentLabel::Negative => "🙁",
    }
}

fn published_on(timestamp: &str) -> String {
    parse_timestamp_millis(timestamp).map(format_date).unwrap_or_else(|| timestamp.to_string())
}

#[component]
pub fn ArticlesPage() -> Element {
    let client = use_context::<DashboardClient>();
    let config = use_context::<AppConfig>();
    let app = use_context::<Signal<AppState>>();
    let symbol = use_signal(String::new);
    let period = use_signal(|| app.peek().default_period);
    let feed = use_signal(ArticleFeed::new);

    let fetcher = move |(symbol, period): (String, Period)| {
        let client = client.clone();
        async move { client.articles(Some(symbol.as_str()), period).await }
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
        "Chargement des articles...",
        move |_| fetch::retry(feed, fetcher.clone()),
        |articles, _| {
            let stats = article_stats(articles);
            let shown: Vec<ArticleData> = articles.iter().take(max_rows).cloned().collect();
            rsx! {
                div { class: "stat-grid",
                    StatCard { label: "Total articles", value: stats.total.to_string() }
                    StatCard { label: "Positifs 🙂", value: stats.labels.positive.to_string(), tone: "success" }
                    StatCard { label: "Négatifs 🙁", value: stats.labels.negative.to_string(), tone: "danger" }
                    StatCard { label: "Sources", value: stats.sources.len().to_string(), tone: "primary" }
                }
                Card { title: "Articles récents", subtitle: format!("{} articles", stats.total), icon: "📰",
                    if shown.is_empty() {
                        p { class: "empty", "Aucun article trouvé pour cette période" }
                    }
                    div { class: "article-list",
                        for (i, article) in shown.into_iter().enumerate() {
                            ArticleItem { key: "{i}", article: article }
                        }
                    }
                }
            }
        },
    );

    rsx! {
        div { class: "page",
            PageFilters { symbol: symbol, period: period, mode: SelectorMode::Symbol, show_all: true, on_refresh: move |_| load() }
            {body}
        }
    }
}

#[component]
fn ArticleItem(article: ArticleData) -> Element {
    let score = format_decimal(article.sentiment_score * 100.0, 0);
    rsx! {
        article { class: "article-item",
            div { class: "article-meta",
                span { class: "badge {sentiment_class(article.sentiment_label)}",
                    "{sentiment_icon(article.sentiment_label)} {score}%"
                }
                span { class: "muted", "{article.website}" }
                span { class: "muted", "{published_on(&article.timestamp)}" }
            }
            h4 { class: "article-title",
                a { href: "{article.url}", target: "_blank", rel: "noopener noreferrer", "{article.title}" }
            }
            p { class: "article-summary", "{article.summary}" }
            if !article.cryptocurrencies_mentioned.is_empty() {
                div { class: "tags",
                    for crypto in article.cryptocurrencies_mentioned.iter() {
                        span { key: "{crypto}", class: "tag", "{crypto}" }
                    }
                }
            }
        }
    }
}
