// Dashboard pages and the pieces they share
#![allow(non_snake_case)]
pub mod alerts;
pub mod articles;
pub mod configuration;
pub mod overview;
pub mod predictions;
pub mod prices;
pub mod sentiment;
pub mod trades;

use dioxus::prelude::*;
use engine::feed::WidgetFeed;
use shared::models::{CryptoConfiguration, Period, SentimentLabel};

use crate::components::controls::{CryptoSelector, PeriodSelector, RefreshButton};
use crate::components::feedback::{ErrorPanel, LoadingIndicator};
use crate::services::dashboard_client::DashboardClient;
use crate::services::fetch;
use crate::state::app_state::SelectorMode;

pub use alerts::AlertsPage;
pub use articles::ArticlesPage;
pub use configuration::ConfigurationPage;
pub use overview::OverviewPage;
pub use predictions::PredictionsPage;
pub use prices::PricesPage;
pub use sentiment::SentimentPage;
pub use trades::TradesPage;

/// Periods offered by the history pages.
pub const PAGE_PERIODS: [Period; 4] = [Period::Hour1, Period::Hour24, Period::Day7, Period::Day30];

/// Configured cryptos, shared by every selector through the context.
pub type CryptoList = WidgetFeed<(), Vec<CryptoConfiguration>>;

pub fn sentiment_label_text(label: SentimentLabel) -> &'static str {
    match label {
        SentimentLabel::Positive => "Positif",
        SentimentLabel::Neutral => "Neutre",
        SentimentLabel::Negative => "Négatif",
    }
}

/// Table cell class for a sentiment label.
pub fn sentiment_class(label: SentimentLabel) -> &'static str {
    match label {
        SentimentLabel::Positive => "positive",
        SentimentLabel::Neutral => "neutral",
        SentimentLabel::Negative => "negative",
    }
}

pub fn load_cryptos(list: Signal<CryptoList>, client: DashboardClient) {
    fetch::launch(list, (), move |_| async move { client.cryptos().await });
}

/// Selects the first active crypto once the list arrives, unless a symbol is already set.
pub fn use_default_symbol(mut symbol: Signal<String>, mode: SelectorMode) {
    let cryptos = use_context::<Signal<CryptoList>>();
    use_effect(move || {
        let first = cryptos
            .read()
            .data()
            .and_then(|list| list.iter().find(|c| c.is_active))
            .map(|c| mode.value_for(&c.symbol));
        if let Some(first) = first {
            if symbol.peek().is_empty() {
                symbol.set(first);
            }
        }
    });
}

/// Loading / error / data switch for one page feed. Stale data stays visible while reloading;
/// `ready` also gets the feed generation, which versions the data for chart hover.
pub fn feed_view<P, T>(
    feed: Signal<WidgetFeed<P, T>>,
    loading_text: &str,
    on_retry: impl FnMut(()) + 'static,
    ready: impl FnOnce(&T, u64) -> Element,
) -> Element
where
    P: Clone + 'static,
    T: 'static,
{
    let state = feed.read();
    if let Some(message) = state.error() {
        let message = message.to_string();
        return rsx! {
            ErrorPanel { message: message, on_retry: on_retry }
        };
    }
    match state.data() {
        Some(data) => ready(data, state.generation()),
        None => {
            let text = loading_text.to_string();
            rsx! { LoadingIndicator { text: text } }
        }
    }
}

#[component]
pub fn PageFilters(
    symbol: Signal<String>,
    period: Signal<Period>,
    #[props(default)] mode: SelectorMode,
    #[props(default)] show_all: bool,
    #[props(default = PAGE_PERIODS.to_vec())] periods: Vec<Period>,
    #[props(into, default = "Crypto:".to_string())] label: String,
    on_refresh: EventHandler<()>,
) -> Element {
    let cryptos = use_context::<Signal<CryptoList>>();
    let list = cryptos.read().data().cloned().unwrap_or_default();
    let loading = cryptos.read().is_loading();
    let selected = symbol();
    let current_period = period();

    rsx! {
        div { class: "filters",
            div { class: "filter",
                span { class: "filter-label", "{label}" }
                CryptoSelector {
                    value: selected,
                    cryptos: list,
                    mode: mode,
                    show_all: show_all,
                    loading: loading,
                    on_change: move |value: String| symbol.set(value),
                }
            }
            PeriodSelector {
                value: current_period,
                periods: periods,
                on_change: move |p: Period| period.set(p),
            }
            RefreshButton { on_click: move |_| on_refresh.call(()) }
        }
    }
}
