#![allow(non_snake_case)]
use dioxus::prelude::*;
use engine::feed::{HealthMonitor, HealthStatus};
use std::rc::Rc;

use crate::components::layout::{Header, Sidebar};
use crate::config::AppConfig;
use crate::pages::{
    load_cryptos, AlertsPage, ArticlesPage, ConfigurationPage, CryptoList, OverviewPage, PredictionsPage, PricesPage,
    SentimentPage, TradesPage,
};
use crate::services::dashboard_client::DashboardClient;
use crate::state::app_state::{AppState, Page};

const STYLE: &str = include_str!("../assets/style.css");

/// Root component. Expects [`AppConfig`] and [`DashboardClient`] in the launch context.
#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let client = use_context::<DashboardClient>();
    let theme = config.app.theme;
    let state = use_context_provider(|| Signal::new(AppState::new(theme)));
    let mut health = use_context_provider(|| Signal::new(HealthStatus::Checking));
    let cryptos = use_context_provider(|| Signal::new(CryptoList::new()));

    let monitor = {
        let client = client.clone();
        use_hook(move || Rc::new(HealthMonitor::spawn(client.api().clone(), client.health_interval())))
    };
    use_future(move || {
        let mut updates = monitor.subscribe();
        async move {
            loop {
                let status = updates.borrow_and_update().clone();
                health.set(status);
                if updates.changed().await.is_err() {
                    break;
                }
            }
        }
    });

    {
        let client = client.clone();
        use_effect(move || load_cryptos(cryptos, client.clone()));
    }

    let page = state.read().page;
    let palette = state.read().theme.palette();
    let variables = palette.css_variables();
    let content = match page {
        Page::Overview => rsx! { OverviewPage {} },
        Page::Prices => rsx! { PricesPage {} },
        Page::Trades => rsx! { TradesPage {} },
        Page::Sentiment => rsx! { SentimentPage {} },
        Page::Predictions => rsx! { PredictionsPage {} },
        Page::Articles => rsx! { ArticlesPage {} },
        Page::Alerts => rsx! { AlertsPage {} },
        Page::Configuration => rsx! { ConfigurationPage {} },
    };

    rsx! {
        style { "{STYLE}" }
        div { class: "app", style: "{variables}",
            Sidebar { title: config.app.title.clone(), api_url: client.api().base_url().to_string(), version: config.version.clone() }
            div { class: "main",
                Header { title: page.title() }
                {content}
            }
        }
    }
}
