// Page filters: period buttons, crypto selector and refresh
#![allow(non_snake_case)]
use dioxus::prelude::*;
use shared::models::{CryptoConfiguration, Period};

use crate::state::app_state::{filter_cryptos, SelectorMode};

#[component]
pub fn PeriodSelector(value: Period, periods: Vec<Period>, on_change: EventHandler<Period>) -> Element {
    rsx! {
        div { class: "period-selector",
            for period in periods {
                button {
                    key: "{period}",
                    class: if period == value { "period active" } else { "period" },
                    onclick: move |_| on_change.call(period),
                    "{period.label()}"
                }
            }
        }
    }
}

/// Crypto picker over the configured cryptos, narrowed by a fuzzy filter.
#[component]
pub fn CryptoSelector(
    value: String,
    cryptos: Vec<CryptoConfiguration>,
    #[props(default)] mode: SelectorMode,
    #[props(default)] show_all: bool,
    #[props(default)] loading: bool,
    on_change: EventHandler<String>,
) -> Element {
    let mut query = use_signal(String::new);
    let matches: Vec<(String, String)> = filter_cryptos(&query.read(), &cryptos)
        .into_iter()
        .map(|c| (mode.value_for(&c.symbol), format!("{} - {}", c.symbol, c.name)))
        .collect();

    rsx! {
        div { class: "crypto-selector",
            input {
                r#type: "text",
                class: "crypto-filter",
                placeholder: "Filtrer…",
                value: "{query}",
                oninput: move |evt| query.set(evt.value()),
            }
            select {
                disabled: loading,
                value: "{value}",
                onchange: move |evt| on_change.call(evt.value()),
                if show_all {
                    option { value: "", "Toutes les cryptos" }
                }
                if loading {
                    option { "Chargement..." }
                } else {
                    for (option_value, label) in matches {
                        option {
                            key: "{option_value}",
                            value: "{option_value}",
                            selected: option_value == value,
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn RefreshButton(on_click: EventHandler<()>) -> Element {
    rsx! {
        button { class: "btn btn-icon", title: "Rafraîchir les données", onclick: move |_| on_click.call(()), "⟳" }
    }
}
