// Saved visualizations: one chart widget per configuration, and the CRUD manager.
#![allow(non_snake_case)]
use dioxus::prelude::*;
use engine::feed::WidgetFeed;
use shared::models::{ChartKind, Period, TickerData, VisualizationParameter};

use crate::components::chart::indicators::IndicatorBadges;
use crate::components::chart::{ChartRequest, ChartView};
use crate::components::feedback::{Card, ErrorPanel, LoadingIndicator, Notice};
use crate::config::AppConfig;
use crate::services::dashboard_client::{chart_records, DashboardClient};
use crate::services::fetch;
use crate::state::forms::{chart_kind_label, VisualizationForm, VISUALIZATION_PERIODS};

pub type VisualizationList = WidgetFeed<(), Vec<VisualizationParameter>>;

/// (Re)loads the saved visualizations into `list`.
pub fn load_visualizations(list: Signal<VisualizationList>, client: DashboardClient) {
    fetch::launch(list, (), move |_| async move { client.visualizations().await });
}

/// Chart of one saved visualization. Key it by id and update time so an edit remounts it.
#[component]
pub fn VisualizationWidget(config: VisualizationParameter) -> Element {
    let client = use_context::<DashboardClient>();
    let feed = use_signal(WidgetFeed::<(String, Period), Vec<TickerData>>::new);

    let period: Period = config.time_range.parse().unwrap_or_default();
    let ticker_fetch = {
        let client = client.clone();
        move |(symbol, period): (String, Period)| {
            let client = client.clone();
            async move { client.tickers(&symbol, period).await }
        }
    };

    let initial = (config.crypto_symbol.clone(), period);
    let first_fetch = ticker_fetch.clone();
    use_effect(move || fetch::launch(feed, initial.clone(), first_fetch.clone()));

    let state = feed.read();
    let indicators = config.indicators.to_vec();
    let spec = engine::visualization_chart_spec(config.chart_type, &config.crypto_symbol, &indicators);
    let body = if let Some(message) = state.error() {
        let message = message.to_string();
        rsx! {
            ErrorPanel { message: message, on_retry: move |_| fetch::retry(feed, ticker_fetch.clone()) }
        }
    } else if let Some(tickers) = state.data() {
        rsx! {
            ChartView {
                records: chart_records(tickers),
                chart: ChartRequest::Price(spec),
                period: period,
                source_version: state.generation(),
                show_axes: false,
                height: 256,
            }
        }
    } else {
        rsx! { LoadingIndicator {} }
    };

    rsx! {
        Card { title: config.name.clone(), subtitle: format!("{} - {}", config.crypto_symbol, config.time_range),
            div { class: "widget-body", {body} }
            IndicatorBadges { indicators: indicators, style: client.style().clone() }
        }
    }
}

#[component]
pub fn VisualizationManager(list: Signal<VisualizationList>) -> Element {
    let client = use_context::<DashboardClient>();
    let app_config = use_context::<AppConfig>();
    let mut form = use_signal(VisualizationForm::default);
    let mut submitting = use_signal(|| false);
    let mut notice = use_signal(|| None::<(bool, String)>);
    let mut pending_delete = use_signal(|| None::<u64>);

    let save = {
        let client = client.clone();
        move |_: MouseEvent| {
            let current = form.read().clone();
            if !current.can_submit() || submitting() {
                return;
            }
            submitting.set(true);
            notice.set(None);
            let client = client.clone();
            spawn(async move {
                let result = match current.editing {
                    Some(id) => client.api().update_visualization_config(id, &current.request).await,
                    None => client.api().create_visualization_config(&current.request).await,
                };
                match result {
                    Ok(saved) => {
                        tracing::info!(id = saved.id, name = %saved.name, "Visualization saved");
                        notice.set(Some((true, current.success_message().to_string())));
                        form.write().reset();
                        load_visualizations(list, client);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Saving visualization failed");
                        notice.set(Some((false, e.user_message())));
                    }
                }
                submitting.set(false);
            });
        }
    };

    let delete = {
        let client = client.clone();
        move |id: u64| {
            pending_delete.set(None);
            let client = client.clone();
            spawn(async move {
                match client.api().delete_visualization_config(id).await {
                    Ok(()) => {
                        tracing::info!(id, "Visualization deleted");
                        notice.set(Some((true, "Configuration supprimée.".to_string())));
                        if form.read().editing == Some(id) {
                            form.write().reset();
                        }
                        load_visualizations(list, client);
                    }
                    Err(e) => {
                        tracing::error!(id, error = %e, "Deleting visualization failed");
                        notice.set(Some((false, e.user_message())));
                    }
                }
            });
        }
    };

    let current = form.read().clone();
    let saved: Vec<VisualizationParameter> = list.read().data().cloned().unwrap_or_default();
    let list_loading = list.read().is_loading() && list.read().data().is_none();
    let list_error = list.read().error().map(str::to_string);

    rsx! {
        div { class: "manager-grid",
            Card { title: current.title(), subtitle: "Configurer vos préférences de graphiques", icon: "📊",
                div { class: "form",
                    label { "Nom de la configuration" }
                    input {
                        r#type: "text",
                        placeholder: "ex: Dashboard BTC Trading",
                        value: "{current.request.name}",
                        oninput: move |evt| form.write().request.name = evt.value(),
                    }
                    div { class: "form-row",
                        div {
                            label { "Crypto" }
                            input {
                                r#type: "text",
                                placeholder: "ex: BTC",
                                value: "{current.request.crypto_symbol}",
                                oninput: move |evt| form.write().set_symbol(&evt.value()),
                            }
                        }
                        div {
                            label { "Période" }
                            select {
                                value: "{current.request.time_range}",
                                onchange: move |evt| form.write().request.time_range = evt.value(),
                                for period in VISUALIZATION_PERIODS {
                                    option {
                                        key: "{period}",
                                        value: "{period}",
                                        selected: period.as_str() == current.request.time_range,
                                        "{period.label()}"
                                    }
                                }
                            }
                        }
                    }
                    label { "Type de graphique" }
                    select {
                        value: "{current.request.chart_type}",
                        onchange: move |evt| {
                            if let Ok(kind) = evt.value().parse::<ChartKind>() {
                                form.write().request.chart_type = kind;
                            }
                        },
                        for kind in ChartKind::ALL {
                            option {
                                key: "{kind}",
                                value: "{kind}",
                                selected: kind == current.request.chart_type,
                                "{chart_kind_label(kind)}"
                            }
                        }
                    }
                    label { "Indicateurs" }
                    div { class: "toggle-row",
                        for name in app_config.indicators.available.clone() {
                            button {
                                key: "{name}",
                                r#type: "button",
                                class: if current.has_indicator(&name) { "toggle active" } else { "toggle" },
                                onclick: {
                                    let name = name.clone();
                                    move |_| form.write().toggle_indicator(&name)
                                },
                                "{name}"
                            }
                        }
                    }
                    if let Some((success, message)) = notice() {
                        Notice { message: message, success: success }
                    }
                    div { class: "form-actions",
                        if current.editing.is_some() {
                            button {
                                class: "btn btn-secondary",
                                onclick: move |_| {
                                    form.write().reset();
                                    notice.set(None);
                                },
                                "Annuler"
                            }
                        }
                        button {
                            class: "btn btn-primary",
                            disabled: submitting() || !current.can_submit(),
                            onclick: save,
                            if submitting() { "⏳ " } else { "＋ " }
                            if current.editing.is_some() { "Mettre à jour" } else { "Sauvegarder" }
                        }
                    }
                }
            }
            Card { title: "Configurations sauvegardées", subtitle: format!("{} visualisations", saved.len()), icon: "☰",
                if list_loading {
                    LoadingIndicator {}
                } else if let Some(message) = list_error {
                    ErrorPanel {
                        message: message,
                        on_retry: {
                            let client = client.clone();
                            move |_| {
                                let client = client.clone();
                                fetch::retry(list, move |_| async move { client.visualizations().await })
                            }
                        },
                    }
                } else if saved.is_empty() {
                    p { class: "empty", "Aucune visualisation sauvegardée" }
                } else {
                    div { class: "saved-list",
                        for config in saved {
                            div {
                                key: "{config.id}",
                                class: if current.editing == Some(config.id) { "saved-item editing" } else { "saved-item" },
                                div {
                                    p { class: "saved-name", "{config.name}" }
                                    div { class: "tags",
                                        span { class: "tag", "{config.crypto_symbol}" }
                                        span { class: "tag", "{config.chart_type}" }
                                        span { class: "tag", "{config.time_range}" }
                                    }
                                }
                                div { class: "saved-actions",
                                    if pending_delete() == Some(config.id) {
                                        span { class: "confirm", "Supprimer ?" }
                                        button {
                                            class: "link danger",
                                            onclick: {
                                                let mut delete = delete.clone();
                                                let id = config.id;
                                                move |_| delete(id)
                                            },
                                            "Oui"
                                        }
                                        button { class: "link", onclick: move |_| pending_delete.set(None), "Non" }
                                    } else {
                                        button {
                                            class: "link",
                                            onclick: {
                                                let config = config.clone();
                                                move |_| {
                                                    form.set(VisualizationForm::edit(&config));
                                                    notice.set(None);
                                                }
                                            },
                                            "Modifier"
                                        }
                                        button {
                                            class: "link danger",
                                            onclick: {
                                                let id = config.id;
                                                move |_| pending_delete.set(Some(id))
                                            },
                                            "Supprimer"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
