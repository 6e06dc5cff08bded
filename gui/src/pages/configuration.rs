// Tracked cryptos (create / edit / delete) and the saved visualizations.
#![allow(non_snake_case)]
use dioxus::prelude::*;
use engine::analytics::configuration_counts;
use shared::models::CryptoConfiguration;

use super::{load_cryptos, CryptoList};
use crate::components::feedback::{Card, ErrorPanel, LoadingIndicator, Notice, StatCard};
use crate::components::visualization::{load_visualizations, VisualizationList, VisualizationManager};
use crate::services::dashboard_client::DashboardClient;
use crate::state::forms::CryptoForm;

fn saved_message(form: &CryptoForm) -> String {
    let symbol = form.to_request().symbol;
    if form.editing.is_some() {
        format!("{} mis à jour avec succès!", symbol)
    } else {
        format!("{} ajouté avec succès!", symbol)
    }
}

fn item_class(config: &CryptoConfiguration, editing: Option<u64>) -> String {
    let mut class = String::from("crypto-item");
    if config.is_active {
        class.push_str(" active");
    }
    if editing == Some(config.id) {
        class.push_str(" editing");
    }
    class
}

fn initial(symbol: &str) -> String {
    symbol.chars().next().map(String::from).unwrap_or_default()
}

#[component]
pub fn ConfigurationPage() -> Element {
    let client = use_context::<DashboardClient>();
    let cryptos = use_context::<Signal<CryptoList>>();
    let visualizations = use_signal(VisualizationList::new);
    let mut form = use_signal(CryptoForm::new);
    let mut submitting = use_signal(|| false);
    let mut notice = use_signal(|| None::<(bool, String)>);
    let mut pending_delete = use_signal(|| None::<u64>);

    {
        let client = client.clone();
        use_effect(move || load_visualizations(visualizations, client.clone()));
    }

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
                let request = current.to_request();
                let result = match current.editing {
                    Some(id) => client.api().update_crypto_config(id, &request).await,
                    None => client.api().create_crypto_config(&request).await,
                };
                match result {
                    Ok(saved) => {
                        tracing::info!(id = saved.id, symbol = %saved.symbol, "Crypto configuration saved");
                        notice.set(Some((true, saved_message(&current))));
                        form.set(CryptoForm::new());
                        load_cryptos(cryptos, client);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Saving crypto configuration failed");
                        notice.set(Some((false, e.user_message())));
                    }
                }
                submitting.set(false);
            });
        }
    };

    let delete = {
        let client = client.clone();
        move |config: CryptoConfiguration| {
            pending_delete.set(None);
            let client = client.clone();
            spawn(async move {
                match client.api().delete_crypto_config(config.id).await {
                    Ok(()) => {
                        tracing::info!(id = config.id, symbol = %config.symbol, "Crypto configuration deleted");
                        notice.set(Some((true, format!("{} supprimé avec succès!", config.symbol))));
                        if form.read().editing == Some(config.id) {
                            form.set(CryptoForm::new());
                        }
                        load_cryptos(cryptos, client);
                    }
                    Err(e) => {
                        tracing::error!(id = config.id, error = %e, "Deleting crypto configuration failed");
                        notice.set(Some((false, e.user_message())));
                    }
                }
            });
        }
    };

    let current = form.read().clone();
    let list: Vec<CryptoConfiguration> = cryptos.read().data().cloned().unwrap_or_default();
    let counts = configuration_counts(&list);
    let list_loading = cryptos.read().is_loading() && cryptos.read().data().is_none();
    let list_error = cryptos.read().error().map(str::to_string);
    let (form_title, form_subtitle) = match current.editing {
        Some(id) => ("Modifier une crypto", format!("Modification de l'ID: {}", id)),
        None => ("Ajouter une crypto", "Ajouter une nouvelle crypto à suivre".to_string()),
    };

    rsx! {
        div { class: "page",
            div { class: "stat-grid",
                StatCard { label: "Total configurées", value: list.len().to_string() }
                StatCard { label: "Actives", value: counts.active.to_string(), tone: "success" }
                StatCard { label: "Inactives", value: counts.inactive.to_string() }
            }
            div { class: "manager-grid",
                Card { title: form_title, subtitle: form_subtitle, icon: "＋",
                    div { class: "form",
                        label { "Symbole" }
                        input {
                            r#type: "text",
                            maxlength: "50",
                            placeholder: "ex: BTC, ETH, SOL",
                            value: "{current.symbol}",
                            oninput: move |evt| form.write().symbol = evt.value().to_uppercase(),
                        }
                        label { "Nom complet" }
                        input {
                            r#type: "text",
                            maxlength: "100",
                            placeholder: "ex: Bitcoin, Ethereum, Solana",
                            value: "{current.name}",
                            oninput: move |evt| form.write().name = evt.value(),
                        }
                        label { class: "checkbox",
                            input {
                                r#type: "checkbox",
                                checked: current.is_active,
                                onchange: move |_| {
                                    let active = !form.peek().is_active;
                                    form.write().is_active = active;
                                },
                            }
                            "Activer le suivi immédiatement"
                        }
                        if let Some((success, message)) = notice() {
                            Notice { message: message, success: success }
                        }
                        div { class: "form-actions",
                            if current.editing.is_some() {
                                button {
                                    class: "btn btn-secondary",
                                    onclick: move |_| {
                                        form.set(CryptoForm::new());
                                        notice.set(None);
                                    },
                                    "Annuler"
                                }
                            }
                            button {
                                class: "btn btn-primary",
                                disabled: submitting() || !current.can_submit(),
                                onclick: save,
                                if submitting() {
                                    if current.editing.is_some() { "⏳ Mise à jour..." } else { "⏳ Ajout en cours..." }
                                } else if current.editing.is_some() {
                                    "✓ Mettre à jour"
                                } else {
                                    "＋ Ajouter la crypto"
                                }
                            }
                        }
                    }
                }
                Card { title: "Cryptos configurées", subtitle: format!("{} crypto-monnaies", list.len()), icon: "◆",
                    if list_loading {
                        LoadingIndicator { text: "Chargement..." }
                    } else if let Some(message) = list_error {
                        ErrorPanel {
                            message: message,
                            on_retry: {
                                let client = client.clone();
                                move |_| load_cryptos(cryptos, client.clone())
                            },
                        }
                    } else if list.is_empty() {
                        p { class: "empty", "Aucune crypto configurée" }
                    } else {
                        div { class: "saved-list",
                            for config in list {
                                div {
                                    key: "{config.id}",
                                    class: "{item_class(&config, current.editing)}",
                                    div { class: "crypto-identity",
                                        span { class: "crypto-initial", "{initial(&config.symbol)}" }
                                        div {
                                            p { class: "strong", "{config.symbol}" }
                                            p { class: "muted", "{config.name}" }
                                        }
                                    }
                                    div { class: "saved-actions",
                                        span { class: if config.is_active { "badge badge-success" } else { "badge badge-neutral" },
                                            if config.is_active { "✓ Active" } else { "Inactive" }
                                        }
                                        if pending_delete() == Some(config.id) {
                                            span { class: "confirm", "Supprimer {config.symbol} ?" }
                                            button {
                                                class: "link danger",
                                                onclick: {
                                                    let mut delete = delete.clone();
                                                    let config = config.clone();
                                                    move |_| delete(config.clone())
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
                                                        form.set(CryptoForm::edit(&config));
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
            VisualizationManager { list: visualizations }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_message_uses_normalized_symbol() {
        let mut form = CryptoForm::new();
        form.symbol = " sol ".to_string();
        form.name = "Solana".to_string();
        assert_eq!(saved_message(&form), "SOL ajouté avec succès!");
        form.editing = Some(3);
        assert_eq!(saved_message(&form), "SOL mis à jour avec succès!");
    }

    #[test]
    fn test_item_class_marks_active_and_edited() {
        let config = CryptoConfiguration {
            id: 4,
            symbol: "ETH/USD".to_string(),
            name: "Ethereum".to_string(),
            is_active: true,
            created_at: String::new(),
            updated_at: String::new(),
        };
        assert_eq!(item_class(&config, None), "crypto-item active");
        assert_eq!(item_class(&config, Some(4)), "crypto-item active editing");
    }

    #[test]
    fn test_initial_of_empty_symbol() {
        assert_eq!(initial("BTC"), "B");
        assert_eq!(initial(""), "");
    }
}
