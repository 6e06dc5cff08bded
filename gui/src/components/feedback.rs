// Cards, loading indicator and the inline error panel
#![allow(non_snake_case)]
use dioxus::prelude::*;

#[component]
pub fn Card(
    #[props(into)] title: String,
    #[props(into, default)] subtitle: String,
    #[props(into, default)] icon: String,
    children: Element,
) -> Element {
    rsx! {
        section { class: "card",
            div { class: "card-header",
                if !icon.is_empty() {
                    span { class: "card-icon", "{icon}" }
                }
                div {
                    h3 { class: "card-title", "{title}" }
                    if !subtitle.is_empty() {
                        p { class: "card-subtitle", "{subtitle}" }
                    }
                }
            }
            div { class: "card-body", {children} }
        }
    }
}

#[component]
pub fn StatCard(#[props(into)] label: String, #[props(into)] value: String, #[props(into, default)] tone: String) -> Element {
    let color = match tone.as_str() {
        "success" => "var(--accent-success)",
        "danger" => "var(--accent-danger)",
        "warning" => "var(--accent-warning)",
        "primary" => "var(--accent-primary)",
        _ => "var(--foreground)",
    };
    rsx! {
        div { class: "stat-card",
            p { class: "stat-label", "{label}" }
            p { class: "stat-value", style: "color: {color};", "{value}" }
        }
    }
}

#[component]
pub fn LoadingIndicator(#[props(into, default)] text: String) -> Element {
    rsx! {
        div { class: "loading",
            span { class: "spinner" }
            if !text.is_empty() {
                p { "{text}" }
            }
        }
    }
}

/// Failure message with an optional manual retry. Nothing is retried automatically.
#[component]
pub fn ErrorPanel(
    #[props(into)] message: String,
    #[props(into, default = "Erreur".to_string())] title: String,
    on_retry: Option<EventHandler<()>>,
) -> Element {
    rsx! {
        div { class: "error-panel",
            div { class: "error-icon", "❌" }
            h3 { "{title}" }
            p { "{message}" }
            if let Some(handler) = on_retry {
                button { class: "btn btn-secondary", onclick: move |_| handler.call(()), "🔄 Réessayer" }
            }
        }
    }
}

#[component]
pub fn Notice(#[props(into)] message: String, #[props(default)] success: bool) -> Element {
    let class = if success { "notice notice-success" } else { "notice notice-danger" };
    let icon = if success { "✔" } else { "✖" };
    rsx! {
        div { class: "{class}", "{icon} {message}" }
    }
}
