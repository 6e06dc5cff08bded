// Sidebar navigation and the page header with the API health badge
#![allow(non_snake_case)]
use dioxus::prelude::*;
use engine::feed::HealthStatus;

use crate::state::app_state::{AppState, Page};

#[component]
pub fn Sidebar(#[props(into)] title: String, #[props(into)] api_url: String, #[props(into)] version: String) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let current = state.read().page;

    rsx! {
        aside { class: "sidebar",
            div { class: "sidebar-logo", "◆ {title}" }
            nav {
                ul {
                    for page in Page::ALL {
                        li { key: "{page:?}",
                            button {
                                class: if page == current { "nav-item active" } else { "nav-item" },
                                onclick: move |_| state.write().navigate(page),
                                span { class: "nav-icon", "{page.icon()}" }
                                span { "{page.label()}" }
                            }
                        }
                    }
                }
            }
            div { class: "sidebar-footer",
                p { "API: {api_url}" }
                p { "v{version}" }
            }
        }
    }
}

fn badge(status: &HealthStatus) -> (&'static str, String) {
    match status {
        HealthStatus::Checking => ("badge badge-neutral", "⏳ Connexion...".to_string()),
        HealthStatus::Healthy { .. } => ("badge badge-success", "● API Active".to_string()),
        HealthStatus::Unhealthy { .. } => ("badge badge-warning", "⚠ API Dégradée".to_string()),
        HealthStatus::Unreachable => ("badge badge-danger", "❌ API Hors ligne".to_string()),
    }
}

#[component]
pub fn Header(#[props(into)] title: String) -> Element {
    let health = use_context::<Signal<HealthStatus>>();
    let status = health.read().clone();
    let (class, text) = badge(&status);
    let detail = status.label();
    let now = chrono::Local::now().format("%H:%M").to_string();

    rsx! {
        header { class: "header",
            h1 { "{title}" }
            div { class: "header-right",
                span { class: "{class}", title: "{detail}", "{text}" }
                span { class: "clock", "{now}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_per_status() {
        assert_eq!(badge(&HealthStatus::Checking).0, "badge badge-neutral");
        let healthy = HealthStatus::Healthy { service: "api".to_string(), version: "1".to_string() };
        assert_eq!(badge(&healthy).1, "● API Active");
        assert_eq!(badge(&HealthStatus::Unhealthy { reason: "x".to_string() }).0, "badge badge-warning");
        assert_eq!(badge(&HealthStatus::Unreachable).1, "❌ API Hors ligne");
    }
}
