// Crypto dashboard desktop entry point (Dioxus)
#![allow(non_snake_case)]

use dioxus::prelude::*;
use dioxus_desktop::{Config as DesktopConfig, LogicalSize, WindowBuilder};
use tracing_subscriber::EnvFilter;

mod app;
mod components;
mod config;
mod pages;
mod services;
mod state;

use app::App;
use config::AppConfig;
use services::dashboard_client::DashboardClient;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app_config = match AppConfig::load_default() {
        Ok(cfg) => {
            tracing::info!(version = %cfg.version, api = %cfg.engine.api_base_url, "Configuration loaded");
            cfg
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load the embedded configuration");
            return;
        }
    };
    let client = match DashboardClient::new(&app_config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create the API client");
            return;
        }
    };

    let desktop_config = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(app_config.app.title.clone())
            .with_inner_size(LogicalSize::new(1440.0, 900.0)),
    );

    tracing::info!("Starting {}", app_config.app.title);
    LaunchBuilder::desktop()
        .with_cfg(desktop_config)
        .with_context(app_config)
        .with_context(client)
        .launch(App);
}
