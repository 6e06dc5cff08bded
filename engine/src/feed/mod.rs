//! Pull-based data feed: REST client, query strings, per-widget fetch
//! lifecycle and health polling.

pub mod client;
pub mod health;
pub mod query;
pub mod widget;

use serde::Deserialize;
use thiserror::Error;

pub use client::ApiClient;
pub use health::{HealthMonitor, HealthStatus};
pub use query::HistoryQuery;
pub use widget::{FetchState, Resolution, Ticket, WidgetFeed};

pub const NETWORK_ERROR_MESSAGE: &str = "Network error - API unreachable";

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Network error - API unreachable: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status. `message` is the body's `error` field, else `HTTP <status>`.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid query: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl FeedError {
    /// Builds the error for a non-success response from its status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP {}", status));
        FeedError::Api { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FeedError::Api { status, .. } => Some(*status),
            FeedError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Text shown inline in a widget next to the retry button.
    pub fn user_message(&self) -> String {
        match self {
            FeedError::Http(_) => NETWORK_ERROR_MESSAGE.to_string(),
            FeedError::Api { message, .. } => message.clone(),
            FeedError::Decode(_) | FeedError::Query(_) => "Réponse invalide de l'API".to_string(),
        }
    }
}
