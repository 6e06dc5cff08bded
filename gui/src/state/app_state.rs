// Global application state: current page and the shared filters pages start from.
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};
use shared::models::{CryptoConfiguration, Period};

use crate::config::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Page {
    #[default]
    Overview,
    Prices,
    Trades,
    Sentiment,
    Predictions,
    Articles,
    Alerts,
    Configuration,
}

impl Page {
    pub const ALL: [Page; 8] = [
        Page::Overview,
        Page::Prices,
        Page::Trades,
        Page::Sentiment,
        Page::Predictions,
        Page::Articles,
        Page::Alerts,
        Page::Configuration,
    ];

    /// Sidebar entry.
    pub fn label(&self) -> &'static str {
        match self {
            Page::Overview => "Dashboard",
            Page::Prices => "Prix",
            Page::Trades => "Transactions",
            Page::Sentiment => "Sentiment",
            Page::Predictions => "Prédictions",
            Page::Articles => "Articles",
            Page::Alerts => "Alertes",
            Page::Configuration => "Configuration",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Overview => "🏠",
            Page::Prices => "💲",
            Page::Trades => "📈",
            Page::Sentiment => "🙂",
            Page::Predictions => "🔮",
            Page::Articles => "📰",
            Page::Alerts => "🔔",
            Page::Configuration => "⚙",
        }
    }

    /// Header title.
    pub fn title(&self) -> &'static str {
        match self {
            Page::Overview => "Tableau de bord",
            Page::Prices => "Historique des Prix",
            Page::Trades => "Transactions",
            Page::Sentiment => "Analyse de Sentiment",
            Page::Predictions => "Prédictions de Prix",
            Page::Articles => "Articles",
            Page::Alerts => "Alertes de Prix",
            Page::Configuration => "Configuration",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub page: Page,
    pub theme: Theme,
    /// Period pages open with.
    pub default_period: Period,
}

impl Default for AppState {
    fn default() -> Self {
        Self { page: Page::Overview, theme: Theme::Dark, default_period: Period::Hour24 }
    }
}

impl AppState {
    pub fn new(theme: Theme) -> Self {
        Self { theme, ..Self::default() }
    }

    pub fn navigate(&mut self, page: Page) {
        if self.page != page {
            tracing::debug!(from = ?self.page, to = ?page, "Navigate");
            self.page = page;
        }
    }
}

/// What a crypto selector option carries as its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectorMode {
    /// Bare symbol (`ETH`), for the sentiment and prediction endpoints.
    #[default]
    Symbol,
    /// Configured symbol as stored (`ETH/USD`), for the ticker and trade endpoints.
    Pair,
}

impl SelectorMode {
    pub fn value_for(&self, symbol: &str) -> String {
        match self {
            SelectorMode::Symbol => shared::utils::base_symbol(symbol).to_string(),
            SelectorMode::Pair => symbol.to_string(),
        }
    }
}

/// Active cryptos matching `query`, best fuzzy match first. An empty query keeps the API order.
pub fn filter_cryptos<'a>(query: &str, cryptos: &'a [CryptoConfiguration]) -> Vec<&'a CryptoConfiguration> {
    let active = cryptos.iter().filter(|c| c.is_active);
    let query = query.trim();
    if query.is_empty() {
        return active.collect();
    }
    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored: Vec<(i64, &CryptoConfiguration)> = active
        .filter_map(|c| {
            let haystack = format!("{} {}", c.symbol, c.name);
            matcher.fuzzy_match(&haystack, query).map(|score| (score, c))
        })
        .collect();
    // Stable sort keeps API order among equal scores.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, c)| c).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crypto(id: u64, symbol: &str, name: &str, is_active: bool) -> CryptoConfiguration {
        CryptoConfiguration {
            id,
            symbol: symbol.to_string(),
            name: name.to_string(),
            is_active,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_navigation() {
        let mut state = AppState::new(Theme::Light);
        assert_eq!(state.page, Page::Overview);
        state.navigate(Page::Alerts);
        assert_eq!(state.page, Page::Alerts);
        assert_eq!(state.page.title(), "Alertes de Prix");
        assert_eq!(Page::ALL.len(), 8);
    }

    #[test]
    fn test_selector_values() {
        assert_eq!(SelectorMode::Symbol.value_for("ETH/USD"), "ETH");
        assert_eq!(SelectorMode::Pair.value_for("ETH/USD"), "ETH/USD");
        assert_eq!(SelectorMode::Symbol.value_for("SOL"), "SOL");
    }

    #[test]
    fn test_filter_keeps_only_active_cryptos() {
        let cryptos = vec![
            crypto(1, "BTC/USD", "Bitcoin", true),
            crypto(2, "ETH/USD", "Ethereum", false),
            crypto(3, "SOL/USD", "Solana", true),
        ];
        let all: Vec<u64> = filter_cryptos("", &cryptos).iter().map(|c| c.id).collect();
        assert_eq!(all, vec![1, 3]);
        assert!(filter_cryptos("ether", &cryptos).is_empty());
    }

    #[test]
    fn test_fuzzy_filter_ranks_matches() {
        let cryptos = vec![
            crypto(1, "BTC/USD", "Bitcoin", true),
            crypto(2, "SOL/USD", "Solana", true),
            crypto(3, "LINK/USD", "Chainlink", true),
        ];
        let hits: Vec<u64> = filter_cryptos("sol", &cryptos).iter().map(|c| c.id).collect();
        assert_eq!(hits.first(), Some(&2));
        let hits: Vec<u64> = filter_cryptos("BITC", &cryptos).iter().map(|c| c.id).collect();
        assert_eq!(hits, vec![1]);
    }
}
