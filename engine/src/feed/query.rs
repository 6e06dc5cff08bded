use serde::Serialize;
use shared::models::Period;

use super::FeedError;

/// Filters accepted by every `/historique/` endpoint. Only present fields are
/// sent, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistoryQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_debut: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_fin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crypto_symbol: Option<String>,
}

impl HistoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Period::Live` sends no `periode`: the API then returns its most recent window.
    pub fn with_period(mut self, period: Period) -> Self {
        self.periode = period.query_value().map(str::to_string);
        self
    }

    pub fn with_dates(mut self, debut: impl Into<String>, fin: impl Into<String>) -> Self {
        self.date_debut = Some(debut.into());
        self.date_fin = Some(fin.into());
        self
    }

    pub fn with_pair(mut self, pair: impl Into<String>) -> Self {
        self.pair = Some(pair.into());
        self
    }

    pub fn with_crypto_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.crypto_symbol = Some(symbol.into());
        self
    }

    /// `""` when no filter is set, else `?k=v&…`.
    pub fn to_query_string(&self) -> Result<String, FeedError> {
        let encoded = serde_urlencoded::to_string(self)?;
        Ok(if encoded.is_empty() { encoded } else { format!("?{}", encoded) })
    }
}
