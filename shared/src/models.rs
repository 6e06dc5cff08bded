use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::indicators::Indicators;

/// Time window accepted by the history endpoints (`periode` query parameter).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Period {
    #[serde(rename = "live")]
    Live,
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "30m")]
    Minute30,
    #[serde(rename = "1h")]
    Hour1,
    #[default]
    #[serde(rename = "24h")]
    Hour24,
    #[serde(rename = "7d")]
    Day7,
    #[serde(rename = "30d")]
    Day30,
}

impl Period {
    pub const ALL: [Period; 8] = [
        Period::Live,
        Period::Minute1,
        Period::Minute5,
        Period::Minute30,
        Period::Hour1,
        Period::Hour24,
        Period::Day7,
        Period::Day30,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Live => "live",
            Period::Minute1 => "1m",
            Period::Minute5 => "5m",
            Period::Minute30 => "30m",
            Period::Hour1 => "1h",
            Period::Hour24 => "24h",
            Period::Day7 => "7d",
            Period::Day30 => "30d",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Live => "Live",
            Period::Minute1 => "1 minute",
            Period::Minute5 => "5 minutes",
            Period::Minute30 => "30 minutes",
            Period::Hour1 => "1 heure",
            Period::Hour24 => "24 heures",
            Period::Day7 => "7 jours",
            Period::Day30 => "30 jours",
        }
    }

    /// Value sent as `periode`. Live mode asks for the latest records and sends nothing.
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            Period::Live => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown period '{}'", s))
    }
}

/// Chart type stored on a visualization configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Candlestick,
    Line,
    Area,
    Bar,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [ChartKind::Candlestick, ChartKind::Line, ChartKind::Area, ChartKind::Bar];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Candlestick => "candlestick",
            ChartKind::Line => "line",
            ChartKind::Area => "area",
            ChartKind::Bar => "bar",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown chart kind '{}'", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthCheckResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Body returned by the API on failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Envelope shared by every `/historique/` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct History<T> {
    #[serde(default)]
    pub pair: Option<String>,
    #[serde(default)]
    pub crypto_symbol: Option<String>,
    pub count: u64,
    pub data: Vec<T>,
}

// --- Configuration resources ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CryptoConfiguration {
    pub id: u64,
    pub symbol: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CryptoConfigurationRequest {
    pub symbol: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PatchedCryptoConfigurationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Saved chart visualization. `indicators` tolerates every shape the API has been seen to send.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisualizationParameter {
    pub id: u64,
    pub name: String,
    pub crypto_symbol: String,
    pub time_range: String,
    pub chart_type: ChartKind,
    #[serde(default)]
    pub indicators: Indicators,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisualizationParameterRequest {
    pub name: String,
    pub crypto_symbol: String,
    pub time_range: String,
    pub chart_type: ChartKind,
    pub indicators: Vec<String>,
}

impl Default for VisualizationParameterRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            crypto_symbol: String::new(),
            time_range: Period::Hour24.as_str().to_string(),
            chart_type: ChartKind::Candlestick,
            indicators: Vec::new(),
        }
    }
}

impl From<&VisualizationParameter> for VisualizationParameterRequest {
    fn from(config: &VisualizationParameter) -> Self {
        Self {
            name: config.name.clone(),
            crypto_symbol: config.crypto_symbol.clone(),
            time_range: config.time_range.clone(),
            chart_type: config.chart_type,
            indicators: config.indicators.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PatchedVisualizationParameterRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crypto_symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicators: Option<Vec<String>>,
}

// --- Market data ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TickerData {
    pub timestamp: String,
    pub pair: String,
    pub last: f64,
    pub bid: f64,
    pub ask: f64,
    pub volume_24h: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TradeSide {
    #[serde(rename = "b")]
    Buy,
    #[serde(rename = "s")]
    Sell,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeData {
    pub timestamp: String,
    pub pair: String,
    pub price: f64,
    pub volume: f64,
    pub side: TradeSide,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentimentData {
    pub timestamp: String,
    pub crypto_symbol: String,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub source: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionData {
    pub timestamp: String,
    pub crypto_symbol: String,
    pub predicted_price: f64,
    pub actual_price: Option<f64>,
    pub model_name: String,
    pub confidence_interval_low: Option<f64>,
    pub confidence_interval_high: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArticleData {
    pub timestamp: String,
    pub article_id: String,
    pub title: String,
    pub url: String,
    pub website: String,
    pub summary: String,
    #[serde(default)]
    pub cryptocurrencies_mentioned: Vec<String>,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    PriceUp,
    PriceDown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertData {
    pub timestamp: String,
    pub pair: String,
    pub last_price: f64,
    pub change_percent: f64,
    pub threshold: f64,
    pub alert_type: AlertType,
}
