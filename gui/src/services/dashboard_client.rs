// Data access for the dashboard pages: the REST client plus the chart renderer setup.
use engine::config::EngineSettings;
use engine::feed::{ApiClient, FeedError, HistoryQuery};
use engine::render::{ChartRenderer, ChartStyle, Formatters};
use engine::series::{records_from, RawRecord};
use engine::EngineError;
use serde::Serialize;
use shared::models::{
    AlertData, ArticleData, CryptoConfiguration, Period, PredictionData, SentimentData, TickerData, TradeData,
    VisualizationParameter,
};
use std::time::Duration;

use crate::config::AppConfig;

/// Everything the overview page shows besides the saved visualizations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverviewSnapshot {
    pub tickers: Vec<TickerData>,
    pub alerts: Vec<AlertData>,
    pub cryptos: Vec<CryptoConfiguration>,
    pub trades: Vec<TradeData>,
    /// Latest sentiment row of each active crypto that has one.
    pub sentiments: Vec<SentimentData>,
    /// Predictions of the first active crypto.
    pub predictions: Vec<PredictionData>,
}

pub const OVERVIEW_TICKERS: usize = 8;
pub const OVERVIEW_ALERTS: usize = 5;

#[derive(Debug, Clone)]
pub struct DashboardClient {
    api: ApiClient,
    settings: EngineSettings,
    style: ChartStyle,
}

impl PartialEq for DashboardClient {
    fn eq(&self, other: &Self) -> bool {
        self.api.base_url() == other.api.base_url() && self.settings == other.settings && self.style == other.style
    }
}

impl DashboardClient {
    pub fn new(config: &AppConfig) -> Result<Self, FeedError> {
        let api = ApiClient::from_settings(&config.engine)?;
        let style = config.app.theme.palette().chart_style(&config.chart);
        tracing::info!(api = %api.base_url(), "Dashboard client ready");
        Ok(Self { api, settings: config.engine.clone(), style })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.settings.health_poll_secs)
    }

    pub fn live_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.settings.live_refresh_secs.max(1))
    }

    /// Renderer for a chart covering `period`.
    pub fn renderer(&self, period: Period, show_axes: bool) -> ChartRenderer {
        ChartRenderer::from_settings(&self.settings, self.style.clone())
            .with_formatters(Formatters::for_period(period))
            .with_axes(show_axes)
    }

    // --- configuration ---

    pub async fn cryptos(&self) -> Result<Vec<CryptoConfiguration>, EngineError> {
        Ok(self.api.list_crypto_configs().await?.results)
    }

    pub async fn visualizations(&self) -> Result<Vec<VisualizationParameter>, EngineError> {
        Ok(self.api.list_visualization_configs(None).await?.results)
    }

    // --- history ---

    pub async fn tickers(&self, symbol: &str, period: Period) -> Result<Vec<TickerData>, EngineError> {
        let pair = self.settings.pair_for(symbol)?;
        let query = HistoryQuery::new().with_period(period).with_pair(pair);
        Ok(self.api.ticker_history(&query).await?.data)
    }

    pub async fn trades(&self, symbol: &str, period: Period) -> Result<Vec<TradeData>, EngineError> {
        let pair = self.settings.pair_for(symbol)?;
        let query = HistoryQuery::new().with_period(period).with_pair(pair);
        Ok(self.api.trade_history(&query).await?.data)
    }

    pub async fn sentiment(&self, symbol: &str, period: Period) -> Result<Vec<SentimentData>, EngineError> {
        let query = HistoryQuery::new().with_period(period);
        Ok(self.api.sentiment_history(shared::utils::base_symbol(symbol), &query).await?.data)
    }

    pub async fn predictions(&self, symbol: &str, period: Period) -> Result<Vec<PredictionData>, EngineError> {
        let query = HistoryQuery::new().with_period(period);
        Ok(self.api.prediction_history(shared::utils::base_symbol(symbol), &query).await?.data)
    }

    /// Alerts over `period`, optionally for one symbol's pair.
    pub async fn alerts(&self, symbol: Option<&str>, period: Period) -> Result<Vec<AlertData>, EngineError> {
        let mut query = HistoryQuery::new().with_period(period);
        if let Some(symbol) = symbol.filter(|s| !s.is_empty()) {
            query = query.with_pair(self.settings.pair_for(symbol)?);
        }
        Ok(self.api.alert_history(&query).await?.data)
    }

    pub async fn articles(&self, symbol: Option<&str>, period: Period) -> Result<Vec<ArticleData>, EngineError> {
        let mut query = HistoryQuery::new().with_period(period);
        if let Some(symbol) = symbol.filter(|s| !s.is_empty()) {
            query = query.with_crypto_symbol(shared::utils::base_symbol(symbol));
        }
        Ok(self.api.article_history(&query).await?.data)
    }
}

impl DashboardClient {
    /// Loads the overview. Core lists fail the whole snapshot; per-crypto sentiment
    /// and predictions are best effort.
    pub async fn overview(&self) -> Result<OverviewSnapshot, EngineError> {
        let ticker_query = HistoryQuery::new().with_period(Period::Hour1);
        let day_query = HistoryQuery::new().with_period(Period::Hour24);
        let (tickers, alerts, cryptos, trades) = tokio::join!(
            self.api.ticker_history(&ticker_query),
            self.api.alert_history(&day_query),
            self.api.list_crypto_configs(),
            self.api.trade_history(&day_query),
        );
        let mut snapshot = OverviewSnapshot {
            tickers: tickers?.data.into_iter().take(OVERVIEW_TICKERS).collect(),
            alerts: alerts?.data.into_iter().take(OVERVIEW_ALERTS).collect(),
            cryptos: cryptos?.results,
            trades: trades?.data,
            ..OverviewSnapshot::default()
        };

        let active: Vec<String> = snapshot
            .cryptos
            .iter()
            .filter(|c| c.is_active)
            .map(|c| shared::utils::base_symbol(&c.symbol).to_string())
            .collect();
        if let Some(primary) = active.first() {
            match self.api.prediction_history(primary, &day_query).await {
                Ok(history) => snapshot.predictions = history.data,
                Err(e) => tracing::warn!(symbol = %primary, error = %e, "Predictions unavailable"),
            }
        }
        for symbol in &active {
            match self.api.sentiment_history(symbol, &day_query).await {
                Ok(history) => snapshot.sentiments.extend(history.data.into_iter().next()),
                Err(e) => tracing::warn!(symbol = %symbol, error = %e, "Sentiment unavailable"),
            }
        }
        tracing::debug!(
            tickers = snapshot.tickers.len(),
            alerts = snapshot.alerts.len(),
            sentiments = snapshot.sentiments.len(),
            "Overview loaded"
        );
        Ok(snapshot)
    }
}

/// Chart input for a list of wire rows. Rows that fail to serialize yield no chart.
pub fn chart_records<T: Serialize>(rows: &[T]) -> Vec<RawRecord> {
    match records_from(rows) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(error = %e, "Rows could not be converted into chart records");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::render::ColorToken;

    fn client() -> DashboardClient {
        DashboardClient::new(&AppConfig::load_default().unwrap()).unwrap()
    }

    #[test]
    fn test_renderer_uses_theme_colours() {
        let client = client();
        let renderer = client.renderer(Period::Hour24, true);
        assert_eq!(renderer.canvas().width, 800.0);
        assert_eq!(renderer.style().grid, "#2a2e39");
        assert_eq!(renderer.style().resolve(&ColorToken::new("primary")), "#3b82f6");
    }

    #[test]
    fn test_intervals() {
        let client = client();
        assert_eq!(client.health_interval(), Duration::from_secs(30));
        assert_eq!(client.live_refresh_interval(), Duration::from_secs(15));
    }

    #[test]
    fn test_chart_records_from_tickers() {
        let rows = vec![TickerData {
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            pair: "XXBTZEUR".to_string(),
            last: 42000.0,
            bid: 41990.0,
            ask: 42010.0,
            volume_24h: 12.5,
        }];
        let records = chart_records(&rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["last"], serde_json::json!(42000.0));
    }

    #[tokio::test]
    async fn test_unknown_symbol_is_reported_before_any_request() {
        let err = client().tickers("MATIC", Period::Hour24).await.unwrap_err();
        assert_eq!(err.user_message(), "Paire introuvable pour MATIC");
    }
}
