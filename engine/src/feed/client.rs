//! REST client for the dashboard API.
//!
//! One method per endpoint. Requests have no timeout and are never retried;
//! retrying is a user action surfaced by the widget.

use reqwest::{header, Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::models::{
    AlertData, ArticleData, CryptoConfiguration, CryptoConfigurationRequest, HealthCheckResponse, History, Paginated,
    PatchedCryptoConfigurationRequest, PatchedVisualizationParameterRequest, PredictionData, SentimentData, TickerData,
    TradeData, VisualizationParameter, VisualizationParameterRequest,
};

use super::{FeedError, HistoryQuery};
use crate::config::EngineSettings;

pub mod endpoints {
    pub const HEALTH: &str = "/api/v1/health/";
    pub const CRYPTO_CONFIG: &str = "/api/v1/config/crypto/";
    pub const VISUALIZATION_CONFIG: &str = "/api/v1/config/visualization/";
    pub const TICKER_HISTORY: &str = "/api/v1/ticker/historique/";
    pub const TRADE_HISTORY: &str = "/api/v1/trade/historique/";
    pub const ARTICLE_HISTORY: &str = "/api/v1/article/historique/";
    pub const ALERT_HISTORY: &str = "/api/v1/alert/historique/";

    pub fn crypto_config_detail(id: u64) -> String {
        format!("{}{}/", CRYPTO_CONFIG, id)
    }

    pub fn visualization_config_detail(id: u64) -> String {
        format!("{}{}/", VISUALIZATION_CONFIG, id)
    }

    pub fn sentiment_history(symbol: &str) -> String {
        format!("/api/v1/sentiment/{}/historique/", symbol)
    }

    pub fn prediction_history(symbol: &str) -> String {
        format!("/api/v1/prediction/{}/historique/", symbol)
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FeedError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, header::HeaderValue::from_static("application/json"));
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        let http = Client::builder().default_headers(headers).build()?;
        Ok(Self { http, base_url: base_url.into().trim_end_matches('/').to_string() })
    }

    pub fn from_settings(settings: &EngineSettings) -> Result<Self, FeedError> {
        Self::new(settings.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // --- internal helpers ---

    async fn execute(&self, method: Method, path: &str, body: Option<serde_json::Value>) -> Result<String, FeedError> {
        let url = self.url(path);
        tracing::debug!(method = %method, url = %url, "API request");

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "API unreachable");
            FeedError::Http(e)
        })?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let err = FeedError::from_response(status.as_u16(), &text);
            tracing::error!(url = %url, status = status.as_u16(), error = %err, "API request failed");
            return Err(err);
        }
        Ok(text)
    }

    fn decode<T: DeserializeOwned>(path: &str, text: &str) -> Result<T, FeedError> {
        serde_json::from_str(text).map_err(|e| {
            tracing::error!(path, error = %e, "Undecodable API response");
            FeedError::Decode(e.to_string())
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, FeedError> {
        let text = self.execute(Method::GET, path, None).await?;
        Self::decode(path, &text)
    }

    async fn send<T: DeserializeOwned, B: Serialize>(&self, method: Method, path: &str, body: &B) -> Result<T, FeedError> {
        let body = serde_json::to_value(body).map_err(|e| FeedError::Decode(e.to_string()))?;
        let text = self.execute(method, path, Some(body)).await?;
        Self::decode(path, &text)
    }

    async fn delete(&self, path: &str) -> Result<(), FeedError> {
        self.execute(Method::DELETE, path, None).await.map(|_| ())
    }

    async fn history<T: DeserializeOwned>(&self, path: &str, query: &HistoryQuery) -> Result<History<T>, FeedError> {
        let full = format!("{}{}", path, query.to_query_string()?);
        self.get(&full).await
    }

    // --- health ---

    pub async fn health(&self) -> Result<HealthCheckResponse, FeedError> {
        self.get(endpoints::HEALTH).await
    }

    // --- crypto configuration ---

    pub async fn list_crypto_configs(&self) -> Result<Paginated<CryptoConfiguration>, FeedError> {
        self.get(endpoints::CRYPTO_CONFIG).await
    }

    pub async fn get_crypto_config(&self, id: u64) -> Result<CryptoConfiguration, FeedError> {
        self.get(&endpoints::crypto_config_detail(id)).await
    }

    pub async fn create_crypto_config(&self, request: &CryptoConfigurationRequest) -> Result<CryptoConfiguration, FeedError> {
        self.send(Method::POST, endpoints::CRYPTO_CONFIG, request).await
    }

    pub async fn update_crypto_config(
        &self,
        id: u64,
        request: &CryptoConfigurationRequest,
    ) -> Result<CryptoConfiguration, FeedError> {
        self.send(Method::PUT, &endpoints::crypto_config_detail(id), request).await
    }

    pub async fn patch_crypto_config(
        &self,
        id: u64,
        request: &PatchedCryptoConfigurationRequest,
    ) -> Result<CryptoConfiguration, FeedError> {
        self.send(Method::PATCH, &endpoints::crypto_config_detail(id), request).await
    }

    pub async fn delete_crypto_config(&self, id: u64) -> Result<(), FeedError> {
        self.delete(&endpoints::crypto_config_detail(id)).await
    }

    // --- visualization configuration ---

    pub async fn list_visualization_configs(&self, page: Option<u32>) -> Result<Paginated<VisualizationParameter>, FeedError> {
        let path = match page {
            Some(page) => format!("{}?page={}", endpoints::VISUALIZATION_CONFIG, page),
            None => endpoints::VISUALIZATION_CONFIG.to_string(),
        };
        self.get(&path).await
    }

    pub async fn get_visualization_config(&self, id: u64) -> Result<VisualizationParameter, FeedError> {
        self.get(&endpoints::visualization_config_detail(id)).await
    }

    pub async fn create_visualization_config(
        &self,
        request: &VisualizationParameterRequest,
    ) -> Result<VisualizationParameter, FeedError> {
        self.send(Method::POST, endpoints::VISUALIZATION_CONFIG, request).await
    }

    pub async fn update_visualization_config(
        &self,
        id: u64,
        request: &VisualizationParameterRequest,
    ) -> Result<VisualizationParameter, FeedError> {
        self.send(Method::PUT, &endpoints::visualization_config_detail(id), request).await
    }

    pub async fn patch_visualization_config(
        &self,
        id: u64,
        request: &PatchedVisualizationParameterRequest,
    ) -> Result<VisualizationParameter, FeedError> {
        self.send(Method::PATCH, &endpoints::visualization_config_detail(id), request).await
    }

    pub async fn delete_visualization_config(&self, id: u64) -> Result<(), FeedError> {
        self.delete(&endpoints::visualization_config_detail(id)).await
    }

    // --- history ---

    pub async fn ticker_history(&self, query: &HistoryQuery) -> Result<History<TickerData>, FeedError> {
        self.history(endpoints::TICKER_HISTORY, query).await
    }

    pub async fn trade_history(&self, query: &HistoryQuery) -> Result<History<TradeData>, FeedError> {
        self.history(endpoints::TRADE_HISTORY, query).await
    }

    pub async fn article_history(&self, query: &HistoryQuery) -> Result<History<ArticleData>, FeedError> {
        self.history(endpoints::ARTICLE_HISTORY, query).await
    }

    pub async fn alert_history(&self, query: &HistoryQuery) -> Result<History<AlertData>, FeedError> {
        self.history(endpoints::ALERT_HISTORY, query).await
    }

    pub async fn sentiment_history(&self, symbol: &str, query: &HistoryQuery) -> Result<History<SentimentData>, FeedError> {
        self.history(&endpoints::sentiment_history(symbol), query).await
    }

    pub async fn prediction_history(
        &self,
        symbol: &str,
        query: &HistoryQuery,
    ) -> Result<History<PredictionData>, FeedError> {
        self.history(&endpoints::prediction_history(symbol), query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url(endpoints::HEALTH), "http://localhost:8000/api/v1/health/");
    }

    #[test]
    fn test_detail_endpoints() {
        assert_eq!(endpoints::crypto_config_detail(7), "/api/v1/config/crypto/7/");
        assert_eq!(endpoints::visualization_config_detail(3), "/api/v1/config/visualization/3/");
        assert_eq!(endpoints::sentiment_history("BTC"), "/api/v1/sentiment/BTC/historique/");
        assert_eq!(endpoints::prediction_history("ETH"), "/api/v1/prediction/ETH/historique/");
    }

    #[test]
    fn test_decode_history_envelope() {
        let body = r#"{"pair": "XXBTZEUR", "count": 1, "data": [
            {"timestamp": "2024-01-01T00:00:00Z", "pair": "XXBTZEUR", "last": 1.0, "bid": 0.9, "ask": 1.1, "volume_24h": 5.0}
        ]}"#;
        let history: History<TickerData> = ApiClient::decode("test", body).unwrap();
        assert_eq!(history.count, 1);
        assert_eq!(history.data[0].last, 1.0);

        let err = ApiClient::decode::<History<TickerData>>("test", "{}").unwrap_err();
        assert!(matches!(err, FeedError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_api_reports_network_error() {
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, FeedError::Http(_)));
        assert_eq!(err.user_message(), "Network error - API unreachable");
    }
}
