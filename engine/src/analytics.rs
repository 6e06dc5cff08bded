//! Dashboard aggregations over already-fetched API data.
//!
//! All of these are plain summaries; empty inputs produce zeroed stats.

use shared::models::{
    AlertData, AlertType, ArticleData, CryptoConfiguration, PredictionData, SentimentData, SentimentLabel, TickerData,
    TradeData, TradeSide,
};
use shared::utils::time;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceStats {
    /// Most recent price; the API returns tickers newest first.
    pub latest: f64,
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

pub fn price_stats(tickers: &[TickerData]) -> PriceStats {
    let latest = match tickers.first() {
        Some(t) => t.last,
        None => return PriceStats::default(),
    };
    let (min, max, sum) = tickers.iter().fold((f64::INFINITY, f64::NEG_INFINITY, 0.0), |(lo, hi, sum), t| {
        (lo.min(t.last), hi.max(t.last), sum + t.last)
    });
    PriceStats { latest, min, max, average: sum / tickers.len() as f64 }
}

/// Most recent ticker of every pair, ordered by pair. Unparsable timestamps lose to parsable ones.
pub fn latest_per_pair(tickers: &[TickerData]) -> Vec<&TickerData> {
    let mut latest: BTreeMap<&str, (Option<i64>, &TickerData)> = BTreeMap::new();
    for ticker in tickers {
        let at = time::parse_timestamp_millis(&ticker.timestamp);
        match latest.get(ticker.pair.as_str()) {
            Some((seen, _)) if *seen >= at => {}
            _ => {
                latest.insert(ticker.pair.as_str(), (at, ticker));
            }
        }
    }
    latest.into_values().map(|(_, ticker)| ticker).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TradeStats {
    pub buys: usize,
    pub sells: usize,
    pub total_volume: f64,
    /// Share of buy trades, in percent.
    pub buy_ratio: f64,
}

pub fn trade_stats(trades: &[TradeData]) -> TradeStats {
    if trades.is_empty() {
        return TradeStats::default();
    }
    let buys = trades.iter().filter(|t| t.side == TradeSide::Buy).count();
    TradeStats {
        buys,
        sells: trades.len() - buys,
        total_volume: trades.iter().map(|t| t.volume).sum(),
        buy_ratio: buys as f64 / trades.len() as f64 * 100.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Neutral,
    Negative,
}

impl Tone {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.6 {
            Tone::Positive
        } else if score <= 0.4 {
            Tone::Negative
        } else {
            Tone::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Positive => "Positif",
            Tone::Neutral => "Neutre",
            Tone::Negative => "Négatif",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LabelCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl LabelCounts {
    fn from_labels(labels: impl IntoIterator<Item = SentimentLabel>) -> Self {
        labels.into_iter().fold(Self::default(), |mut acc, label| {
            match label {
                SentimentLabel::Positive => acc.positive += 1,
                SentimentLabel::Neutral => acc.neutral += 1,
                SentimentLabel::Negative => acc.negative += 1,
            }
            acc
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SentimentStats {
    pub average_score: f64,
    pub average_confidence: f64,
    pub labels: LabelCounts,
}

impl SentimentStats {
    pub fn tone(&self) -> Tone {
        Tone::from_score(self.average_score)
    }
}

pub fn sentiment_stats(rows: &[SentimentData]) -> SentimentStats {
    if rows.is_empty() {
        return SentimentStats::default();
    }
    let n = rows.len() as f64;
    SentimentStats {
        average_score: rows.iter().map(|r| r.sentiment_score).sum::<f64>() / n,
        average_confidence: rows.iter().map(|r| r.confidence).sum::<f64>() / n,
        labels: LabelCounts::from_labels(rows.iter().map(|r| r.sentiment_label)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AlertStats {
    pub up: usize,
    pub down: usize,
    pub mean_abs_change: f64,
    pub max_abs_change: f64,
}

pub fn alert_stats(alerts: &[AlertData]) -> AlertStats {
    if alerts.is_empty() {
        return AlertStats::default();
    }
    let up = alerts.iter().filter(|a| a.alert_type == AlertType::PriceUp).count();
    let changes = alerts.iter().map(|a| a.change_percent.abs());
    AlertStats {
        up,
        down: alerts.len() - up,
        mean_abs_change: changes.clone().sum::<f64>() / alerts.len() as f64,
        max_abs_change: changes.fold(0.0, f64::max),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PredictionStats {
    pub total: usize,
    pub with_actual: usize,
    /// Mean absolute percentage error over rows that have an actual price.
    pub mean_error_percent: f64,
}

pub fn prediction_stats(rows: &[PredictionData]) -> PredictionStats {
    let errors: Vec<f64> = rows.iter().filter_map(prediction_error_percent).collect();
    let mean_error_percent = if errors.is_empty() { 0.0 } else { errors.iter().sum::<f64>() / errors.len() as f64 };
    PredictionStats { total: rows.len(), with_actual: errors.len(), mean_error_percent }
}

/// `|predicted - actual| / actual * 100`, when an actual price is known and non-zero.
pub fn prediction_error_percent(row: &PredictionData) -> Option<f64> {
    row.actual_price
        .filter(|actual| *actual != 0.0)
        .map(|actual| (row.predicted_price - actual).abs() / actual * 100.0)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArticleStats {
    pub total: usize,
    pub labels: LabelCounts,
    pub sources: BTreeSet<String>,
}

pub fn article_stats(articles: &[ArticleData]) -> ArticleStats {
    ArticleStats {
        total: articles.len(),
        labels: LabelCounts::from_labels(articles.iter().map(|a| a.sentiment_label)),
        sources: articles.iter().map(|a| a.website.clone()).collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigurationCounts {
    pub active: usize,
    pub inactive: usize,
}

pub fn configuration_counts(cryptos: &[CryptoConfiguration]) -> ConfigurationCounts {
    let active = cryptos.iter().filter(|c| c.is_active).count();
    ConfigurationCounts { active, inactive: cryptos.len() - active }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn ticker(last: f64) -> TickerData {
        TickerData {
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            pair: "XXBTZEUR".to_string(),
            last,
            bid: last,
            ask: last,
            volume_24h: 0.0,
        }
    }

    fn trade(side: TradeSide, volume: f64) -> TradeData {
        TradeData { timestamp: String::new(), pair: "XXBTZEUR".to_string(), price: 1.0, volume, side }
    }

    fn prediction(predicted: f64, actual: Option<f64>) -> PredictionData {
        PredictionData {
            timestamp: String::new(),
            crypto_symbol: "BTC".to_string(),
            predicted_price: predicted,
            actual_price: actual,
            model_name: "lstm".to_string(),
            confidence_interval_low: None,
            confidence_interval_high: None,
        }
    }

    fn alert(kind: AlertType, change: f64) -> AlertData {
        AlertData {
            timestamp: String::new(),
            pair: "XXBTZEUR".to_string(),
            last_price: 1.0,
            change_percent: change,
            threshold: 1.0,
            alert_type: kind,
        }
    }

    #[test]
    fn test_price_stats() {
        let stats = price_stats(&[ticker(30.0), ticker(10.0), ticker(20.0)]);
        assert_eq!(stats.latest, 30.0);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 30.0);
        assert!((stats.average - 20.0).abs() < EPSILON);
        assert_eq!(price_stats(&[]), PriceStats::default());
    }

    #[test]
    fn test_latest_per_pair() {
        let mut older = ticker(1.0);
        older.timestamp = "2024-01-01T00:00:00Z".to_string();
        let mut newer = ticker(2.0);
        newer.timestamp = "2024-01-01T00:05:00Z".to_string();
        let mut eth = ticker(3.0);
        eth.pair = "XETHZEUR".to_string();
        let rows = vec![older, eth, newer];
        let latest = latest_per_pair(&rows);
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].pair, "XETHZEUR");
        assert_eq!(latest[1].last, 2.0);
        assert!(latest_per_pair(&[]).is_empty());
    }

    #[test]
    fn test_trade_stats() {
        let stats = trade_stats(&[trade(TradeSide::Buy, 1.5), trade(TradeSide::Sell, 2.0), trade(TradeSide::Buy, 0.5), trade(TradeSide::Buy, 1.0)]);
        assert_eq!((stats.buys, stats.sells), (3, 1));
        assert!((stats.total_volume - 5.0).abs() < EPSILON);
        assert!((stats.buy_ratio - 75.0).abs() < EPSILON);
        assert_eq!(trade_stats(&[]).buy_ratio, 0.0);
    }

    #[test]
    fn test_tone_thresholds() {
        assert_eq!(Tone::from_score(0.6), Tone::Positive);
        assert_eq!(Tone::from_score(0.5), Tone::Neutral);
        assert_eq!(Tone::from_score(0.4), Tone::Negative);
    }

    #[test]
    fn test_sentiment_stats() {
        let row = |score: f64, label| SentimentData {
            timestamp: String::new(),
            crypto_symbol: "ETH".to_string(),
            sentiment_score: score,
            sentiment_label: label,
            source: "news".to_string(),
            confidence: 0.5,
        };
        let stats = sentiment_stats(&[row(0.9, SentimentLabel::Positive), row(0.5, SentimentLabel::Neutral)]);
        assert!((stats.average_score - 0.7).abs() < EPSILON);
        assert_eq!(stats.tone(), Tone::Positive);
        assert_eq!(stats.labels, LabelCounts { positive: 1, neutral: 1, negative: 0 });
        assert_eq!(sentiment_stats(&[]).average_score, 0.0);
    }

    #[test]
    fn test_prediction_error_ignores_rows_without_actual() {
        let stats = prediction_stats(&[prediction(110.0, Some(100.0)), prediction(90.0, Some(100.0)), prediction(5.0, None)]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.with_actual, 2);
        assert!((stats.mean_error_percent - 10.0).abs() < EPSILON);
        assert_eq!(prediction_error_percent(&prediction(1.0, Some(0.0))), None);
    }

    #[test]
    fn test_alert_stats() {
        let stats = alert_stats(&[alert(AlertType::PriceUp, 2.0), alert(AlertType::PriceDown, -4.0)]);
        assert_eq!((stats.up, stats.down), (1, 1));
        assert!((stats.mean_abs_change - 3.0).abs() < EPSILON);
        assert_eq!(stats.max_abs_change, 4.0);
    }

    #[test]
    fn test_configuration_counts() {
        let crypto = |active| CryptoConfiguration {
            id: 1,
            symbol: "BTC".to_string(),
            name: "Bitcoin".to_string(),
            is_active: active,
            created_at: String::new(),
            updated_at: String::new(),
        };
        assert_eq!(configuration_counts(&[crypto(true), crypto(false), crypto(true)]), ConfigurationCounts { active: 2, inactive: 1 });
    }
}
