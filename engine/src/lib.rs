// Engine library root: charting core plus the data feed that supplies it.
//
// raw records -> series (normalize) -> resample (candlesticks) -> scale -> render -> SVG
// interaction maps pointer positions back onto the rendered series.

pub mod analytics;
pub mod config;
pub mod data;
pub mod error;
pub mod feed;
pub mod indicators;
pub mod interaction;
pub mod render;
pub mod resample;
pub mod scale;
pub mod series;

pub use error::EngineError;

use shared::models::{ChartKind, Period};

use crate::config::EngineSettings;
use crate::feed::{ApiClient, HistoryQuery};
use crate::series::RawRecord;

/// Fetches the ticker history behind a price chart for `symbol` over `period`.
pub async fn fetch_ticker_records(
    client: &ApiClient,
    settings: &EngineSettings,
    symbol: &str,
    period: Period,
) -> Result<Vec<RawRecord>, EngineError> {
    let pair = settings.pair_for(symbol)?;
    let query = HistoryQuery::new().with_period(period).with_pair(pair);
    let history = client.ticker_history(&query).await?;
    tracing::debug!(symbol, pair, count = history.data.len(), "Fetched ticker history");
    Ok(series::records_from(&history.data)?)
}

/// Price chart of a saved visualization: its chart kind, its symbol colour and its overlays.
pub fn visualization_chart_spec(kind: ChartKind, symbol: &str, indicators: &[String]) -> render::PriceChartSpec {
    render::PriceChartSpec::new(kind)
        .with_label(shared::utils::base_symbol(symbol).to_uppercase())
        .with_color(render::symbol_color(symbol))
        .with_indicators(indicators.to_vec())
}
