// Engine entry point: renders one price chart to an SVG file.
//
//   engine render <output.svg> [--csv <file>] [--symbol <SYM>] [--period <p>]
//                 [--kind <candlestick|line|area|bar>] [--x <field>] [--y <field>]
use anyhow::{anyhow, bail, Context, Result};
use engine::config::EngineSettings;
use engine::data::load_records_from_csv;
use engine::feed::ApiClient;
use engine::render::{symbol_color, ChartRenderer, ChartStyle, Formatters, PriceChartSpec};
use shared::models::{ChartKind, Period};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: engine render <output.svg> [--csv <file>] [--symbol <SYM>] [--period <1m|5m|30m|1h|24h|7d|30d|live>] [--kind <candlestick|line|area|bar>] [--x <field>] [--y <field>]";

#[derive(Debug, PartialEq)]
struct RenderArgs {
    output: PathBuf,
    csv: Option<PathBuf>,
    symbol: String,
    period: Period,
    kind: ChartKind,
    x_key: String,
    y_key: String,
}

fn parse_args(args: &[String]) -> Result<RenderArgs> {
    let mut iter = args.iter();
    match iter.next().map(String::as_str) {
        Some("render") => {}
        _ => bail!(USAGE),
    }
    let output = iter.next().map(PathBuf::from).ok_or_else(|| anyhow!(USAGE))?;
    let mut parsed = RenderArgs {
        output,
        csv: None,
        symbol: "BTC".to_string(),
        period: Period::default(),
        kind: ChartKind::default(),
        x_key: "timestamp".to_string(),
        y_key: "last".to_string(),
    };

    while let Some(flag) = iter.next() {
        let value = iter.next().ok_or_else(|| anyhow!("Missing value for {}\n{}", flag, USAGE))?;
        match flag.as_str() {
            "--csv" => parsed.csv = Some(PathBuf::from(value)),
            "--symbol" => parsed.symbol = value.to_uppercase(),
            "--period" => parsed.period = value.parse().map_err(|e: String| anyhow!(e))?,
            "--kind" => parsed.kind = value.parse().map_err(|e: String| anyhow!(e))?,
            "--x" => parsed.x_key = value.clone(),
            "--y" => parsed.y_key = value.clone(),
            other => bail!("Unknown option {}\n{}", other, USAGE),
        }
    }
    Ok(parsed)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&argv)?;
    let settings = EngineSettings::from_env().context("Failed to load engine settings")?;

    let records = match &args.csv {
        Some(path) => {
            info!(path = %path.display(), "Rendering from CSV");
            load_records_from_csv(path)?
        }
        None => {
            info!(symbol = %args.symbol, period = %args.period, api = %settings.api_base_url, "Rendering from API");
            let client = ApiClient::from_settings(&settings)?;
            engine::fetch_ticker_records(&client, &settings, &args.symbol, args.period)
                .await
                .map_err(|e| anyhow!(e.user_message()))?
        }
    };

    let renderer =
        ChartRenderer::from_settings(&settings, ChartStyle::default()).with_formatters(Formatters::for_period(args.period));
    let spec = PriceChartSpec::new(args.kind)
        .with_keys(args.x_key.clone(), args.y_key.clone())
        .with_label(args.symbol.clone())
        .with_color(symbol_color(&args.symbol));

    let output = renderer.render_price_chart(&records, &spec, None);
    if output.is_placeholder() {
        tracing::warn!(records = records.len(), "No drawable data, writing placeholder");
    }
    std::fs::write(&args.output, renderer.to_svg(&output))
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!(output = %args.output.display(), records = records.len(), "Chart written");
    Ok(())
}
