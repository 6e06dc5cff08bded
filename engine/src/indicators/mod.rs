// Moving-average overlays drawn on top of price charts.
pub mod ema;
pub mod sma;

pub use ema::Ema;
pub use sma::Sma;

// Common trait for all overlays
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    /// One output per input value; `None` where there is not enough history yet.
    fn calculate(&self, values: &[f64]) -> Vec<Option<f64>>;
}

/// Builds the overlay for an indicator name such as `SMA_20` or `ema_9`.
///
/// Names without a drawable overlay (`RSI`, `MACD`, `BOLLINGER`, …) return `None`
/// and are only shown as badges.
pub fn overlay_for(name: &str) -> Option<Box<dyn IndicatorCalculator>> {
    let (kind, period) = name.trim().split_once('_')?;
    let period: usize = period.trim().parse().ok().filter(|p| *p > 0)?;
    match kind.to_ascii_uppercase().as_str() {
        "SMA" => Some(Box::new(Sma::new(period))),
        "EMA" => Some(Box::new(Ema::new(period))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_for_names() {
        assert_eq!(overlay_for("SMA_20").map(|o| o.name().to_string()), Some("SMA(20)".to_string()));
        assert_eq!(overlay_for("ema_9").map(|o| o.name().to_string()), Some("EMA(9)".to_string()));
        assert!(overlay_for("RSI").is_none());
        assert!(overlay_for("MACD").is_none());
        assert!(overlay_for("SMA_0").is_none());
        assert!(overlay_for("SMA_x").is_none());
    }

    #[test]
    fn test_overlay_period_drives_warmup() {
        let values: Vec<f64> = (1..=60).map(f64::from).collect();
        let out = overlay_for("SMA_50").unwrap().calculate(&values);
        assert_eq!(out.iter().filter(|v| v.is_none()).count(), 49);
        assert_eq!(out[49], Some(25.5));
    }
}
