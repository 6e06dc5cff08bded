//! Resampler: time-equal buckets reduced to OHLC candles.

use serde::{Deserialize, Serialize};

use crate::series::TimePoint;

pub const DEFAULT_BUCKET_COUNT: usize = 50;

/// Open/high/low/close summary of one bucket. `timestamp` is the bucket
/// midpoint and only places the candle on the X axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub timestamp: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Number of source points reduced into this candle (0 for filled buckets).
    pub count: usize,
}

impl Candle {
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// What to emit for a bucket that received no points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    /// Emit nothing; consecutive candles may be unevenly spaced.
    #[default]
    Skip,
    /// Emit a flat candle at the previous close.
    ForwardFill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resampler {
    bucket_count: usize,
    fill: FillPolicy,
}

impl Default for Resampler {
    fn default() -> Self {
        Self { bucket_count: DEFAULT_BUCKET_COUNT, fill: FillPolicy::Skip }
    }
}

impl Resampler {
    pub fn new(bucket_count: usize) -> Self {
        Self { bucket_count, ..Self::default() }
    }

    pub fn with_fill_policy(mut self, fill: FillPolicy) -> Self {
        self.fill = fill;
        self
    }

    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    /// Buckets `points` (sorted ascending by timestamp) into `bucket_count`
    /// equal intervals.
    ///
    /// Buckets are half-open `[start, start + interval)` except the last, which
    /// also includes its upper edge so the final sample is never dropped.
    /// A non-positive interval (empty input, one point, one shared timestamp)
    /// yields no candles.
    pub fn resample(&self, points: &[TimePoint]) -> Vec<Candle> {
        let (first, last) = match (points.first(), points.last()) {
            (Some(f), Some(l)) => (f.timestamp, l.timestamp),
            _ => return Vec::new(),
        };
        if self.bucket_count == 0 {
            return Vec::new();
        }

        let start = first as f64;
        let interval = (last as f64 - start) / self.bucket_count as f64;
        if interval <= 0.0 {
            tracing::debug!(points = points.len(), "Degenerate time range, no candles produced");
            return Vec::new();
        }

        let mut buckets: Vec<Option<Candle>> = vec![None; self.bucket_count];
        for point in points {
            let offset = (point.timestamp as f64 - start) / interval;
            let index = (offset.floor().max(0.0) as usize).min(self.bucket_count - 1);
            let slot = &mut buckets[index];
            match slot {
                Some(candle) => {
                    candle.high = candle.high.max(point.value);
                    candle.low = candle.low.min(point.value);
                    candle.close = point.value;
                    candle.count += 1;
                }
                None => {
                    *slot = Some(Candle {
                        timestamp: start + index as f64 * interval + interval / 2.0,
                        open: point.value,
                        high: point.value,
                        low: point.value,
                        close: point.value,
                        count: 1,
                    });
                }
            }
        }

        let mut candles = Vec::with_capacity(self.bucket_count);
        let mut previous_close: Option<f64> = None;
        for (index, bucket) in buckets.into_iter().enumerate() {
            match (bucket, self.fill, previous_close) {
                (Some(candle), _, _) => {
                    previous_close = Some(candle.close);
                    candles.push(candle);
                }
                (None, FillPolicy::ForwardFill, Some(close)) => candles.push(Candle {
                    timestamp: start + index as f64 * interval + interval / 2.0,
                    open: close,
                    high: close,
                    low: close,
                    close,
                    count: 0,
                }),
                (None, _, _) => {}
            }
        }
        candles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(values: &[(i64, f64)]) -> Vec<TimePoint> {
        values.iter().map(|&(t, v)| TimePoint::new(t, v)).collect()
    }

    #[test]
    fn test_degenerate_inputs_produce_no_candles() {
        let r = Resampler::default();
        assert!(r.resample(&[]).is_empty());
        assert!(r.resample(&points(&[(5, 1.0)])).is_empty());
        assert!(r.resample(&points(&[(5, 1.0), (5, 2.0), (5, 3.0)])).is_empty());
        assert!(Resampler::new(0).resample(&points(&[(0, 1.0), (10, 2.0)])).is_empty());
    }

    #[test]
    fn test_single_bucket_scenario() {
        let candles = Resampler::new(1).resample(&points(&[(0, 10.0), (10, 20.0), (20, 5.0)]));
        assert_eq!(candles.len(), 1);
        let c = candles[0];
        assert_eq!((c.open, c.high, c.low, c.close), (10.0, 20.0, 5.0, 5.0));
        assert_eq!(c.timestamp, 10.0);
        assert_eq!(c.count, 3);
        assert!(!c.is_bullish());
    }

    #[test]
    fn test_final_boundary_point_is_kept() {
        let input = points(&[(0, 1.0), (50, 2.0), (100, 3.0)]);
        let candles = Resampler::new(2).resample(&input);
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[1].open, 2.0);
        assert_eq!(candles[1].close, 3.0);
        assert_eq!(candles.iter().map(|c| c.count).sum::<usize>(), input.len());
    }

    #[test]
    fn test_every_point_counted_exactly_once() {
        let input: Vec<TimePoint> = (0..137).map(|i| TimePoint::new(i * 13 + (i % 5), (i as f64).sin())).collect();
        for n in [1, 3, 7, 50, 200] {
            let candles = Resampler::new(n).resample(&input);
            assert_eq!(candles.iter().map(|c| c.count).sum::<usize>(), input.len(), "bucket count {}", n);
            assert!(candles.len() <= n);
            for c in &candles {
                assert!(c.low <= c.open && c.open <= c.high);
                assert!(c.low <= c.close && c.close <= c.high);
            }
        }
    }

    #[test]
    fn test_empty_buckets_are_skipped() {
        let input = points(&[(0, 1.0), (1, 2.0), (99, 5.0), (100, 4.0)]);
        let candles = Resampler::new(10).resample(&input);
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].timestamp, 5.0);
        assert_eq!(candles[1].timestamp, 95.0);
        assert_eq!((candles[1].open, candles[1].close), (5.0, 4.0));
    }

    #[test]
    fn test_forward_fill_emits_flat_candles() {
        let input = points(&[(0, 1.0), (1, 2.0), (99, 5.0), (100, 4.0)]);
        let candles = Resampler::new(10).with_fill_policy(FillPolicy::ForwardFill).resample(&input);
        assert_eq!(candles.len(), 10);
        let filled = candles[3];
        assert_eq!(filled.count, 0);
        assert_eq!((filled.open, filled.high, filled.low, filled.close), (2.0, 2.0, 2.0, 2.0));
        assert_eq!(candles.iter().map(|c| c.count).sum::<usize>(), 4);
    }

    #[test]
    fn test_extreme_timestamps_resample_without_overflow() {
        let input = points(&[(i64::MIN, 1.0), (0, 5.0), (i64::MAX, 2.0)]);
        let candles = Resampler::new(2).resample(&input);
        assert_eq!(candles.iter().map(|c| c.count).sum::<usize>(), 3);
        assert_eq!((candles[0].open, candles[1].close), (1.0, 2.0));
        assert!(candles[0].timestamp < 0.0 && candles[1].timestamp > 0.0);
    }

    #[test]
    fn test_open_close_follow_time_order_with_duplicates() {
        let input = points(&[(0, 3.0), (0, 4.0), (10, 1.0), (10, 2.0)]);
        let candles = Resampler::new(1).resample(&input);
        assert_eq!((candles[0].open, candles[0].close), (3.0, 2.0));
    }
}
