//! Series normalizer: filter, sort, project and measure raw records.

use super::record::{field_number, field_timestamp, RawRecord, Timestamp};

/// A single numeric observation at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimePoint {
    pub timestamp: Timestamp,
    pub value: f64,
}

impl TimePoint {
    pub fn new(timestamp: Timestamp, value: f64) -> Self {
        Self { timestamp, value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRow {
    pub timestamp: Timestamp,
    pub record: RawRecord,
}

/// Records sorted ascending by their x field. Duplicate timestamps are kept in input order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    rows: Vec<SeriesRow>,
}

impl Series {
    pub fn rows(&self) -> &[SeriesRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_timestamp(&self) -> Option<Timestamp> {
        self.rows.first().map(|r| r.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.rows.last().map(|r| r.timestamp)
    }

    pub fn value(&self, index: usize, key: &str) -> Option<f64> {
        self.rows.get(index).and_then(|r| field_number(&r.record, key))
    }

    /// Values of `key` aligned with the rows; missing samples stay `None`.
    pub fn column(&self, key: &str) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| field_number(&r.record, key)).collect()
    }

    /// Points for `key`, skipping rows without a value.
    pub fn points(&self, key: &str) -> Vec<TimePoint> {
        self.rows
            .iter()
            .filter_map(|r| field_number(&r.record, key).map(|v| TimePoint::new(r.timestamp, v)))
            .collect()
    }
}

/// Drops records whose `x_field` is null/missing/unparsable and sorts the rest by time.
///
/// Empty input yields an empty series, never an error.
pub fn normalize(raw: &[RawRecord], x_field: &str) -> Series {
    let mut rows: Vec<SeriesRow> = raw
        .iter()
        .filter_map(|record| {
            field_timestamp(record, x_field).map(|timestamp| SeriesRow { timestamp, record: record.clone() })
        })
        .collect();

    let dropped = raw.len() - rows.len();
    if dropped > 0 {
        tracing::debug!(dropped, x_field, "Dropped records without a usable x value");
    }

    // `sort_by_key` is stable: ties keep their input order.
    rows.sort_by_key(|r| r.timestamp);
    Series { rows }
}

/// Bounds a chart must span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub min_x: Timestamp,
    pub max_x: Timestamp,
    pub min_y: f64,
    pub max_y: f64,
}

impl Domain {
    /// X from the first/last rows, Y across every key's non-null values.
    /// Returns `None` for an empty series; a series with no numeric values gets `0..0`.
    pub fn from_series(series: &Series, keys: &[&str]) -> Option<Domain> {
        let (min_x, max_x) = (series.first_timestamp()?, series.last_timestamp()?);
        let values = series
            .rows()
            .iter()
            .flat_map(|r| keys.iter().filter_map(move |k| field_number(&r.record, k)));
        let (min_y, max_y) = min_max(values).unwrap_or((0.0, 0.0));
        Some(Domain { min_x, max_x, min_y, max_y })
    }

    /// Domain of sorted points.
    pub fn from_points(points: &[TimePoint]) -> Option<Domain> {
        let (first, last) = (points.first()?, points.last()?);
        let (min_y, max_y) = min_max(points.iter().map(|p| p.value))?;
        Some(Domain { min_x: first.timestamp, max_x: last.timestamp, min_y, max_y })
    }

    /// Same X span, Y replaced by the envelope of the given values (kept when empty).
    pub fn with_y_values(self, values: impl IntoIterator<Item = f64>) -> Domain {
        match min_max(values) {
            Some((min_y, max_y)) => Domain { min_y, max_y, ..self },
            None => self,
        }
    }

    /// Time span, floored at 1 so a single-instant domain never divides by zero.
    pub fn x_range(&self) -> f64 {
        (self.max_x as f64 - self.min_x as f64).max(1.0)
    }

    pub fn y_range(&self) -> f64 {
        self.max_y - self.min_y
    }
}

fn min_max(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("test records must be objects"),
        }
    }

    fn raw(values: Vec<Value>) -> Vec<RawRecord> {
        values.into_iter().map(record).collect()
    }

    #[test]
    fn test_normalize_sorts_and_filters_nulls() {
        let input = raw(vec![
            json!({"t": 30, "v": 3}),
            json!({"t": null, "v": 99}),
            json!({"t": 10, "v": 1}),
            json!({"v": 100}),
            json!({"t": 20, "v": 2}),
        ]);
        let series = normalize(&input, "t");
        assert_eq!(series.len(), input.len() - 2);
        let ts: Vec<_> = series.rows().iter().map(|r| r.timestamp).collect();
        assert_eq!(ts, vec![10, 20, 30]);
        assert_eq!(series.column("v"), vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_normalize_is_stable_for_ties() {
        let input = raw(vec![
            json!({"t": 5, "v": "first"}),
            json!({"t": 1, "v": 0}),
            json!({"t": 5, "v": "second"}),
            json!({"t": 5, "v": "third"}),
        ]);
        let series = normalize(&input, "t");
        let order: Vec<_> = series.rows().iter().map(|r| r.record["v"].clone()).collect();
        assert_eq!(order, vec![json!(0), json!("first"), json!("second"), json!("third")]);
    }

    #[test]
    fn test_normalize_parses_date_strings() {
        let input = raw(vec![
            json!({"timestamp": "2024-01-02T00:00:00Z", "last": 2}),
            json!({"timestamp": "2024-01-01T00:00:00Z", "last": 1}),
        ]);
        let series = normalize(&input, "timestamp");
        assert_eq!(series.points("last").iter().map(|p| p.value).collect::<Vec<_>>(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_normalize_empty_inputs() {
        assert!(normalize(&[], "t").is_empty());
        let all_null = raw(vec![json!({"t": null}), json!({"x": 1})]);
        assert!(normalize(&all_null, "t").is_empty());
    }

    #[test]
    fn test_domain_spans_all_series_keys() {
        let input = raw(vec![
            json!({"t": 0, "a": 5, "b": null}),
            json!({"t": 10, "a": 7, "b": -2}),
            json!({"t": 20, "a": null, "b": 12}),
        ]);
        let series = normalize(&input, "t");
        let domain = Domain::from_series(&series, &["a", "b"]).unwrap();
        assert_eq!(domain, Domain { min_x: 0, max_x: 20, min_y: -2.0, max_y: 12.0 });
    }

    #[test]
    fn test_domain_edge_cases() {
        assert!(Domain::from_series(&Series::default(), &["a"]).is_none());
        assert!(Domain::from_points(&[]).is_none());

        let input = raw(vec![json!({"t": 3, "a": null})]);
        let domain = Domain::from_series(&normalize(&input, "t"), &["a"]).unwrap();
        assert_eq!((domain.min_y, domain.max_y), (0.0, 0.0));
        assert_eq!(domain.x_range(), 1.0);
    }

    #[test]
    fn test_far_apart_timestamps_keep_a_positive_range() {
        let input = raw(vec![
            json!({"t": 9.0e18, "a": 2}),
            json!({"t": -9.0e18, "a": 1}),
            json!({"t": 1.0e20, "a": 3}),
        ]);
        let series = normalize(&input, "t");
        assert_eq!(series.len(), 2);
        let domain = Domain::from_series(&series, &["a"]).unwrap();
        assert_eq!(domain.x_range(), 1.8e19);

        let extremes = Domain { min_x: i64::MIN, max_x: i64::MAX, min_y: 0.0, max_y: 1.0 };
        assert!(extremes.x_range() > 1.8e19);
    }

    #[test]
    fn test_with_y_values() {
        let domain = Domain::from_points(&[TimePoint::new(0, 1.0), TimePoint::new(5, 2.0)]).unwrap();
        let widened = domain.with_y_values([0.5, 3.0]);
        assert_eq!((widened.min_y, widened.max_y), (0.5, 3.0));
        assert_eq!(domain.with_y_values([]), domain);
    }
}
