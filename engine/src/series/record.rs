//! Raw API records and field coercion.

use serde::Serialize;
use serde_json::Value;
use shared::utils::time::parse_timestamp_millis;

/// UTC epoch milliseconds.
pub type Timestamp = i64;

/// One already-fetched API record: field name -> string, number or null.
pub type RawRecord = serde_json::Map<String, Value>;

/// Reads a field as a timestamp. Strings are parsed as dates, numbers are epoch milliseconds.
/// Floats outside the `i64` range are unusable and read as null.
pub fn timestamp_of(value: &Value) -> Option<Timestamp> {
    match value {
        Value::String(s) => parse_timestamp_millis(s).or_else(|| s.trim().parse::<i64>().ok()),
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(millis_from_float)),
        _ => None,
    }
}

fn millis_from_float(f: f64) -> Option<Timestamp> {
    let rounded = f.round();
    (rounded >= i64::MIN as f64 && rounded < i64::MAX as f64).then_some(rounded as i64)
}

/// Reads a field as a finite number. Numeric strings count; null, bools and text do not.
pub fn number_of(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|f| f.is_finite())
}

pub fn field_timestamp(record: &RawRecord, key: &str) -> Option<Timestamp> {
    record.get(key).and_then(timestamp_of)
}

pub fn field_number(record: &RawRecord, key: &str) -> Option<f64> {
    record.get(key).and_then(number_of)
}

/// Projects typed wire models into raw records so any of them can feed a chart.
pub fn records_from<T: Serialize>(items: &[T]) -> Result<Vec<RawRecord>, serde_json::Error> {
    items
        .iter()
        .map(|item| match serde_json::to_value(item)? {
            Value::Object(map) => Ok(map),
            other => {
                let mut map = RawRecord::new();
                map.insert("value".to_string(), other);
                Ok(map)
            }
        })
        .collect()
}
