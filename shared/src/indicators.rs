//! Indicator lists attached to a visualization configuration.
//!
//! The API sends `indicators` as a JSON array, as a string holding a JSON
//! array, or as a comma separated string. Everything is folded into one
//! canonical list when the record is deserialized.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Canonical indicator names, e.g. `["SMA_20", "RSI"]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Indicators(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIndicators {
    List(Vec<String>),
    Text(String),
    Other(Value),
}

impl Indicators {
    pub fn new(names: Vec<String>) -> Self {
        Self(clean(names))
    }

    /// Parses the string shape: a JSON array if it looks like one, else a comma list.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        if trimmed.starts_with('[') {
            return match serde_json::from_str::<Vec<String>>(trimmed) {
                Ok(names) => Self::new(names),
                Err(e) => {
                    tracing::debug!(error = %e, raw = trimmed, "Indicator string is not a JSON array, keeping it whole");
                    Self(vec![trimmed.to_string()])
                }
            };
        }
        Self::new(trimmed.split(',').map(str::to_string).collect())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}

fn clean(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect()
}

impl From<Vec<String>> for Indicators {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl<'de> Deserialize<'de> for Indicators {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawIndicators>::deserialize(deserializer)?;
        Ok(match raw {
            None => Self::default(),
            Some(RawIndicators::List(names)) => Self::new(names),
            Some(RawIndicators::Text(text)) => Self::parse(&text),
            Some(RawIndicators::Other(Value::Array(items))) => Self::new(
                items
                    .into_iter()
                    .filter(|v| !v.is_null())
                    .map(|v| match v {
                        Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            Some(RawIndicators::Other(other)) => {
                tracing::debug!(value = %other, "Unexpected indicators shape, treating as empty");
                Self::default()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_json(json: &str) -> Indicators {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_comma_string() {
        assert_eq!(from_json(r#""RSI,MACD""#).as_slice(), ["RSI", "MACD"]);
        assert_eq!(Indicators::parse(" RSI , MACD ,").as_slice(), ["RSI", "MACD"]);
    }

    #[test]
    fn test_json_array_string() {
        assert_eq!(from_json(r#""[\"SMA_20\"]""#).as_slice(), ["SMA_20"]);
    }

    #[test]
    fn test_real_array() {
        assert_eq!(from_json(r#"["SMA_20", "BOLLINGER"]"#).as_slice(), ["SMA_20", "BOLLINGER"]);
    }

    #[test]
    fn test_null_and_empty() {
        assert!(from_json("null").is_empty());
        assert!(from_json(r#""""#).is_empty());
        assert!(from_json("[]").is_empty());
    }

    #[test]
    fn test_broken_json_string_kept_whole() {
        assert_eq!(Indicators::parse("[SMA_20").as_slice(), ["[SMA_20"]);
    }

    #[test]
    fn test_odd_shapes_do_not_fail() {
        assert_eq!(from_json(r#"["RSI", 14, null]"#).as_slice(), ["RSI", "14"]);
        assert!(from_json("42").is_empty());
        assert!(from_json(r#"{"a": 1}"#).is_empty());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let indicators = Indicators::parse("RSI,MACD");
        assert_eq!(serde_json::to_string(&indicators).unwrap(), r#"["RSI","MACD"]"#);
    }
}
