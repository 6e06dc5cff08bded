// Engine settings, loaded from a JSON file with environment overrides
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::EngineError;
use crate::resample::FillPolicy;
use crate::scale::Canvas;

/// Environment variable overriding `api_base_url`.
pub const API_URL_ENV: &str = "CRYPTO_VIZ_API_URL";
/// Environment variable pointing at a settings file.
pub const CONFIG_PATH_ENV: &str = "CRYPTO_VIZ_CONFIG";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub api_base_url: String,
    pub canvas: CanvasSettings,
    pub bucket_count: usize,
    pub fill_policy: FillPolicy,
    pub health_poll_secs: u64,
    pub live_refresh_secs: u64,
    /// Crypto symbol -> exchange pair used by the ticker endpoints.
    pub symbol_pairs: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        CanvasSettings { width: 800.0, height: 400.0 }
    }
}

impl From<CanvasSettings> for Canvas {
    fn from(settings: CanvasSettings) -> Self {
        Canvas::new(settings.width, settings.height)
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        let symbol_pairs = [
            ("BTC", "XXBTZEUR"),
            ("ETH", "XETHZEUR"),
            ("SOL", "SOLEUR"),
            ("DOGE", "XDGEZEUR"),
            ("ADA", "ADAEUR"),
            ("XRP", "XXRPZEUR"),
            ("DOT", "DOTEUR"),
            ("LTC", "XLTCZEUR"),
            ("LINK", "LINKEUR"),
        ]
        .into_iter()
        .map(|(s, p)| (s.to_string(), p.to_string()))
        .collect();

        EngineSettings {
            api_base_url: "http://10.50.4.81:8000".to_string(),
            canvas: CanvasSettings::default(),
            bucket_count: 50,
            fill_policy: FillPolicy::Skip,
            health_poll_secs: 30,
            live_refresh_secs: 15,
            symbol_pairs,
        }
    }
}

impl EngineSettings {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let settings: EngineSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("Failed to read settings file '{}': {}", path.display(), e))
        })?;
        let settings = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), api = %settings.api_base_url, "Loaded engine settings");
        Ok(settings)
    }

    /// Settings from `CRYPTO_VIZ_CONFIG` when set, defaults otherwise, then env overrides.
    pub fn from_env() -> Result<Self, EngineError> {
        let settings = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load(path)?,
            Err(_) => Self::default(),
        };
        Ok(settings.with_env_overrides())
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                tracing::debug!(url = %url, "API base URL overridden from environment");
                self.api_base_url = url.trim().to_string();
            }
        }
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.api_base_url.trim().is_empty() {
            return Err(EngineError::ConfigError("api_base_url must not be empty".to_string()));
        }
        if !(self.canvas.width > 0.0 && self.canvas.height > 0.0) {
            return Err(EngineError::ConfigError(format!(
                "canvas must have a positive size, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        if self.bucket_count == 0 {
            return Err(EngineError::ConfigError("bucket_count must be greater than 0".to_string()));
        }
        Ok(())
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas.into()
    }

    /// Resolves the exchange pair for a crypto symbol (`BTC` or `BTC/USD`).
    pub fn pair_for(&self, symbol: &str) -> Result<&str, EngineError> {
        let base = shared::utils::base_symbol(symbol.trim());
        self.symbol_pairs
            .get(base)
            .or_else(|| self.symbol_pairs.get(&base.to_uppercase()))
            .map(String::as_str)
            .ok_or_else(|| EngineError::MissingPair(symbol.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.canvas.width, 800.0);
        assert_eq!(settings.canvas.height, 400.0);
        assert_eq!(settings.bucket_count, 50);
        assert_eq!(settings.fill_policy, FillPolicy::Skip);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = EngineSettings::from_json(r#"{"bucket_count": 20, "fill_policy": "forward_fill"}"#).unwrap();
        assert_eq!(settings.bucket_count, 20);
        assert_eq!(settings.fill_policy, FillPolicy::ForwardFill);
        assert_eq!(settings.health_poll_secs, 30);
        assert_eq!(settings.pair_for("BTC").unwrap(), "XXBTZEUR");
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(EngineSettings::from_json(r#"{"bucket_count": 0}"#).is_err());
        assert!(EngineSettings::from_json(r#"{"canvas": {"width": 0}}"#).is_err());
        assert!(EngineSettings::from_json("not json").is_err());
    }

    #[test]
    fn test_pair_lookup() {
        let settings = EngineSettings::default();
        assert_eq!(settings.pair_for("eth").unwrap(), "XETHZEUR");
        assert_eq!(settings.pair_for("SOL/USD").unwrap(), "SOLEUR");
        match settings.pair_for("MATIC") {
            Err(EngineError::MissingPair(sym)) => assert_eq!(sym, "MATIC"),
            other => panic!("expected MissingPair, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"api_base_url": "http://localhost:9000"}}"#).unwrap();
        let settings = EngineSettings::load(file.path()).unwrap();
        assert_eq!(settings.api_base_url, "http://localhost:9000");
        assert!(EngineSettings::load("/definitely/missing.json").is_err());
    }
}
