// GUI configuration, mirroring assets/config/default.json
pub mod theme;

use engine::config::EngineSettings;
use engine::render::ChartStyle;
use serde::Deserialize;

use theme::Theme;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub version: String,
    pub app: AppSettings,
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub chart: ChartStyle,
    pub indicators: IndicatorOptions,
    #[serde(default)]
    pub tables: TableSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppSettings {
    pub title: String,
    pub theme: Theme,
    pub language: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct IndicatorOptions {
    /// Indicator names offered as toggles in the visualization form.
    pub available: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct TableSettings {
    pub max_rows: usize,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self { max_rows: 50 }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, anyhow::Error> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.engine.validate()?;
        Ok(config)
    }

    /// Embedded defaults, with the engine's environment overrides applied.
    pub fn load_default() -> Result<Self, anyhow::Error> {
        let config_str = include_str!("../../assets/config/default.json");
        let mut config = Self::from_json(config_str)?;
        config.engine = config.engine.with_env_overrides();
        Ok(config)
    }
}
