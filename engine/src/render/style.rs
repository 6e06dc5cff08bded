// Explicit chart style handed to the renderer. Replaces name-based global
// theme lookups: every colour a chart uses is resolved through this object.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A colour as written in a series configuration: either a literal CSS colour
/// (`#10b981`, `rgb(…)`, `hsl(…)`) or a palette name such as `primary`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorToken(pub String);

impl ColorToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn is_literal(&self) -> bool {
        let t = self.0.trim();
        t.starts_with('#') || t.starts_with("rgb") || t.starts_with("hsl")
    }
}

impl From<&str> for ColorToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub bullish: String,
    pub bearish: String,
    pub grid: String,
    pub grid_dash: String,
    pub axis_text: String,
    pub crosshair: String,
    pub default_series: String,
    pub font_size: f64,
    pub line_width: f64,
    pub bar_opacity: f64,
    /// Colours cycled through by indicator overlays.
    pub overlay_colors: Vec<String>,
    pub palette: BTreeMap<String, String>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        let palette = [
            ("primary", "#3b82f6"),
            ("success", "#10b981"),
            ("danger", "#ef4444"),
            ("warning", "#f59e0b"),
            ("accent", "#6366f1"),
            ("muted", "#6b7280"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            bullish: "#10b981".to_string(),
            bearish: "#ef4444".to_string(),
            grid: "#2a2e39".to_string(),
            grid_dash: "4 4".to_string(),
            axis_text: "#9ca3af".to_string(),
            crosshair: "#9ca3af".to_string(),
            default_series: "#3b82f6".to_string(),
            font_size: 12.0,
            line_width: 2.0,
            bar_opacity: 0.7,
            overlay_colors: vec!["#f59e0b".to_string(), "#a855f7".to_string(), "#06b6d4".to_string()],
            palette,
        }
    }
}

impl ChartStyle {
    /// Literal colours resolve to themselves, palette names to their entry and
    /// anything else to the default series colour.
    pub fn resolve(&self, token: &ColorToken) -> String {
        if token.is_literal() {
            return token.0.trim().to_string();
        }
        match self.palette.get(token.0.trim()) {
            Some(color) => color.clone(),
            None => {
                tracing::debug!(token = %token, "Unknown colour token, using default series colour");
                self.default_series.clone()
            }
        }
    }

    pub fn overlay_color(&self, index: usize) -> String {
        if self.overlay_colors.is_empty() {
            return self.default_series.clone();
        }
        self.overlay_colors[index % self.overlay_colors.len()].clone()
    }
}

/// Accent colour of a crypto widget, keyed by its base symbol.
pub fn symbol_color(symbol: &str) -> ColorToken {
    let color = match shared::utils::base_symbol(symbol).to_ascii_uppercase().as_str() {
        "BTC" => "#f59e0b",
        "ETH" => "#6366f1",
        "SOL" => "#14f195",
        _ => "#3b82f6",
    };
    ColorToken::new(color)
}
