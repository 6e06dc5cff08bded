// Dashboard colours, exposed to the markup as CSS custom properties
use engine::render::ChartStyle;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn palette(&self) -> ThemePalette {
        match self {
            Theme::Dark => ThemePalette::default_dark(),
            Theme::Light => ThemePalette::default_light(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemePalette {
    pub background: String,
    pub background_secondary: String,
    pub background_card: String,
    pub foreground: String,
    pub foreground_muted: String,
    pub border: String,
    pub accent_primary: String,
    pub accent_success: String,
    pub accent_danger: String,
    pub accent_warning: String,
}

impl ThemePalette {
    pub fn default_dark() -> Self {
        Self {
            background: "#0b0e14".to_string(),
            background_secondary: "#131722".to_string(),
            background_card: "#1a1e2b".to_string(),
            foreground: "#d1d4dc".to_string(),
            foreground_muted: "#8b92a5".to_string(),
            border: "#2a2e39".to_string(),
            accent_primary: "#3b82f6".to_string(),
            accent_success: "#10b981".to_string(),
            accent_danger: "#ef4444".to_string(),
            accent_warning: "#f59e0b".to_string(),
        }
    }

    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            background_secondary: "#f3f4f6".to_string(),
            background_card: "#ffffff".to_string(),
            foreground: "#111827".to_string(),
            foreground_muted: "#6b7280".to_string(),
            border: "#e5e7eb".to_string(),
            accent_primary: "#2563eb".to_string(),
            accent_success: "#059669".to_string(),
            accent_danger: "#dc2626".to_string(),
            accent_warning: "#d97706".to_string(),
        }
    }

    /// `--name: value;` declarations for the root element's `style`.
    pub fn css_variables(&self) -> String {
        [
            ("--background", &self.background),
            ("--background-secondary", &self.background_secondary),
            ("--background-card", &self.background_card),
            ("--foreground", &self.foreground),
            ("--foreground-muted", &self.foreground_muted),
            ("--border-color", &self.border),
            ("--accent-primary", &self.accent_primary),
            ("--accent-success", &self.accent_success),
            ("--accent-danger", &self.accent_danger),
            ("--accent-warning", &self.accent_warning),
        ]
        .iter()
        .map(|(name, value)| format!("{}: {};", name, value))
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Chart style whose grid and axis text follow this palette.
    pub fn chart_style(&self, base: &ChartStyle) -> ChartStyle {
        ChartStyle {
            grid: self.border.clone(),
            axis_text: self.foreground_muted.clone(),
            crosshair: self.foreground_muted.clone(),
            ..base.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_variables_cover_the_palette() {
        let css = Theme::Dark.palette().css_variables();
        assert!(css.starts_with("--background: #0b0e14;"));
        assert!(css.contains("--accent-danger: #ef4444;"));
        assert_eq!(css.matches(';').count(), 10);
    }

    #[test]
    fn test_chart_style_keeps_candle_colours() {
        let base = ChartStyle::default();
        let style = Theme::Light.palette().chart_style(&base);
        assert_eq!(style.grid, "#e5e7eb");
        assert_eq!(style.axis_text, "#6b7280");
        assert_eq!(style.bullish, base.bullish);
        assert_eq!(style.palette, base.palette);
    }

    #[test]
    fn test_theme_deserializes_lowercase() {
        let theme: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(theme, Theme::Light);
    }
}
