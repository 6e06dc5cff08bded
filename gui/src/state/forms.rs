// Edit buffers behind the configuration forms
use shared::models::{
    ChartKind, CryptoConfiguration, CryptoConfigurationRequest, Period, VisualizationParameter,
    VisualizationParameterRequest,
};

/// Periods a saved visualization may use.
pub const VISUALIZATION_PERIODS: [Period; 4] = [Period::Hour1, Period::Hour24, Period::Day7, Period::Day30];

pub fn chart_kind_label(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Candlestick => "Chandeliers",
        ChartKind::Line => "Ligne",
        ChartKind::Area => "Aire",
        ChartKind::Bar => "Barres",
    }
}

/// Create/edit buffer of the visualization manager. `editing` holds the id being updated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisualizationForm {
    pub editing: Option<u64>,
    pub request: VisualizationParameterRequest,
}

impl VisualizationForm {
    pub fn edit(config: &VisualizationParameter) -> Self {
        Self { editing: Some(config.id), request: VisualizationParameterRequest::from(config) }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_symbol(&mut self, symbol: &str) {
        self.request.crypto_symbol = symbol.trim().to_uppercase();
    }

    pub fn has_indicator(&self, name: &str) -> bool {
        self.request.indicators.iter().any(|i| i == name)
    }

    /// Adds `name` if absent, removes it otherwise. Order of first selection is kept.
    pub fn toggle_indicator(&mut self, name: &str) {
        if self.has_indicator(name) {
            self.request.indicators.retain(|i| i != name);
        } else {
            self.request.indicators.push(name.to_string());
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.request.name.trim().is_empty() && !self.request.crypto_symbol.trim().is_empty()
    }

    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Modifier visualisation"
        } else {
            "Nouvelle visualisation"
        }
    }

    pub fn success_message(&self) -> &'static str {
        if self.editing.is_some() {
            "Configuration mise à jour avec succès!"
        } else {
            "Configuration ajoutée avec succès!"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CryptoForm {
    pub editing: Option<u64>,
    pub symbol: String,
    pub name: String,
    pub is_active: bool,
}

impl CryptoForm {
    pub fn new() -> Self {
        Self { is_active: true, ..Self::default() }
    }

    pub fn edit(config: &CryptoConfiguration) -> Self {
        Self {
            editing: Some(config.id),
            symbol: config.symbol.clone(),
            name: config.name.clone(),
            is_active: config.is_active,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.symbol.trim().is_empty() && !self.name.trim().is_empty()
    }

    pub fn to_request(&self) -> CryptoConfigurationRequest {
        CryptoConfigurationRequest {
            symbol: self.symbol.trim().to_uppercase(),
            name: self.name.trim().to_string(),
            is_active: Some(self.is_active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::indicators::Indicators;

    #[test]
    fn test_new_visualization_defaults() {
        let form = VisualizationForm::default();
        assert_eq!(form.editing, None);
        assert_eq!(form.request.name, "");
        assert_eq!(form.request.time_range, "24h");
        assert_eq!(form.request.chart_type, ChartKind::Candlestick);
        assert!(form.request.indicators.is_empty());
        assert!(!form.can_submit());
        assert_eq!(form.title(), "Nouvelle visualisation");
    }

    #[test]
    fn test_toggle_indicators() {
        let mut form = VisualizationForm::default();
        form.toggle_indicator("RSI");
        form.toggle_indicator("SMA_20");
        assert_eq!(form.request.indicators, vec!["RSI", "SMA_20"]);
        form.toggle_indicator("RSI");
        assert_eq!(form.request.indicators, vec!["SMA_20"]);
        assert!(form.has_indicator("SMA_20"));
    }

    #[test]
    fn test_edit_then_reset() {
        let config = VisualizationParameter {
            id: 9,
            name: "BTC swing".to_string(),
            crypto_symbol: "BTC".to_string(),
            time_range: "7d".to_string(),
            chart_type: ChartKind::Area,
            indicators: Indicators::parse("SMA_50, MACD"),
            created_at: String::new(),
            updated_at: String::new(),
        };
        let mut form = VisualizationForm::edit(&config);
        assert_eq!(form.editing, Some(9));
        assert_eq!(form.request.indicators, vec!["SMA_50", "MACD"]);
        assert!(form.can_submit());
        assert_eq!(form.success_message(), "Configuration mise à jour avec succès!");

        form.set_symbol(" eth ");
        assert_eq!(form.request.crypto_symbol, "ETH");
        form.reset();
        assert_eq!(form, VisualizationForm::default());
    }

    #[test]
    fn test_crypto_form_request() {
        let mut form = CryptoForm::new();
        assert!(form.is_active);
        assert!(!form.can_submit());
        form.symbol = " ada/usd".to_string();
        form.name = "Cardano ".to_string();
        let request = form.to_request();
        assert_eq!(request.symbol, "ADA/USD");
        assert_eq!(request.name, "Cardano");
        assert_eq!(request.is_active, Some(true));
    }
}
