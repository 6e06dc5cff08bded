// Indicator badges under a chart. Moving averages are drawn on the chart and their
// badge carries the overlay colour; the other indicators are listed as labels only.
#![allow(non_snake_case)]
use dioxus::prelude::*;
use engine::indicators::overlay_for;
use engine::render::ChartStyle;

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub name: String,
    /// Overlay colour, for indicators drawn on the chart.
    pub color: Option<String>,
}

impl Badge {
    pub fn class(&self) -> &'static str {
        if self.color.is_some() {
            "indicator-badge overlay"
        } else {
            "indicator-badge"
        }
    }

    pub fn inline_style(&self) -> String {
        match &self.color {
            Some(color) => format!("border-color: {}; color: {};", color, color),
            None => String::new(),
        }
    }
}

/// Badges in list order. Overlay colours are assigned in the same order the renderer uses.
pub fn badges(indicators: &[String], style: &ChartStyle) -> Vec<Badge> {
    let mut overlay_index = 0;
    indicators
        .iter()
        .map(|name| {
            let color = overlay_for(name).map(|_| {
                let color = style.overlay_color(overlay_index);
                overlay_index += 1;
                color
            });
            Badge { name: name.clone(), color }
        })
        .collect()
}

#[component]
pub fn IndicatorBadges(indicators: Vec<String>, style: ChartStyle) -> Element {
    if indicators.is_empty() {
        return None;
    }
    let badges = badges(&indicators, &style);

    rsx! {
        div { class: "indicator-badges",
            for badge in badges {
                span { key: "{badge.name}", class: "{badge.class()}", style: "{badge.inline_style()}", "{badge.name}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_badges_take_overlay_colours_in_order() {
        let style = ChartStyle::default();
        let names: Vec<String> = ["RSI", "SMA_20", "MACD", "EMA_50"].iter().map(|s| s.to_string()).collect();
        let badges = badges(&names, &style);
        assert_eq!(badges[0].color, None);
        assert_eq!(badges[1].color, Some(style.overlay_color(0)));
        assert_eq!(badges[2].color, None);
        assert_eq!(badges[3].color, Some(style.overlay_color(1)));
    }

    #[test]
    fn test_unparsable_overlay_names_are_plain_badges() {
        let names = vec!["SMA_0".to_string(), "BOLLINGER".to_string()];
        assert!(badges(&names, &ChartStyle::default()).iter().all(|b| b.color.is_none()));
    }
}
