//! Renderer: normalized series + scale mapper -> vector scene.
//!
//! Rendering is a pure function of (records, chart configuration, active index).
//! Empty input never fails; it produces [`RenderOutput::Placeholder`].

pub mod scene;
pub mod style;
pub mod svg;

use serde::{Deserialize, Serialize};
use shared::models::{ChartKind, Period};
use shared::utils::{french_format, time};
use std::fmt;
use std::sync::Arc;

use crate::config::EngineSettings;
use crate::indicators::overlay_for;
use crate::interaction;
use crate::resample::{Candle, Resampler};
use crate::scale::{Canvas, ScaleMapper};
use crate::series::{normalize, Domain, RawRecord, TimePoint};

pub use scene::{LinearGradient, Point, Primitive, Scene, TextAnchor};
pub use style::{symbol_color, ChartStyle, ColorToken};

pub const PLACEHOLDER_MESSAGE: &str = "Pas de données";
pub const BAR_WIDTH_RATIO: f64 = 0.8;
pub const CANDLE_WIDTH_RATIO: f64 = 0.7;
const SCATTER_RADIUS: f64 = 4.0;
const ACTIVE_SCATTER_RADIUS: f64 = 6.0;
const GRID_STEPS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
    Area,
    Bar,
    Scatter,
}

/// How to draw one named field of the records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub key: String,
    pub label: String,
    pub color: ColorToken,
    pub kind: SeriesKind,
}

impl SeriesSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>, color: impl Into<String>, kind: SeriesKind) -> Self {
        Self { key: key.into(), label: label.into(), color: ColorToken(color.into()), kind }
    }
}

/// Single value series drawn in one of the price chart kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceChartSpec {
    pub x_key: String,
    pub value_key: String,
    pub label: String,
    pub kind: ChartKind,
    pub color: ColorToken,
    /// Indicator names; `SMA_<n>` / `EMA_<n>` become overlays.
    pub indicators: Vec<String>,
}

impl PriceChartSpec {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            x_key: "timestamp".to_string(),
            value_key: "last".to_string(),
            label: "Prix".to_string(),
            kind,
            color: ColorToken::new("primary"),
            indicators: Vec::new(),
        }
    }

    pub fn with_keys(mut self, x_key: impl Into<String>, value_key: impl Into<String>) -> Self {
        self.x_key = x_key.into();
        self.value_key = value_key.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_color(mut self, color: ColorToken) -> Self {
        self.color = color;
        self
    }

    pub fn with_indicators(mut self, indicators: Vec<String>) -> Self {
        self.indicators = indicators;
        self
    }
}

pub type LabelFormatter = Arc<dyn Fn(f64) -> String + Send + Sync>;

/// Axis and tooltip label formatting. X receives epoch milliseconds.
#[derive(Clone)]
pub struct Formatters {
    pub x: LabelFormatter,
    pub y: LabelFormatter,
}

impl Default for Formatters {
    fn default() -> Self {
        Self {
            x: Arc::new(|t: f64| time::format_date(t.round() as i64)),
            y: Arc::new(french_format::format_price),
        }
    }
}

impl Formatters {
    /// Time-of-day X labels, for intraday periods.
    pub fn intraday() -> Self {
        Self { x: Arc::new(|t: f64| time::format_time(t.round() as i64)), ..Self::default() }
    }

    /// Time of day up to one hour of history, dates beyond.
    pub fn for_period(period: Period) -> Self {
        match period {
            Period::Live | Period::Minute1 | Period::Minute5 | Period::Minute30 | Period::Hour1 => Self::intraday(),
            Period::Hour24 | Period::Day7 | Period::Day30 => Self::default(),
        }
    }
}

impl fmt::Debug for Formatters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatters").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipRow {
    pub label: String,
    pub color: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub title: String,
    pub screen_x: f64,
    pub rows: Vec<TooltipRow>,
}

#[derive(Debug, Clone)]
pub struct ChartFrame {
    pub scene: Scene,
    pub mapper: ScaleMapper,
    /// X of every hoverable element, in the order [`interaction::locate`] returns indices for.
    pub hit_times: Vec<f64>,
    pub candles: Vec<Candle>,
    pub tooltip: Option<Tooltip>,
}

impl ChartFrame {
    pub fn locate(&self, pointer_x: f64) -> Option<usize> {
        interaction::locate(pointer_x, &self.hit_times, &self.mapper)
    }
}

#[derive(Debug, Clone)]
pub enum RenderOutput {
    Placeholder { message: String },
    Chart(ChartFrame),
}

impl RenderOutput {
    pub fn placeholder() -> Self {
        RenderOutput::Placeholder { message: PLACEHOLDER_MESSAGE.to_string() }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, RenderOutput::Placeholder { .. })
    }

    pub fn frame(&self) -> Option<&ChartFrame> {
        match self {
            RenderOutput::Chart(frame) => Some(frame),
            RenderOutput::Placeholder { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartRenderer {
    style: ChartStyle,
    formatters: Formatters,
    canvas: Canvas,
    resampler: Resampler,
    show_axes: bool,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(ChartStyle::default())
    }
}

impl ChartRenderer {
    pub fn new(style: ChartStyle) -> Self {
        Self {
            style,
            formatters: Formatters::default(),
            canvas: Canvas::default(),
            resampler: Resampler::default(),
            show_axes: true,
        }
    }

    pub fn from_settings(settings: &EngineSettings, style: ChartStyle) -> Self {
        Self::new(style)
            .with_canvas(settings.canvas())
            .with_resampler(Resampler::new(settings.bucket_count).with_fill_policy(settings.fill_policy))
    }

    pub fn with_canvas(mut self, canvas: Canvas) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn with_formatters(mut self, formatters: Formatters) -> Self {
        self.formatters = formatters;
        self
    }

    pub fn with_resampler(mut self, resampler: Resampler) -> Self {
        self.resampler = resampler;
        self
    }

    pub fn with_axes(mut self, show_axes: bool) -> Self {
        self.show_axes = show_axes;
        self
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// SVG document for any render output; placeholders become a centred message.
    pub fn to_svg(&self, output: &RenderOutput) -> String {
        match output {
            RenderOutput::Chart(frame) => frame.scene.to_svg(),
            RenderOutput::Placeholder { message } => {
                let mut scene = Scene::new(self.canvas.width, self.canvas.height);
                scene.push(Primitive::Text {
                    at: (self.canvas.width / 2.0, self.canvas.height / 2.0),
                    content: message.clone(),
                    fill: self.style.axis_text.clone(),
                    size: self.style.font_size,
                    anchor: TextAnchor::Middle,
                });
                scene.to_svg()
            }
        }
    }

    /// One value field drawn as candlesticks, line, area or bars, with optional
    /// moving-average overlays.
    pub fn render_price_chart(&self, records: &[RawRecord], spec: &PriceChartSpec, active: Option<usize>) -> RenderOutput {
        let series = normalize(records, &spec.x_key);
        let points = series.points(&spec.value_key);
        let domain = match Domain::from_series(&series, &[spec.value_key.as_str()]) {
            Some(domain) if !points.is_empty() => domain,
            _ => return RenderOutput::placeholder(),
        };

        let mut kind = spec.kind;
        let candles = match kind {
            ChartKind::Candlestick => {
                let candles = self.resampler.resample(&points);
                if candles.is_empty() {
                    tracing::debug!(points = points.len(), "No candles for this range, drawing a line instead");
                    kind = ChartKind::Line;
                }
                candles
            }
            _ => Vec::new(),
        };
        let domain = domain.with_y_values(candles.iter().flat_map(|c| [c.high, c.low]));
        let mapper = ScaleMapper::new(domain, self.canvas);

        let mut scene = Scene::new(self.canvas.width, self.canvas.height);
        if self.show_axes {
            self.draw_axes(&mut scene, &mapper);
        }

        let color = self.style.resolve(&spec.color);
        let times: Vec<f64> = series.rows().iter().map(|r| r.timestamp as f64).collect();
        let column = series.column(&spec.value_key);
        match kind {
            ChartKind::Candlestick => self.draw_candles(&mut scene, &mapper, &candles),
            ChartKind::Line => self.draw_line(&mut scene, &mapper, &times, &column, &color, false),
            ChartKind::Area => self.draw_line(&mut scene, &mapper, &times, &column, &color, true),
            ChartKind::Bar => self.draw_bars(&mut scene, &mapper, &times, &column, &color),
        }

        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        let point_times: Vec<f64> = points.iter().map(|p| p.timestamp as f64).collect();
        let overlays: Vec<(String, String, Vec<Option<f64>>)> = spec
            .indicators
            .iter()
            .filter_map(|name| overlay_for(name).map(|overlay| (name.clone(), overlay)))
            .enumerate()
            .map(|(i, (name, overlay))| (name, self.style.overlay_color(i), overlay.calculate(&values)))
            .collect();
        for (_, overlay_color, output) in &overlays {
            self.draw_polyline_segments(&mut scene, &mapper, &point_times, output, overlay_color);
        }

        let hit_times: Vec<f64> = if candles.is_empty() {
            point_times
        } else {
            candles.iter().map(|c| c.timestamp).collect()
        };

        let active = active.filter(|&i| i < hit_times.len());
        let tooltip = active.map(|index| {
            let x = hit_times[index];
            self.draw_crosshair(&mut scene, &mapper, x);
            let rows = match candles.get(index) {
                Some(candle) => self.candle_rows(candle),
                None => {
                    let point: TimePoint = points[index];
                    if kind != ChartKind::Bar {
                        self.draw_marker(&mut scene, &mapper, x, point.value, &color);
                    }
                    let mut rows = vec![TooltipRow {
                        label: spec.label.clone(),
                        color: color.clone(),
                        value: (self.formatters.y)(point.value),
                    }];
                    rows.extend(overlays.iter().filter_map(|(name, overlay_color, output)| {
                        output.get(index).copied().flatten().map(|v| TooltipRow {
                            label: name.clone(),
                            color: overlay_color.clone(),
                            value: (self.formatters.y)(v),
                        })
                    }));
                    rows
                }
            };
            Tooltip { title: (self.formatters.x)(x), screen_x: mapper.map_x(x), rows }
        });

        RenderOutput::Chart(ChartFrame { scene, mapper, hit_times, candles, tooltip })
    }

    /// Several fields over a shared time axis and a shared value axis.
    pub fn render_series_chart(
        &self,
        records: &[RawRecord],
        x_key: &str,
        specs: &[SeriesSpec],
        active: Option<usize>,
    ) -> RenderOutput {
        let series = normalize(records, x_key);
        let columns: Vec<Vec<Option<f64>>> = specs.iter().map(|s| series.column(&s.key)).collect();
        if !columns.iter().flatten().any(Option::is_some) {
            return RenderOutput::placeholder();
        }
        let keys: Vec<&str> = specs.iter().map(|s| s.key.as_str()).collect();
        let domain = match Domain::from_series(&series, &keys) {
            Some(domain) => domain,
            None => return RenderOutput::placeholder(),
        };
        let mapper = ScaleMapper::new(domain, self.canvas);

        let mut scene = Scene::new(self.canvas.width, self.canvas.height);
        if self.show_axes {
            self.draw_axes(&mut scene, &mapper);
        }

        let times: Vec<f64> = series.rows().iter().map(|r| r.timestamp as f64).collect();
        let active = active.filter(|&i| i < times.len());
        let colors: Vec<String> = specs.iter().map(|s| self.style.resolve(&s.color)).collect();

        for ((spec, column), color) in specs.iter().zip(&columns).zip(&colors) {
            match spec.kind {
                SeriesKind::Line => self.draw_line(&mut scene, &mapper, &times, column, color, false),
                SeriesKind::Area => self.draw_line(&mut scene, &mapper, &times, column, color, true),
                SeriesKind::Bar => self.draw_bars(&mut scene, &mapper, &times, column, color),
                SeriesKind::Scatter => {
                    for (row, (t, value)) in times.iter().zip(column).enumerate() {
                        if let Some(y) = mapper.map_y(*value) {
                            let radius = if active == Some(row) { ACTIVE_SCATTER_RADIUS } else { SCATTER_RADIUS };
                            scene.push(Primitive::Circle { center: (mapper.map_x(*t), y), radius, fill: color.clone() });
                        }
                    }
                }
            }
        }

        let tooltip = active.map(|index| {
            let x = times[index];
            self.draw_crosshair(&mut scene, &mapper, x);
            let rows = specs
                .iter()
                .zip(&columns)
                .zip(&colors)
                .filter_map(|((spec, column), color)| {
                    column[index].map(|v| TooltipRow {
                        label: spec.label.clone(),
                        color: color.clone(),
                        value: (self.formatters.y)(v),
                    })
                })
                .collect();
            Tooltip { title: (self.formatters.x)(x), screen_x: mapper.map_x(x), rows }
        });

        RenderOutput::Chart(ChartFrame { scene, mapper, hit_times: times, candles: Vec::new(), tooltip })
    }

    fn draw_axes(&self, scene: &mut Scene, mapper: &ScaleMapper) {
        let (w, h) = (self.canvas.width, self.canvas.height);
        for step in GRID_STEPS {
            scene.push(Primitive::Line {
                from: (0.0, h * step),
                to: (w, h * step),
                stroke: self.style.grid.clone(),
                width: 1.0,
                dash: Some(self.style.grid_dash.clone()),
            });
        }

        let size = self.style.font_size;
        let domain = mapper.domain();
        let mid_x = domain.min_x as f64 / 2.0 + domain.max_x as f64 / 2.0;
        let labels = [
            ((w - 4.0, size + 2.0), (self.formatters.y)(mapper.effective_max_y()), TextAnchor::End),
            ((w - 4.0, h - size - 8.0), (self.formatters.y)(mapper.effective_min_y()), TextAnchor::End),
            ((4.0, h - 4.0), (self.formatters.x)(domain.min_x as f64), TextAnchor::Start),
            ((w / 2.0, h - 4.0), (self.formatters.x)(mid_x), TextAnchor::Middle),
            ((w - 4.0, h - 4.0), (self.formatters.x)(domain.max_x as f64), TextAnchor::End),
        ];
        for (at, content, anchor) in labels {
            scene.push(Primitive::Text { at, content, fill: self.style.axis_text.clone(), size, anchor });
        }
    }

    /// Splits the samples at missing values; a gap is never bridged.
    fn segments(mapper: &ScaleMapper, times: &[f64], values: &[Option<f64>]) -> Vec<Vec<Point>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for (t, value) in times.iter().zip(values) {
            match mapper.map_y(*value) {
                Some(y) => current.push((mapper.map_x(*t), y)),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    fn draw_polyline_segments(&self, scene: &mut Scene, mapper: &ScaleMapper, times: &[f64], values: &[Option<f64>], color: &str) {
        for points in Self::segments(mapper, times, values) {
            scene.push(Primitive::Polyline { points, stroke: color.to_string(), width: self.style.line_width });
        }
    }

    fn draw_line(&self, scene: &mut Scene, mapper: &ScaleMapper, times: &[f64], values: &[Option<f64>], color: &str, fill: bool) {
        let baseline = self.canvas.height;
        for points in Self::segments(mapper, times, values) {
            if fill {
                let gradient_id = scene.gradient_for(color);
                scene.push(Primitive::Area { points: points.clone(), baseline, gradient_id });
            }
            scene.push(Primitive::Polyline { points, stroke: color.to_string(), width: self.style.line_width });
        }
    }

    fn draw_bars(&self, scene: &mut Scene, mapper: &ScaleMapper, times: &[f64], values: &[Option<f64>], color: &str) {
        let count = values.iter().filter(|v| v.is_some()).count().max(1);
        let width = self.canvas.width / count as f64 * BAR_WIDTH_RATIO;
        for (t, value) in times.iter().zip(values) {
            if let Some(y) = mapper.map_y(*value) {
                scene.push(Primitive::Rect {
                    x: mapper.map_x(*t) - width / 2.0,
                    y,
                    width,
                    height: (self.canvas.height - y).max(0.0),
                    fill: color.to_string(),
                    opacity: self.style.bar_opacity,
                });
            }
        }
    }

    fn draw_candles(&self, scene: &mut Scene, mapper: &ScaleMapper, candles: &[Candle]) {
        let bucket_count = self.resampler.bucket_count().max(1);
        let width = self.canvas.width / bucket_count as f64 * CANDLE_WIDTH_RATIO;
        for candle in candles {
            let x = mapper.map_x(candle.timestamp);
            let color = if candle.is_bullish() { &self.style.bullish } else { &self.style.bearish };
            let (y_open, y_close) = (mapper.map_value(candle.open), mapper.map_value(candle.close));
            scene.push(Primitive::Line {
                from: (x, mapper.map_value(candle.high)),
                to: (x, mapper.map_value(candle.low)),
                stroke: color.clone(),
                width: 1.0,
                dash: None,
            });
            let body = (y_close - y_open).abs();
            scene.push(Primitive::Rect {
                x: x - width / 2.0,
                y: y_open.min(y_close),
                width,
                height: if body > 0.0 { body } else { 1.0 },
                fill: color.clone(),
                opacity: 1.0,
            });
        }
    }

    fn draw_crosshair(&self, scene: &mut Scene, mapper: &ScaleMapper, t: f64) {
        let x = mapper.map_x(t);
        scene.push(Primitive::Line {
            from: (x, 0.0),
            to: (x, self.canvas.height),
            stroke: self.style.crosshair.clone(),
            width: 1.0,
            dash: Some("3 3".to_string()),
        });
    }

    fn draw_marker(&self, scene: &mut Scene, mapper: &ScaleMapper, t: f64, value: f64, color: &str) {
        scene.push(Primitive::Circle {
            center: (mapper.map_x(t), mapper.map_value(value)),
            radius: SCATTER_RADIUS,
            fill: color.to_string(),
        });
    }

    fn candle_rows(&self, candle: &Candle) -> Vec<TooltipRow> {
        let color = if candle.is_bullish() { &self.style.bullish } else { &self.style.bearish };
        [("Ouverture", candle.open), ("Plus haut", candle.high), ("Plus bas", candle.low), ("Clôture", candle.close)]
            .into_iter()
            .map(|(label, v)| TooltipRow { label: label.to_string(), color: color.clone(), value: (self.formatters.y)(v) })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn records(values: Vec<Value>) -> Vec<RawRecord> {
        values
            .into_iter()
            .map(|v| match v {
                Value::Object(map) => map,
                _ => panic!("test records must be objects"),
            })
            .collect()
    }

    fn ticks(values: &[(i64, f64)]) -> Vec<RawRecord> {
        records(values.iter().map(|(t, v)| json!({"timestamp": t, "last": v})).collect())
    }

    fn is_rect(p: &Primitive) -> bool {
        matches!(p, Primitive::Rect { .. })
    }

    fn is_polyline(p: &Primitive) -> bool {
        matches!(p, Primitive::Polyline { .. })
    }

    fn bare() -> ChartRenderer {
        ChartRenderer::default().with_axes(false)
    }

    #[test]
    fn test_empty_input_renders_placeholder() {
        let r = ChartRenderer::default();
        for kind in ChartKind::ALL {
            match r.render_price_chart(&[], &PriceChartSpec::new(kind), None) {
                RenderOutput::Placeholder { message } => assert_eq!(message, "Pas de données"),
                RenderOutput::Chart(_) => panic!("expected placeholder"),
            }
        }
        let specs = [SeriesSpec::new("v", "V", "primary", SeriesKind::Line)];
        assert!(r.render_series_chart(&[], "t", &specs, None).is_placeholder());
        let nulls = records(vec![json!({"t": 1, "v": null})]);
        assert!(r.render_series_chart(&nulls, "t", &specs, None).is_placeholder());
        assert!(r.to_svg(&RenderOutput::placeholder()).contains("Pas de données"));
    }

    #[test]
    fn test_candlestick_single_bucket() {
        let r = bare().with_resampler(Resampler::new(1));
        let out = r.render_price_chart(&ticks(&[(0, 10.0), (10, 20.0), (20, 5.0)]), &PriceChartSpec::new(ChartKind::Candlestick), None);
        let frame = out.frame().unwrap();
        assert_eq!(frame.candles.len(), 1);
        assert_eq!(frame.hit_times, vec![10.0]);
        assert_eq!(frame.scene.count(is_rect), 1);
        match &frame.scene.primitives[1] {
            Primitive::Rect { width, fill, .. } => {
                assert!((width - 800.0 * 0.7).abs() < 1e-9);
                assert_eq!(fill, &r.style().bearish);
            }
            other => panic!("unexpected primitive {:?}", other),
        }
    }

    #[test]
    fn test_flat_candle_body_is_one_unit_tall() {
        let r = bare().with_resampler(Resampler::new(1));
        let out = r.render_price_chart(&ticks(&[(0, 10.0), (10, 12.0), (20, 10.0)]), &PriceChartSpec::new(ChartKind::Candlestick), None);
        let heights: Vec<f64> = out
            .frame()
            .unwrap()
            .scene
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Rect { height, .. } => Some(*height),
                _ => None,
            })
            .collect();
        assert_eq!(heights, vec![1.0]);
    }

    #[test]
    fn test_degenerate_candlestick_falls_back_to_line() {
        let out = bare().render_price_chart(&ticks(&[(5, 1.0)]), &PriceChartSpec::new(ChartKind::Candlestick), None);
        let frame = out.frame().unwrap();
        assert!(frame.candles.is_empty());
        assert_eq!(frame.scene.count(is_polyline), 1);
    }

    #[test]
    fn test_line_breaks_at_missing_values() {
        let input = records(vec![
            json!({"timestamp": 0, "last": 1.0}),
            json!({"timestamp": 1, "last": 2.0}),
            json!({"timestamp": 2, "last": null}),
            json!({"timestamp": 3, "last": 4.0}),
            json!({"timestamp": 4, "last": 5.0}),
        ]);
        let out = bare().render_price_chart(&input, &PriceChartSpec::new(ChartKind::Line), None);
        assert_eq!(out.frame().unwrap().scene.count(is_polyline), 2);
    }

    #[test]
    fn test_area_adds_gradient_fill() {
        let out = bare().render_price_chart(&ticks(&[(0, 1.0), (1, 2.0)]), &PriceChartSpec::new(ChartKind::Area), None);
        let scene = &out.frame().unwrap().scene;
        assert_eq!(scene.gradients.len(), 1);
        assert_eq!(scene.count(|p| matches!(p, Primitive::Area { baseline, .. } if *baseline == 400.0)), 1);
    }

    #[test]
    fn test_bar_width_and_floor() {
        let out = bare().render_price_chart(&ticks(&[(0, 1.0), (1, 2.0), (2, 3.0), (3, 4.0)]), &PriceChartSpec::new(ChartKind::Bar), None);
        for p in &out.frame().unwrap().scene.primitives {
            if let Primitive::Rect { y, width, height, opacity, .. } = p {
                assert!((width - 160.0).abs() < 1e-9);
                assert!((y + height - 400.0).abs() < 1e-9);
                assert_eq!(*opacity, 0.7);
            }
        }
    }

    #[test]
    fn test_axes_grid_and_labels() {
        let out = ChartRenderer::default().render_price_chart(&ticks(&[(0, 1.0), (86_400_000, 2.0)]), &PriceChartSpec::new(ChartKind::Line), None);
        let scene = &out.frame().unwrap().scene;
        assert_eq!(scene.count(|p| matches!(p, Primitive::Line { dash: Some(_), .. })), 5);
        let texts: Vec<&str> = scene
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 5);
        assert!(texts.contains(&"01/01/1970"));
        assert!(texts.contains(&"02/01/1970"));
    }

    #[test]
    fn test_far_apart_timestamps_stay_on_canvas() {
        let input = records(vec![
            json!({"timestamp": -9.0e18, "last": 1}),
            json!({"timestamp": 9.0e18, "last": 2}),
        ]);
        for kind in [ChartKind::Line, ChartKind::Candlestick, ChartKind::Bar] {
            let out = ChartRenderer::default().render_price_chart(&input, &PriceChartSpec::new(kind), None);
            let frame = out.frame().unwrap();
            assert_eq!(frame.scene.count(|p| matches!(p, Primitive::Text { .. })), 5);
            assert_eq!(frame.mapper.map_x(-9.0e18), 0.0);
            assert_eq!(frame.mapper.map_x(9.0e18), 800.0);
        }

        let line = ChartRenderer::default().render_price_chart(&input, &PriceChartSpec::new(ChartKind::Line), None);
        let xs: Vec<f64> = line
            .frame()
            .unwrap()
            .scene
            .primitives
            .iter()
            .find_map(|p| match p {
                Primitive::Polyline { points, .. } => Some(points.iter().map(|pt| pt.0).collect()),
                _ => None,
            })
            .unwrap();
        assert_eq!(xs, vec![0.0, 800.0]);
    }

    #[test]
    fn test_fractional_timestamps_render() {
        let input = records(vec![
            json!({"timestamp": 0.4, "last": 1}),
            json!({"timestamp": 10.6, "last": 3}),
            json!({"timestamp": 1.0e21, "last": 9}),
        ]);
        let out = bare().render_price_chart(&input, &PriceChartSpec::new(ChartKind::Line), None);
        let frame = out.frame().unwrap();
        assert_eq!(frame.hit_times, vec![0.0, 11.0]);
        assert_eq!(frame.mapper.domain().max_y, 3.0);
    }

    #[test]
    fn test_overlays_draw_moving_averages() {
        let spec = PriceChartSpec::new(ChartKind::Line).with_indicators(vec!["SMA_2".to_string(), "RSI".to_string()]);
        let out = bare().render_price_chart(&ticks(&[(0, 1.0), (1, 2.0), (2, 3.0), (3, 4.0)]), &spec, Some(3));
        let frame = out.frame().unwrap();
        assert_eq!(frame.scene.count(is_polyline), 2);
        let tooltip = frame.tooltip.as_ref().unwrap();
        assert_eq!(tooltip.rows.len(), 2);
        assert_eq!(tooltip.rows[1].label, "SMA_2");
    }

    #[test]
    fn test_active_point_adds_crosshair_and_tooltip() {
        let r = bare();
        let input = ticks(&[(0, 1.0), (50, 2.0), (100, 3.0)]);
        let spec = PriceChartSpec::new(ChartKind::Line);
        let frame = match r.render_price_chart(&input, &spec, None) {
            RenderOutput::Chart(frame) => frame,
            _ => panic!("expected chart"),
        };
        assert!(frame.tooltip.is_none());
        let index = frame.locate(410.0).unwrap();
        assert_eq!(index, 1);

        let hovered = r.render_price_chart(&input, &spec, Some(index));
        let hovered = hovered.frame().unwrap();
        let tooltip = hovered.tooltip.as_ref().unwrap();
        assert_eq!(tooltip.screen_x, 400.0);
        assert_eq!(tooltip.rows[0].label, "Prix");
        assert_eq!(hovered.scene.count(|p| matches!(p, Primitive::Line { from, to, .. } if from.0 == 400.0 && to.0 == 400.0)), 1);

        let stale = r.render_price_chart(&input, &spec, Some(99));
        assert!(stale.frame().unwrap().tooltip.is_none());
    }

    #[test]
    fn test_series_chart_shares_axes_and_scatter_grows_when_active() {
        let input = records(vec![
            json!({"t": 0, "score": 0.2, "confidence": 0.9}),
            json!({"t": 10, "score": 0.8, "confidence": null}),
            json!({"t": 20, "score": 0.5, "confidence": 0.7}),
        ]);
        let specs = [
            SeriesSpec::new("score", "Score", "primary", SeriesKind::Scatter),
            SeriesSpec::new("confidence", "Confiance", "#ff0000", SeriesKind::Line),
        ];
        let out = bare().render_series_chart(&input, "t", &specs, Some(1));
        let frame = out.frame().unwrap();
        assert_eq!(frame.mapper.domain().min_y, 0.2);
        assert_eq!(frame.mapper.domain().max_y, 0.9);
        let radii: Vec<f64> = frame
            .scene
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Circle { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii, vec![SCATTER_RADIUS, ACTIVE_SCATTER_RADIUS, SCATTER_RADIUS]);
        // confidence is null at the active row
        let tooltip = frame.tooltip.as_ref().unwrap();
        assert_eq!(tooltip.rows.len(), 1);
        assert_eq!(tooltip.rows[0].label, "Score");
    }

    #[test]
    fn test_series_kinds_deserialize_lowercase() {
        let spec: SeriesSpec =
            serde_json::from_str(r#"{"key":"v","label":"V","color":"accent","kind":"scatter"}"#).unwrap();
        assert_eq!(spec.kind, SeriesKind::Scatter);
        assert_eq!(spec.color, ColorToken::new("accent"));
    }

    #[test]
    fn test_formatters_follow_period() {
        let ms = time::parse_timestamp_millis("2024-12-30T18:20:05Z").unwrap() as f64;
        assert_eq!((Formatters::for_period(Period::Hour1).x)(ms), "18:20");
        assert_eq!((Formatters::for_period(Period::Live).x)(ms), "18:20");
        assert_eq!((Formatters::for_period(Period::Day7).x)(ms), "30/12/2024");
    }
}
