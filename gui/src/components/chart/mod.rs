// Engine-rendered charts embedded as SVG, with pointer tracking for the tooltip.
#![allow(non_snake_case)]
pub mod indicators;

use dioxus::prelude::*;
use engine::interaction::{self, HoverState};
use engine::render::{ChartRenderer, PriceChartSpec, RenderOutput, SeriesSpec, Tooltip};
use engine::series::RawRecord;
use shared::models::Period;
use std::rc::Rc;

use crate::services::dashboard_client::DashboardClient;

/// What to draw from the records handed to a [`ChartView`].
#[derive(Debug, Clone, PartialEq)]
pub enum ChartRequest {
    Price(PriceChartSpec),
    Series { x_key: String, series: Vec<SeriesSpec> },
}

impl ChartRequest {
    pub fn render(&self, renderer: &ChartRenderer, records: &[RawRecord], active: Option<usize>) -> RenderOutput {
        match self {
            ChartRequest::Price(spec) => renderer.render_price_chart(records, spec, active),
            ChartRequest::Series { x_key, series } => renderer.render_series_chart(records, x_key, series, active),
        }
    }
}

/// `source_version` identifies the dataset; hover state picked on an older one is ignored.
#[component]
pub fn ChartView(
    records: Vec<RawRecord>,
    chart: ChartRequest,
    period: Period,
    source_version: u64,
    #[props(default = true)] show_axes: bool,
    #[props(default = 256)] height: u32,
) -> Element {
    let client = use_context::<DashboardClient>();
    let mut hover = use_signal(HoverState::new);
    let mut element_width = use_signal(|| 0.0_f64);
    let mut surface = use_signal(|| None::<Rc<MountedData>>);

    let renderer = client.renderer(period, show_axes);
    let canvas = renderer.canvas();
    let active = hover.read().active_for(source_version);
    let output = chart.render(&renderer, &records, active);

    let (frame, tooltip) = match &output {
        RenderOutput::Placeholder { message } => {
            return rsx! {
                div { class: "chart-placeholder", style: "height: {height}px;", "{message}" }
            };
        }
        RenderOutput::Chart(frame) => ((frame.hit_times.clone(), frame.mapper), frame.tooltip.clone()),
    };
    let svg = renderer.to_svg(&output);

    let measure = move || {
        if let Some(mounted) = surface() {
            spawn(async move {
                if let Ok(rect) = mounted.get_client_rect().await {
                    element_width.set(rect.size.width);
                }
            });
        }
    };

    rsx! {
        div {
            class: "chart-surface",
            style: "height: {height}px;",
            onmounted: move |evt: MountedEvent| {
                surface.set(Some(evt.data()));
                measure();
            },
            onmouseenter: move |_| measure(),
            onmousemove: move |evt: MouseEvent| {
                let (times, mapper) = &frame;
                let width = match element_width() {
                    w if w > 0.0 => w,
                    _ => canvas.width,
                };
                let x = interaction::to_canvas_x(evt.element_coordinates().x, width, canvas.width);
                if hover.peek().active_for(source_version) == interaction::locate(x, times, mapper) {
                    return;
                }
                let mut state = hover.write();
                state.sync_source(source_version);
                state.pointer_move(x, times, mapper);
            },
            onmouseleave: move |_| hover.write().pointer_leave(),
            div { class: "chart-svg", dangerous_inner_html: "{svg}" }
            if let Some(tooltip) = tooltip {
                TooltipBox { tooltip: tooltip, canvas_width: canvas.width }
            }
        }
    }
}

#[component]
fn TooltipBox(tooltip: Tooltip, canvas_width: f64) -> Element {
    let left = if canvas_width > 0.0 { tooltip.screen_x / canvas_width * 100.0 } else { 0.0 };
    // Flip to the left of the crosshair past mid-chart.
    let shift = if left > 50.0 { "translateX(calc(-100% - 8px))" } else { "translateX(8px)" };

    rsx! {
        div { class: "chart-tooltip", style: "left: {left:.2}%; transform: {shift};",
            p { class: "tooltip-title", "{tooltip.title}" }
            for row in tooltip.rows.iter() {
                div { key: "{row.label}", class: "tooltip-row",
                    span { class: "swatch", style: "background: {row.color};" }
                    span { "{row.label}: " }
                    strong { "{row.value}" }
                }
            }
        }
    }
}
