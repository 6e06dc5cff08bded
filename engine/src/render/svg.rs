// SVG serialisation of a Scene.
use std::fmt::Write;

use super::scene::{Point, Primitive, Scene};

/// Writes `v` with at most two decimals and no trailing zeros.
pub fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut s = format!("{:.2}", v);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn points_attr(points: &[Point]) -> String {
    points.iter().map(|(x, y)| format!("{},{}", num(*x), num(*y))).collect::<Vec<_>>().join(" ")
}

impl Scene {
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="100%" height="100%" preserveAspectRatio="none">"#,
            w = num(self.width),
            h = num(self.height)
        );

        if !self.gradients.is_empty() {
            out.push_str("<defs>");
            for g in &self.gradients {
                let _ = write!(
                    out,
                    r#"<linearGradient id="{id}" x1="0" x2="0" y1="0" y2="1"><stop offset="0%" stop-color="{c}" stop-opacity="{top}"/><stop offset="100%" stop-color="{c}" stop-opacity="{bottom}"/></linearGradient>"#,
                    id = escape(&g.id),
                    c = escape(&g.color),
                    top = num(g.top_opacity),
                    bottom = num(g.bottom_opacity)
                );
            }
            out.push_str("</defs>");
        }

        for primitive in &self.primitives {
            write_primitive(&mut out, primitive);
        }
        out.push_str("</svg>");
        out
    }
}

fn write_primitive(out: &mut String, primitive: &Primitive) {
    let _ = match primitive {
        Primitive::Polyline { points, stroke, width } => write!(
            out,
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
            points_attr(points),
            escape(stroke),
            num(*width)
        ),
        Primitive::Area { points, baseline, gradient_id } => {
            let (first_x, last_x) = match (points.first(), points.last()) {
                (Some(f), Some(l)) => (f.0, l.0),
                _ => return,
            };
            write!(
                out,
                r#"<path d="M {} {},{} {},{} Z" fill="url(#{})" stroke="none"/>"#,
                points_attr(points),
                num(last_x),
                num(*baseline),
                num(first_x),
                num(*baseline),
                escape(gradient_id)
            )
        }
        Primitive::Rect { x, y, width, height, fill, opacity } => write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" opacity="{}"/>"#,
            num(*x),
            num(*y),
            num(*width),
            num(*height),
            escape(fill),
            num(*opacity)
        ),
        Primitive::Line { from, to, stroke, width, dash } => {
            let dash_attr = dash
                .as_deref()
                .map(|d| format!(r#" stroke-dasharray="{}""#, escape(d)))
                .unwrap_or_default();
            write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"{}/>"#,
                num(from.0),
                num(from.1),
                num(to.0),
                num(to.1),
                escape(stroke),
                num(*width),
                dash_attr
            )
        }
        Primitive::Circle { center, radius, fill } => write!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            num(center.0),
            num(center.1),
            num(*radius),
            escape(fill)
        ),
        Primitive::Text { at, content, fill, size, anchor } => write!(
            out,
            r#"<text x="{}" y="{}" fill="{}" font-size="{}" text-anchor="{}">{}</text>"#,
            num(at.0),
            num(at.1),
            escape(fill),
            num(*size),
            anchor.as_str(),
            escape(content)
        ),
    };
}
