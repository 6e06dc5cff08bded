//! Vector scene graph produced by the renderer.

/// Canvas-space coordinate.
pub type Point = (f64, f64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Vertical fade used under area series.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub id: String,
    pub color: String,
    pub top_opacity: f64,
    pub bottom_opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Polyline {
        points: Vec<Point>,
        stroke: String,
        width: f64,
    },
    /// Closed region between `points` and the horizontal line at `baseline`.
    Area {
        points: Vec<Point>,
        baseline: f64,
        gradient_id: String,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
        opacity: f64,
    },
    Line {
        from: Point,
        to: Point,
        stroke: String,
        width: f64,
        dash: Option<String>,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: String,
    },
    Text {
        at: Point,
        content: String,
        fill: String,
        size: f64,
        anchor: TextAnchor,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub gradients: Vec<LinearGradient>,
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, ..Self::default() }
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Registers a gradient for `color` and returns its id; one gradient per colour.
    pub fn gradient_for(&mut self, color: &str) -> String {
        if let Some(existing) = self.gradients.iter().find(|g| g.color == color) {
            return existing.id.clone();
        }
        let id = format!("grad-{}", self.gradients.len());
        self.gradients.push(LinearGradient {
            id: id.clone(),
            color: color.to_string(),
            top_opacity: 0.5,
            bottom_opacity: 0.0,
        });
        id
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn count(&self, matches: impl Fn(&Primitive) -> bool) -> usize {
        self.primitives.iter().filter(|p| matches(p)).count()
    }
}
