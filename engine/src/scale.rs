//! Scale mapper: data space <-> virtual canvas space.

use crate::series::{Domain, Timestamp};

/// Fraction of the value range added above and below the data envelope.
pub const Y_PADDING_RATIO: f64 = 0.1;

/// Fixed abstract drawing area every chart targets before on-screen scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self { width: 800.0, height: 400.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleMapper {
    domain: Domain,
    canvas: Canvas,
    effective_min_y: f64,
    effective_max_y: f64,
}

impl ScaleMapper {
    pub fn new(domain: Domain, canvas: Canvas) -> Self {
        let range = domain.y_range();
        let padding = if range > 0.0 { range * Y_PADDING_RATIO } else { 1.0 };
        Self {
            domain,
            canvas,
            effective_min_y: domain.min_y - padding,
            effective_max_y: domain.max_y + padding,
        }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Lower Y bound after padding.
    pub fn effective_min_y(&self) -> f64 {
        self.effective_min_y
    }

    /// Upper Y bound after padding.
    pub fn effective_max_y(&self) -> f64 {
        self.effective_max_y
    }

    fn effective_range_y(&self) -> f64 {
        let range = self.effective_max_y - self.effective_min_y;
        if range > 0.0 {
            range
        } else {
            1.0
        }
    }

    /// Timestamp (ms, fractional allowed for bucket midpoints) -> pixel X.
    pub fn map_x(&self, t: f64) -> f64 {
        (t - self.domain.min_x as f64) / self.domain.x_range() * self.canvas.width
    }

    pub fn map_timestamp(&self, t: Timestamp) -> f64 {
        self.map_x(t as f64)
    }

    /// Value -> pixel Y. Screen Y grows downward, so higher values map to smaller Y.
    pub fn map_value(&self, v: f64) -> f64 {
        self.canvas.height - (v - self.effective_min_y) / self.effective_range_y() * self.canvas.height
    }

    /// Like [`map_value`](Self::map_value) but a missing sample stays missing, so
    /// the renderer skips the vertex instead of plotting zero.
    pub fn map_y(&self, v: Option<f64>) -> Option<f64> {
        v.filter(|v| v.is_finite()).map(|v| self.map_value(v))
    }

    /// Inverse of [`map_x`](Self::map_x).
    pub fn invert_x(&self, px: f64) -> f64 {
        self.domain.min_x as f64 + (px / self.canvas.width) * self.domain.x_range()
    }

    /// Inverse of [`map_value`](Self::map_value).
    pub fn invert_y(&self, py: f64) -> f64 {
        self.effective_min_y + (self.canvas.height - py) / self.canvas.height * self.effective_range_y()
    }
}
