//! Pointer -> nearest data point, and the transient hover state built on it.

use crate::scale::ScaleMapper;

/// The sample currently nearest to the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivePoint {
    pub index: usize,
    pub timestamp: f64,
    pub screen_x: f64,
}

/// Finds the index of the timestamp closest to `pointer_x` (virtual canvas units).
///
/// Linear scan over `timestamps`, which are expected in ascending order. On a tie
/// the first candidate wins. Pointers outside the plot resolve to the nearest end.
pub fn locate(pointer_x: f64, timestamps: &[f64], mapper: &ScaleMapper) -> Option<usize> {
    if !pointer_x.is_finite() {
        return None;
    }
    let target = mapper.invert_x(pointer_x);
    let mut best: Option<(usize, f64)> = None;
    for (index, &t) in timestamps.iter().enumerate() {
        let distance = (t - target).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}

/// Converts a pointer offset inside a rendered element of `element_width` pixels
/// back into virtual canvas X.
pub fn to_canvas_x(element_x: f64, element_width: f64, canvas_width: f64) -> f64 {
    if element_width <= 0.0 {
        return 0.0;
    }
    element_x / element_width * canvas_width
}

/// Hover state owned by one chart instance.
///
/// Cleared on pointer leave and whenever the data source changes, so a tooltip
/// never refers to a point of a previous dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverState {
    active: Option<ActivePoint>,
    source_version: u64,
}

impl HoverState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<ActivePoint> {
        self.active
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active.map(|a| a.index)
    }

    pub fn source_version(&self) -> u64 {
        self.source_version
    }

    /// Active index, provided it was picked on data `version`.
    pub fn active_for(&self, version: u64) -> Option<usize> {
        if version == self.source_version {
            self.active_index()
        } else {
            None
        }
    }

    /// Updates the active point for a pointer at `pointer_x`. Repeated moves over
    /// the same point leave the state unchanged.
    pub fn pointer_move(&mut self, pointer_x: f64, timestamps: &[f64], mapper: &ScaleMapper) -> Option<ActivePoint> {
        self.active = locate(pointer_x, timestamps, mapper).map(|index| {
            let timestamp = timestamps[index];
            ActivePoint { index, timestamp, screen_x: mapper.map_x(timestamp) }
        });
        self.active
    }

    pub fn pointer_leave(&mut self) {
        self.active = None;
    }

    /// Resets the state when the data behind the chart changed. Returns whether it did.
    pub fn sync_source(&mut self, version: u64) -> bool {
        if version == self.source_version {
            return false;
        }
        tracing::trace!(from = self.source_version, to = version, "Chart source changed, clearing hover");
        self.source_version = version;
        self.active = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::Canvas;
    use crate::series::Domain;

    fn mapper_for(timestamps: &[f64]) -> ScaleMapper {
        let domain = Domain {
            min_x: timestamps[0] as i64,
            max_x: timestamps[timestamps.len() - 1] as i64,
            min_y: 0.0,
            max_y: 1.0,
        };
        ScaleMapper::new(domain, Canvas::default())
    }

    #[test]
    fn test_exact_hit_round_trip() {
        let ts = [0.0, 10.0, 25.0, 60.0, 100.0];
        let m = mapper_for(&ts);
        for (i, &t) in ts.iter().enumerate() {
            assert_eq!(locate(m.map_x(t), &ts, &m), Some(i));
        }
    }

    #[test]
    fn test_pointer_beyond_edges_clamps() {
        let ts = [0.0, 10.0, 20.0];
        let m = mapper_for(&ts);
        assert_eq!(locate(5_000.0, &ts, &m), Some(2));
        assert_eq!(locate(-30.0, &ts, &m), Some(0));
    }

    #[test]
    fn test_tie_goes_to_first_point() {
        let ts = [0.0, 10.0, 20.0];
        let m = mapper_for(&ts);
        // halfway between 0 and 10
        assert_eq!(locate(m.map_x(5.0), &ts, &m), Some(0));
        let dupes = [0.0, 10.0, 10.0, 20.0];
        assert_eq!(locate(m.map_x(10.0), &dupes, &m), Some(1));
    }

    #[test]
    fn test_empty_series_has_no_active_point() {
        let m = mapper_for(&[0.0, 1.0]);
        assert_eq!(locate(10.0, &[], &m), None);
        assert_eq!(locate(f64::NAN, &[0.0], &m), None);
    }

    #[test]
    fn test_hover_lifecycle() {
        let ts = [0.0, 50.0, 100.0];
        let m = mapper_for(&ts);
        let mut hover = HoverState::new();
        hover.sync_source(1);

        let active = hover.pointer_move(410.0, &ts, &m).unwrap();
        assert_eq!(active.index, 1);
        assert_eq!(active.screen_x, 400.0);
        assert_eq!(hover.pointer_move(410.0, &ts, &m), Some(active));

        hover.pointer_leave();
        assert_eq!(hover.active(), None);

        hover.pointer_move(0.0, &ts, &m);
        assert!(!hover.sync_source(1));
        assert_eq!(hover.active_index(), Some(0));
        assert!(hover.sync_source(2));
        assert_eq!(hover.active(), None);
    }

    #[test]
    fn test_active_index_is_scoped_to_its_data_version() {
        let ts = [0.0, 50.0, 100.0];
        let m = mapper_for(&ts);
        let mut hover = HoverState::new();
        hover.sync_source(3);
        hover.pointer_move(800.0, &ts, &m);
        assert_eq!(hover.active_for(3), Some(2));
        assert_eq!(hover.active_for(4), None);
        assert_eq!(hover.source_version(), 3);
    }

    #[test]
    fn test_to_canvas_x_scales_element_offsets() {
        assert_eq!(to_canvas_x(200.0, 400.0, 800.0), 400.0);
        assert_eq!(to_canvas_x(10.0, 0.0, 800.0), 0.0);
    }
}
