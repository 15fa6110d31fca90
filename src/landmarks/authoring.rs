//! Coordinate capture for placing new landmarks on an engraving.
//!
//! While capture is active, clicks on the open image are recorded in image
//! percentages instead of opening landmark details. The captured points
//! serialize to the same `landmarks` array an item's metadata file uses,
//! with placeholder ids to be replaced by hand.

use crate::catalog::LandmarkRef;
use crate::geometry::Point;
use tracing::debug;

/// Captured points, in click order.
#[derive(Debug, Clone, Default)]
pub struct CoordinateCapture {
    active: bool,
    points: Vec<Point>,
}

impl CoordinateCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enter or leave capture mode. Returns the new state. Captured points
    /// survive leaving the mode.
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        debug!(active = self.active, "coordinate capture");
        self.active
    }

    /// Record a point given in image percentages, rounded to one decimal.
    /// Ignored when inactive or when the point falls outside the image.
    pub fn capture(&mut self, percent: Point) -> Option<Point> {
        if !self.active {
            return None;
        }
        let inside = (0.0..=100.0).contains(&percent.x) && (0.0..=100.0).contains(&percent.y);
        if !inside {
            return None;
        }
        let point = Point::new(round_tenth(percent.x), round_tenth(percent.y));
        self.points.push(point);
        Some(point)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Landmark references with ids `landmark_001`, `landmark_002`, ...
    pub fn to_refs(&self) -> Vec<LandmarkRef> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| LandmarkRef {
                landmark_id: format!("landmark_{:03}", i + 1),
                x: p.x,
                y: p.y,
            })
            .collect()
    }

    /// Pretty-printed `landmarks` array for pasting into a metadata file
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_refs())
    }
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
