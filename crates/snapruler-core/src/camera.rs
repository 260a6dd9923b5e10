//! Camera module for pan/zoom state.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom level and pan offset of the drawing view.
///
/// The snap radius is derived from `zoom`; the offset is carried for the
/// shell, which owns the view transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Pan offset reported by the shell.
    pub offset: Vec2,
    /// Scale factor, 1.0 is unscaled.
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl Camera {
    /// Unscaled view with the default zoom range.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera with custom zoom limits. Zoom never goes below 0.01.
    pub fn with_limits(min_zoom: f64, max_zoom: f64) -> Self {
        let min_zoom = min_zoom.max(0.01);
        Self {
            min_zoom,
            max_zoom: max_zoom.max(min_zoom),
            ..Self::default()
        }
        .clamped()
    }

    /// Set the zoom level, clamped to the allowed range. Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        }
    }

    /// Set the pan offset from a point in screen coordinates.
    pub fn set_offset(&mut self, offset: Point) {
        self.offset = offset.to_vec2();
    }

    fn clamped(mut self) -> Self {
        self.set_zoom(self.zoom);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unscaled() {
        let camera = Camera::new();
        assert_eq!(camera.offset, Vec2::ZERO);
        assert!((camera.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_stays_in_range() {
        let mut view = Camera::with_limits(0.5, 4.0);
        view.set_zoom(0.001);
        assert!((view.zoom - 0.5).abs() < f64::EPSILON);

        view.set_zoom(1000.0);
        assert!((view.zoom - 4.0).abs() < f64::EPSILON);

        // Non-finite input leaves the zoom unchanged.
        view.set_zoom(f64::NAN);
        assert!((view.zoom - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_offset() {
        let mut camera = Camera::new();
        camera.set_offset(Point::new(-3.0, 4.0));
        assert_eq!(camera.offset, Vec2::new(-3.0, 4.0));
    }

    #[test]
    fn test_limits_clamp_default_zoom() {
        let camera = Camera::with_limits(2.0, 4.0);
        assert!((camera.zoom - 2.0).abs() < f64::EPSILON);
    }
}
