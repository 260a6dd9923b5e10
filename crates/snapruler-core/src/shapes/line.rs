//! Straight line segment drawn with the ruler.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight segment between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Line {
    /// Create a new line with a fresh identifier.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style: ShapeStyle::default(),
        }
    }

    /// Use a specific style.
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Length of the segment.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Midpoint of the segment.
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_and_midpoint() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(6.0, 8.0));
        assert!((line.length() - 10.0).abs() < f64::EPSILON);
        assert_eq!(line.midpoint(), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_bounds_normalized() {
        let line = Line::new(Point::new(10.0, 0.0), Point::new(0.0, 5.0));
        assert_eq!(line.bounds(), Rect::new(0.0, 0.0, 10.0, 5.0));
    }

    #[test]
    fn test_path_has_two_elements() {
        let line = Line::new(Point::ZERO, Point::new(1.0, 1.0));
        assert_eq!(line.to_path().elements().len(), 2);
    }
}
