//! Shape definitions for the drafting surface.

mod circle;
mod freehand;
mod line;

pub use circle::Circle;
pub use freehand::Freehand;
pub use line::Line;

use kurbo::{BezPath, Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Stroke properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width in device pixels.
    pub stroke_width: f64,
}

impl ShapeStyle {
    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 3.0,
        }
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box.
    fn bounds(&self) -> Rect;

    /// Get the path representation for rasterizing.
    fn to_path(&self) -> BezPath;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;
}

/// Closed set of drawable shapes.
///
/// Every consumer matches exhaustively, so a new variant has to be handled
/// by snapping, export and history replay before the crate compiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Line(Line),
    Freehand(Freehand),
    Circle(Circle),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Line(s) => s.id(),
            Shape::Freehand(s) => s.id(),
            Shape::Circle(s) => s.id(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Line(s) => s.bounds(),
            Shape::Freehand(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Line(s) => s.to_path(),
            Shape::Freehand(s) => s.to_path(),
            Shape::Circle(s) => s.to_path(),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Line(s) => s.style(),
            Shape::Freehand(s) => s.style(),
            Shape::Circle(s) => s.style(),
        }
    }

    /// All points that define the shape's geometry.
    pub fn points(&self) -> Vec<Point> {
        match self {
            Shape::Line(s) => vec![s.start, s.end],
            Shape::Freehand(s) => s.points().to_vec(),
            Shape::Circle(s) => vec![s.center],
        }
    }
}

impl From<Line> for Shape {
    fn from(line: Line) -> Self {
        Shape::Line(line)
    }
}

impl From<Freehand> for Shape {
    fn from(freehand: Freehand) -> Self {
        Shape::Freehand(freehand)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = Line::new(Point::ZERO, Point::new(1.0, 1.0));
        let b = Line::new(Point::ZERO, Point::new(1.0, 1.0));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_shape_dispatch() {
        let circle = Circle::new(Point::new(10.0, 10.0), 5.0);
        let id = circle.id();
        let shape = Shape::from(circle);
        assert_eq!(shape.id(), id);
        assert_eq!(shape.points(), vec![Point::new(10.0, 10.0)]);
        assert_eq!(shape.bounds(), Rect::new(5.0, 5.0, 15.0, 15.0));
    }

    #[test]
    fn test_color_roundtrip() {
        let color = SerializableColor::new(12, 34, 56, 255);
        let back: SerializableColor = Color::from(color).into();
        assert_eq!(back, color);
    }
}
