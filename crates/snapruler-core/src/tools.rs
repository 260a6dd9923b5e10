//! Drawing tools and the in-progress stroke.

use crate::shapes::{Circle, Freehand, Line, Shape, ShapeStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Freehand,
    Ruler,
    SetSquare45,
    SetSquare30_60,
    Protractor,
    Compass,
}

impl ToolKind {
    /// Build the shape this tool produces from the collected stroke points.
    ///
    /// Strokes with fewer than two points produce nothing.
    pub fn materialize(self, points: &[Point], style: &ShapeStyle) -> Option<Shape> {
        let (&first, &last) = (points.first()?, points.last()?);
        if points.len() < 2 {
            return None;
        }

        let shape = match self {
            ToolKind::Freehand => {
                Shape::Freehand(Freehand::from_points(points.to_vec())?.with_style(style.clone()))
            }
            ToolKind::Compass => Shape::Circle(Circle::new(first, first.distance(last)).with_style(style.clone())),
            ToolKind::Ruler | ToolKind::SetSquare45 | ToolKind::SetSquare30_60 | ToolKind::Protractor => {
                Shape::Line(Line::new(first, last).with_style(style.clone()))
            }
        };
        Some(shape)
    }
}

/// State of a stroke.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum StrokeState {
    /// Waiting for a pointer-down.
    #[default]
    Idle,
    /// A stroke is being drawn.
    Drawing {
        /// Resolved (possibly snapped) points, first is the stroke origin.
        points: Vec<Point>,
    },
}

impl StrokeState {
    /// Begin a stroke at `point`.
    pub fn begin(&mut self, point: Point) {
        *self = StrokeState::Drawing { points: vec![point] };
    }

    /// Append a point. Returns false when no stroke is active.
    pub fn push(&mut self, point: Point) -> bool {
        match self {
            StrokeState::Drawing { points } => {
                points.push(point);
                true
            }
            StrokeState::Idle => false,
        }
    }

    /// Finish the stroke, returning its points and going back to idle.
    pub fn finish(&mut self) -> Option<Vec<Point>> {
        match std::mem::take(self) {
            StrokeState::Drawing { points } => Some(points),
            StrokeState::Idle => None,
        }
    }

    /// Check if a stroke is active.
    pub fn is_active(&self) -> bool {
        matches!(self, StrokeState::Drawing { .. })
    }

    /// Points collected so far (empty when idle).
    pub fn points(&self) -> &[Point] {
        match self {
            StrokeState::Drawing { points } => points,
            StrokeState::Idle => &[],
        }
    }

    /// First point of the active stroke.
    pub fn origin(&self) -> Option<Point> {
        self.points().first().copied()
    }
}
