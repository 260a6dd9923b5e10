//! Snap functionality for aligning input points to the grid and to shapes.
//!
//! Every pointer event produces a fresh list of [`SnapCandidate`]s within the
//! snap radius of the raw point; [`select_best`] then picks one by kind
//! priority first and distance second.

use crate::geometry::{bearing, distance, line_intersection, normalize_degrees, quantize_to_grid};
use crate::shapes::Shape;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Smallest snap radius, reached when zoomed in.
pub const MIN_SNAP_RADIUS: f64 = 20.0;

/// Snap radius at zoom level 1.0.
pub const BASE_SNAP_RADIUS: f64 = 50.0;

/// Maximum deviation from a common angle that still counts as a snap.
pub const ANGLE_TOLERANCE: f64 = 2.5;

/// Angles (degrees) that strokes snap to.
pub const COMMON_ANGLES: [f64; 9] = [0.0, 30.0, 45.0, 60.0, 90.0, 120.0, 135.0, 150.0, 180.0];

/// Default kind priority for [`select_best`].
pub const DEFAULT_PRIORITY: [SnapKind; 5] = [
    SnapKind::Endpoint,
    SnapKind::Angle90,
    SnapKind::Angle45,
    SnapKind::Midpoint,
    SnapKind::Grid,
];

/// Kind of snap target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnapKind {
    /// Grid intersection.
    Grid,
    /// Line endpoint or circle center.
    Endpoint,
    /// Line midpoint.
    Midpoint,
    /// Crossing of two lines.
    Intersection,
    Angle30,
    Angle45,
    Angle60,
    Angle90,
    Angle120,
    Angle135,
    Angle150,
    Angle180,
}

impl SnapKind {
    /// Display label used by the precision HUD.
    pub fn label(self) -> &'static str {
        match self {
            SnapKind::Grid => "GRID",
            SnapKind::Endpoint => "ENDPOINT",
            SnapKind::Midpoint => "MIDPOINT",
            SnapKind::Intersection => "INTERSECTION",
            SnapKind::Angle30 => "ANGLE_30",
            SnapKind::Angle45 => "ANGLE_45",
            SnapKind::Angle60 => "ANGLE_60",
            SnapKind::Angle90 => "ANGLE_90",
            SnapKind::Angle120 => "ANGLE_120",
            SnapKind::Angle135 => "ANGLE_135",
            SnapKind::Angle150 => "ANGLE_150",
            SnapKind::Angle180 => "ANGLE_180",
        }
    }

    /// Angle kind for a common angle. 0° has no kind of its own.
    pub fn for_angle(degrees: f64) -> Option<Self> {
        let kind = match degrees.round() as i64 {
            30 => SnapKind::Angle30,
            45 => SnapKind::Angle45,
            60 => SnapKind::Angle60,
            90 => SnapKind::Angle90,
            120 => SnapKind::Angle120,
            135 => SnapKind::Angle135,
            150 => SnapKind::Angle150,
            180 => SnapKind::Angle180,
            _ => return None,
        };
        Some(kind)
    }

    /// Check if this is one of the angle kinds.
    pub fn is_angle(self) -> bool {
        matches!(
            self,
            SnapKind::Angle30
                | SnapKind::Angle45
                | SnapKind::Angle60
                | SnapKind::Angle90
                | SnapKind::Angle120
                | SnapKind::Angle135
                | SnapKind::Angle150
                | SnapKind::Angle180
        )
    }
}

/// A point proposed as a precise substitute for raw input.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapCandidate {
    /// The snap point location.
    pub point: Point,
    /// Type of snap target.
    pub kind: SnapKind,
    /// Distance from the raw input point.
    pub distance: f64,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Free-form annotations (e.g. the source shape id).
    pub metadata: BTreeMap<String, String>,
}

impl SnapCandidate {
    pub fn new(point: Point, kind: SnapKind, distance: f64) -> Self {
        Self {
            point,
            kind,
            distance,
            confidence: 1.0,
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Check if the candidate lies within `threshold`.
    pub fn is_within(&self, threshold: f64) -> bool {
        self.distance <= threshold
    }
}

/// Result of classifying an angle against [`COMMON_ANGLES`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSnap {
    /// Measured angle, normalized to `[0, 360)`.
    pub angle: f64,
    /// Nearest common angle.
    pub snap_angle: f64,
    /// Allowed deviation.
    pub tolerance: f64,
}

impl AngleSnap {
    pub fn new(angle: f64, snap_angle: f64) -> Self {
        Self {
            angle,
            snap_angle,
            tolerance: ANGLE_TOLERANCE,
        }
    }

    /// Check if the measured angle is close enough to snap.
    pub fn is_snappable(&self) -> bool {
        (self.angle - self.snap_angle).abs() <= self.tolerance
    }

    /// Angle kind of the snapped angle, if it has one.
    pub fn kind(&self) -> Option<SnapKind> {
        SnapKind::for_angle(self.snap_angle)
    }
}

/// Visual feedback for the chosen candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapFeedback {
    /// Where to draw the marker.
    pub position: Point,
    /// Kind of the chosen candidate.
    pub kind: SnapKind,
    /// Highlight the snapped point.
    pub highlight: bool,
    /// Draw an angle tick mark.
    pub tick_mark: bool,
}

impl SnapFeedback {
    pub fn from_candidate(candidate: &SnapCandidate) -> Self {
        Self {
            position: candidate.point,
            kind: candidate.kind,
            highlight: true,
            tick_mark: candidate.kind.is_angle(),
        }
    }
}

/// Snap radius for a zoom level; shrinks as the view zooms in.
pub fn snap_radius(zoom: f64) -> f64 {
    MIN_SNAP_RADIUS.max(BASE_SNAP_RADIUS / zoom)
}

/// Classify an angle (degrees) against the common angles.
///
/// Returns `None` if the nearest common angle deviates by more than
/// [`ANGLE_TOLERANCE`].
pub fn classify_angle(angle: f64) -> Option<AngleSnap> {
    let normalized = normalize_degrees(angle);
    COMMON_ANGLES
        .iter()
        .copied()
        .min_by(|a, b| (normalized - a).abs().total_cmp(&(normalized - b).abs()))
        .map(|snap_angle| AngleSnap::new(normalized, snap_angle))
        .filter(AngleSnap::is_snappable)
}

/// Collect snap candidates around `target`, sorted by ascending distance.
///
/// Only candidates within `snap_radius` are produced. Ties keep generation
/// order: grid first, then shapes in store order.
pub fn find_candidates(target: Point, shapes: &[Shape], snap_radius: f64, grid_size: f64) -> Vec<SnapCandidate> {
    let mut candidates = Vec::new();

    let grid_point = quantize_to_grid(target, grid_size);
    let grid_distance = distance(target, grid_point);
    if grid_distance <= snap_radius {
        candidates.push(SnapCandidate::new(grid_point, SnapKind::Grid, grid_distance));
    }

    let mut push_if_near = |point: Point, kind: SnapKind, shape: &Shape| {
        let d = distance(target, point);
        if d <= snap_radius {
            candidates.push(SnapCandidate::new(point, kind, d).with_metadata("shape", shape.id().to_string()));
        }
    };

    for shape in shapes {
        match shape {
            Shape::Line(line) => {
                push_if_near(line.start, SnapKind::Endpoint, shape);
                push_if_near(line.end, SnapKind::Endpoint, shape);
                push_if_near(line.midpoint(), SnapKind::Midpoint, shape);
            }
            Shape::Circle(circle) => {
                push_if_near(circle.center, SnapKind::Endpoint, shape);
            }
            Shape::Freehand(_) => {}
        }
    }

    // sort_by is stable
    candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    candidates
}

/// Candidates at crossings of stored lines, within `snap_radius` of `target`.
pub fn intersection_candidates(target: Point, shapes: &[Shape], snap_radius: f64) -> Vec<SnapCandidate> {
    let lines: Vec<_> = shapes
        .iter()
        .filter_map(|shape| match shape {
            Shape::Line(line) => Some(line),
            Shape::Freehand(_) | Shape::Circle(_) => None,
        })
        .collect();

    let mut candidates = Vec::new();
    for (i, a) in lines.iter().enumerate() {
        for b in &lines[i + 1..] {
            let Some(point) = line_intersection(a.start, a.end, b.start, b.end) else {
                continue;
            };
            let d = distance(target, point);
            if d <= snap_radius {
                candidates.push(SnapCandidate::new(point, SnapKind::Intersection, d));
            }
        }
    }
    candidates
}

/// Angle candidate for a stroke running from `origin` towards `target`.
///
/// The candidate lies on the ray at the snapped common angle, at the same
/// distance from `origin` as `target`.
pub fn angle_candidate(origin: Point, target: Point, snap_radius: f64) -> Option<SnapCandidate> {
    let length = distance(origin, target);
    if length < f64::EPSILON {
        return None;
    }

    // Screen y grows downward; measure counter-clockwise as seen on screen and
    // fold into [0, 180) so both directions of a line classify alike.
    let screen_angle = normalize_degrees(-bearing(origin, target));
    let (folded, turn) = if screen_angle >= 180.0 {
        (screen_angle - 180.0, 180.0)
    } else {
        (screen_angle, 0.0)
    };
    let snap = classify_angle(folded)?;
    // 0° and 180° are the same line orientation; report both as 180° on the
    // opposite turn so the ray direction is unchanged.
    let (snap_angle, turn) = if snap.snap_angle == 0.0 {
        (180.0, turn + 180.0)
    } else {
        (snap.snap_angle, turn)
    };
    let kind = SnapKind::for_angle(snap_angle)?;

    let radians = (snap_angle + turn).to_radians();
    let point = Point::new(origin.x + length * radians.cos(), origin.y - length * radians.sin());
    let d = distance(target, point);
    (d <= snap_radius).then(|| {
        SnapCandidate::new(point, kind, d).with_metadata("angle", format!("{:.1}", snap.angle))
    })
}

/// Merge extra candidates into a distance-sorted list, keeping it sorted.
pub fn merge_candidates(candidates: &mut Vec<SnapCandidate>, extra: impl IntoIterator<Item = SnapCandidate>) {
    candidates.extend(extra);
    candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}

/// Pick the candidate to snap to.
///
/// The first kind in `priority` that has any candidate wins, taking its
/// closest candidate. Without a priority match the globally closest
/// candidate is returned.
pub fn select_best(candidates: &[SnapCandidate], priority: &[SnapKind]) -> Option<SnapCandidate> {
    let closest = |kind: Option<SnapKind>| {
        candidates
            .iter()
            .filter(|c| kind.is_none_or(|k| c.kind == k))
            .fold(None::<&SnapCandidate>, |best, c| match best {
                Some(b) if b.distance <= c.distance => Some(b),
                _ => Some(c),
            })
    };

    priority
        .iter()
        .find_map(|kind| closest(Some(*kind)))
        .or_else(|| closest(None))
        .cloned()
}
