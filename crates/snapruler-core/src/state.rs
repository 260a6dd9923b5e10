//! Observable drawing state published to the UI shell.

use crate::export::ExportStatus;
use crate::snap::{SnapCandidate, SnapFeedback};
use crate::store::ShapeSet;
use crate::tools::ToolKind;
use kurbo::{Point, Vec2};
use std::sync::Arc;

/// On-screen readout of the current stroke.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrecisionHud {
    pub visible: bool,
    /// Anchor position (the latest resolved point).
    pub position: Point,
    /// Straight-line length from stroke start to the current point.
    pub length_text: String,
    /// Bearing from stroke start to the current point.
    pub angle_text: String,
    /// Label of the snap applied to the current point, empty if none.
    pub snap_label: String,
}

/// A complete, immutable view of a drawing session.
///
/// A new value with a higher `version` is published after every change.
#[derive(Debug, Clone)]
pub struct DrawingState {
    pub version: u64,
    pub shapes: ShapeSet,
    pub tool: ToolKind,
    pub is_drawing: bool,
    pub current_points: Vec<Point>,
    pub snap_enabled: bool,
    pub snap_candidates: Vec<SnapCandidate>,
    pub active_candidate: Option<SnapCandidate>,
    pub snap_feedback: Option<SnapFeedback>,
    pub hud: PrecisionHud,
    pub can_undo: bool,
    pub can_redo: bool,
    pub zoom: f64,
    pub offset: Vec2,
    pub grid_size: f64,
    pub export_status: ExportStatus,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            version: 0,
            shapes: Arc::from(Vec::new()),
            tool: ToolKind::default(),
            is_drawing: false,
            current_points: Vec::new(),
            snap_enabled: true,
            snap_candidates: Vec::new(),
            active_candidate: None,
            snap_feedback: None,
            hud: PrecisionHud::default(),
            can_undo: false,
            can_redo: false,
            zoom: 1.0,
            offset: Vec2::ZERO,
            grid_size: crate::config::DEFAULT_GRID_SIZE,
            export_status: ExportStatus::Idle,
        }
    }
}
