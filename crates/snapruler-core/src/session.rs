//! Drawing session: turns pointer input into committed shapes.
//!
//! The session is the single owner of all drawing state. Every accepted
//! input produces a new [`DrawingState`] which replaces the previous one
//! and is sent to every subscriber.

use crate::camera::Camera;
use crate::config::SessionConfig;
use crate::export::{ExportError, ExportJob, ExportStatus, ExportTask, Exporter};
use crate::geometry::{bearing, distance};
use crate::history::History;
use crate::input::{PointerEvent, SessionEvent};
use crate::shapes::ShapeStyle;
use crate::snap::{
    DEFAULT_PRIORITY, SnapCandidate, SnapFeedback, angle_candidate, find_candidates, intersection_candidates,
    merge_candidates, select_best, snap_radius,
};
use crate::state::{DrawingState, PrecisionHud};
use crate::store::{ShapeSet, ShapeStore};
use crate::tools::{StrokeState, ToolKind};
use crate::units::{DpiCalibration, UnitFormatter};
use kurbo::Point;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};

/// Drawing session state machine.
pub struct DrawingSession {
    config: SessionConfig,
    store: ShapeStore,
    /// Snapshot of `store`, refreshed after every store mutation.
    shapes: ShapeSet,
    history: History,
    camera: Camera,
    stroke: StrokeState,
    tool: ToolKind,
    snap_enabled: bool,
    style: ShapeStyle,
    snap_candidates: Vec<SnapCandidate>,
    active_candidate: Option<SnapCandidate>,
    hud: PrecisionHud,
    units: Box<dyn UnitFormatter>,
    exporter: Option<Arc<dyn Exporter>>,
    export_task: Option<ExportTask>,
    export_status: ExportStatus,
    state: Arc<DrawingState>,
    subscribers: Vec<Sender<Arc<DrawingState>>>,
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl DrawingSession {
    /// Create an empty session.
    pub fn new(config: SessionConfig) -> Self {
        let store = ShapeStore::new();
        let mut session = Self {
            history: History::with_depth(config.max_undo_depth),
            camera: Camera::with_limits(config.min_zoom, config.max_zoom),
            snap_enabled: config.snap_enabled,
            style: ShapeStyle {
                stroke_width: config.stroke_width,
                ..ShapeStyle::default()
            },
            shapes: store.snapshot(),
            store,
            config,
            stroke: StrokeState::default(),
            tool: ToolKind::default(),
            snap_candidates: Vec::new(),
            active_candidate: None,
            hud: PrecisionHud::default(),
            units: Box::new(DpiCalibration::default()),
            exporter: None,
            export_task: None,
            export_status: ExportStatus::Idle,
            state: Arc::new(DrawingState::default()),
            subscribers: Vec::new(),
        };
        session.state = Arc::new(session.build_state(0));
        session
    }

    /// Use `exporter` for export requests.
    pub fn with_exporter(mut self, exporter: Arc<dyn Exporter>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    /// Use `units` for the HUD readout.
    pub fn with_units(mut self, units: Box<dyn UnitFormatter>) -> Self {
        self.units = units;
        self.state = Arc::new(self.build_state(self.state.version));
        self
    }

    /// The latest published state.
    pub fn state(&self) -> Arc<DrawingState> {
        Arc::clone(&self.state)
    }

    /// Receive every state published from now on, starting with the current one.
    pub fn subscribe(&mut self) -> Receiver<Arc<DrawingState>> {
        let (tx, rx) = channel();
        // Cannot fail, `rx` is alive.
        let _ = tx.send(self.state());
        self.subscribers.push(tx);
        rx
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_active()
    }

    /// Dispatch an input event.
    pub fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Pointer(PointerEvent::Down { position }) => self.start(position),
            SessionEvent::Pointer(PointerEvent::Move { position }) => self.move_to(position),
            SessionEvent::Pointer(PointerEvent::Up { position }) => self.end(position),
            SessionEvent::SetTool(tool) => self.set_tool(tool),
            SessionEvent::SetSnapEnabled(enabled) => self.set_snap_enabled(enabled),
            SessionEvent::SetZoom(zoom) => self.set_zoom(zoom),
            SessionEvent::SetPanOffset(offset) => self.set_pan_offset(offset),
            SessionEvent::Undo => {
                self.undo();
            }
            SessionEvent::Redo => {
                self.redo();
            }
            SessionEvent::ClearAll => {
                self.clear_all();
            }
            SessionEvent::Export { width, height } => self.export_request(width, height),
            SessionEvent::CancelExport => self.cancel_export(),
        }
    }

    /// Begin a stroke. Ignored while a stroke is already in progress.
    pub fn start(&mut self, raw: Point) {
        if self.stroke.is_active() {
            log::debug!("Ignoring pointer down during an active stroke");
            return;
        }

        let point = self.resolve(raw);
        self.history.record_before_action(Arc::clone(&self.shapes));
        self.stroke.begin(point);
        self.update_hud(point);
        self.publish();
    }

    /// Extend the active stroke. Ignored when idle.
    pub fn move_to(&mut self, raw: Point) {
        if !self.stroke.is_active() {
            return;
        }

        let point = self.resolve(raw);
        self.stroke.push(point);
        self.update_hud(point);
        self.publish();
    }

    /// Finish the active stroke and commit its shape. Ignored when idle.
    pub fn end(&mut self, raw: Point) {
        if !self.stroke.is_active() {
            return;
        }

        let point = self.resolve(raw);
        self.stroke.push(point);
        self.commit_stroke();
        self.publish();
    }

    /// Abandon the active stroke without committing anything.
    pub fn cancel(&mut self) {
        if self.stroke.finish().is_some() {
            log::debug!("Stroke cancelled");
            self.clear_stroke_feedback();
            self.publish();
        }
    }

    /// Switch tools. An in-progress stroke is first committed with the old tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool != self.tool && self.stroke.is_active() {
            self.commit_stroke();
        }
        self.tool = tool;
        self.publish();
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.snap_enabled = enabled;
        if !enabled {
            self.snap_candidates.clear();
            self.active_candidate = None;
            self.hud.snap_label.clear();
        }
        self.publish();
    }

    /// Set the zoom level, clamped to the configured range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.camera.set_zoom(zoom);
        self.publish();
    }

    pub fn set_pan_offset(&mut self, offset: Point) {
        self.camera.set_offset(offset);
        self.publish();
    }

    /// Undo the last action. Returns false if nothing changed.
    pub fn undo(&mut self) -> bool {
        if self.stroke.is_active() {
            return false;
        }
        let Some(previous) = self.history.undo(Arc::clone(&self.shapes)) else {
            return false;
        };
        self.restore(previous);
        log::info!("Undo: {} shapes", self.store.len());
        self.publish();
        true
    }

    /// Redo the last undone action. Returns false if nothing changed.
    pub fn redo(&mut self) -> bool {
        if self.stroke.is_active() {
            return false;
        }
        let Some(next) = self.history.redo(Arc::clone(&self.shapes)) else {
            return false;
        };
        self.restore(next);
        log::info!("Redo: {} shapes", self.store.len());
        self.publish();
        true
    }

    /// Remove every shape as one undoable action.
    ///
    /// Returns false when there is nothing to clear or a stroke is in progress.
    pub fn clear_all(&mut self) -> bool {
        if self.stroke.is_active() || self.store.is_empty() {
            return false;
        }
        self.history.record_before_action(Arc::clone(&self.shapes));
        let count = self.store.len();
        self.store.clear();
        self.shapes = self.store.snapshot();
        log::info!("Cleared {count} shapes");
        self.publish();
        true
    }

    /// Start a background export of the current shapes.
    ///
    /// A pending export is cancelled first. The outcome is picked up by
    /// [`Self::poll_export`].
    pub fn export_request(&mut self, width: u32, height: u32) {
        if let Some(task) = self.export_task.take() {
            log::info!("Cancelling pending export");
            task.cancel();
        }

        let job = ExportJob::new(Arc::clone(&self.shapes), width, height);
        let exporter = job
            .validate()
            .and_then(|()| self.exporter.clone().ok_or(ExportError::NoExporter));

        match exporter {
            Ok(exporter) => {
                log::info!("Exporting {} shapes at {width}x{height}", job.shapes.len());
                self.export_task = Some(ExportTask::spawn(exporter, job));
                self.export_status = ExportStatus::Exporting;
            }
            Err(e) => {
                log::error!("Export rejected: {e}");
                self.export_status = ExportStatus::Error(e.to_string());
            }
        }
        self.publish();
    }

    /// Apply a finished export to the state. Returns true if the status changed.
    pub fn poll_export(&mut self) -> bool {
        let Some(result) = self.export_task.as_ref().and_then(ExportTask::poll) else {
            return false;
        };
        self.export_task = None;

        match &result {
            Ok(path) => log::info!("Exported drawing to {}", path.display()),
            Err(e) => log::error!("Export failed: {e}"),
        }
        self.export_status = ExportStatus::from(&result);
        self.publish();
        true
    }

    /// Cancel the pending export, if any.
    pub fn cancel_export(&mut self) {
        let Some(task) = self.export_task.take() else {
            return;
        };
        task.cancel();
        log::info!("Export cancelled");
        self.export_status = ExportStatus::Error(ExportError::Cancelled.to_string());
        self.publish();
    }

    /// Snap `raw` if snapping is on, recording the candidates considered.
    fn resolve(&mut self, raw: Point) -> Point {
        if !self.snap_enabled {
            self.snap_candidates.clear();
            self.active_candidate = None;
            return raw;
        }

        let radius = snap_radius(self.camera.zoom);
        let shapes = self.store.shapes();
        let mut candidates = find_candidates(raw, shapes, radius, self.config.grid_size);
        if self.config.intersection_snapping {
            merge_candidates(&mut candidates, intersection_candidates(raw, shapes, radius));
        }
        if self.config.angle_snapping {
            let angle = self.stroke.origin().and_then(|origin| angle_candidate(origin, raw, radius));
            merge_candidates(&mut candidates, angle);
        }

        let best = select_best(&candidates, &DEFAULT_PRIORITY);
        if let Some(best) = &best {
            log::debug!("Snapped {raw:?} to {:?} ({})", best.point, best.kind.label());
        }
        let point = best.as_ref().map_or(raw, |c| c.point);
        self.snap_candidates = candidates;
        self.active_candidate = best;
        point
    }

    /// Refresh the HUD for the latest point of the stroke.
    fn update_hud(&mut self, current: Point) {
        let Some(origin) = self.stroke.origin() else {
            self.hud = PrecisionHud::default();
            return;
        };
        // Nothing to measure until the stroke has a second point.
        let (length_text, angle_text) = if self.stroke.points().len() < 2 {
            (String::new(), String::new())
        } else {
            (
                self.units.format_length(distance(origin, current)),
                self.units.format_angle(bearing(origin, current)),
            )
        };
        self.hud = PrecisionHud {
            visible: true,
            position: current,
            length_text,
            angle_text,
            snap_label: self
                .active_candidate
                .as_ref()
                .map(|c| c.kind.label().to_string())
                .unwrap_or_default(),
        };
    }

    /// Materialize the active stroke with the current tool and go idle.
    fn commit_stroke(&mut self) {
        let Some(points) = self.stroke.finish() else {
            return;
        };

        match self.tool.materialize(&points, &self.style) {
            Some(shape) => {
                log::info!("Committed {:?} shape {} from {} points", self.tool, shape.id(), points.len());
                self.store.add(shape);
                self.shapes = self.store.snapshot();
            }
            None => log::debug!("Discarded stroke with {} points", points.len()),
        }
        self.clear_stroke_feedback();
    }

    fn clear_stroke_feedback(&mut self) {
        self.snap_candidates.clear();
        self.active_candidate = None;
        self.hud = PrecisionHud::default();
    }

    fn restore(&mut self, shapes: ShapeSet) {
        self.store.restore(&shapes);
        self.shapes = shapes;
    }

    fn build_state(&self, version: u64) -> DrawingState {
        DrawingState {
            version,
            shapes: Arc::clone(&self.shapes),
            tool: self.tool,
            is_drawing: self.stroke.is_active(),
            current_points: self.stroke.points().to_vec(),
            snap_enabled: self.snap_enabled,
            snap_candidates: self.snap_candidates.clone(),
            active_candidate: self.active_candidate.clone(),
            snap_feedback: self.active_candidate.as_ref().map(SnapFeedback::from_candidate),
            hud: self.hud.clone(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            zoom: self.camera.zoom,
            offset: self.camera.offset,
            grid_size: self.config.grid_size,
            export_status: self.export_status.clone(),
        }
    }

    /// Replace the current state and notify subscribers, dropping disconnected ones.
    fn publish(&mut self) {
        let state = Arc::new(self.build_state(self.state.version + 1));
        self.state = Arc::clone(&state);
        self.subscribers.retain(|tx| tx.send(Arc::clone(&state)).is_ok());
    }
}
