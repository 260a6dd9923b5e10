//! SnapRuler Core Library
//!
//! Platform-agnostic geometry, snapping, history and drawing-session logic
//! for the SnapRuler drafting surface.

pub mod camera;
pub mod config;
pub mod export;
pub mod geometry;
pub mod history;
pub mod input;
pub mod session;
pub mod shapes;
pub mod snap;
pub mod state;
pub mod store;
pub mod tools;
pub mod units;

pub use camera::Camera;
pub use config::{ConfigError, SessionConfig};
pub use export::{CancelToken, ExportError, ExportJob, ExportResult, ExportStatus, ExportTask, Exporter};
pub use history::{History, MAX_UNDO_HISTORY};
pub use input::{PointerEvent, SessionEvent};
pub use session::DrawingSession;
pub use shapes::{Circle, Freehand, Line, Shape, ShapeId, ShapeStyle, ShapeTrait};
pub use snap::{AngleSnap, DEFAULT_PRIORITY, SnapCandidate, SnapFeedback, SnapKind, find_candidates, select_best};
pub use state::{DrawingState, PrecisionHud};
pub use store::{ShapeSet, ShapeStore};
pub use tools::{StrokeState, ToolKind};
pub use units::{DpiCalibration, UnitFormatter};
