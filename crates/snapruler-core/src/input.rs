//! Events accepted from the UI shell.

use crate::tools::ToolKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

/// Everything the shell can ask of a drawing session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    Pointer(PointerEvent),
    SetTool(ToolKind),
    SetSnapEnabled(bool),
    SetZoom(f64),
    SetPanOffset(Point),
    Undo,
    Redo,
    ClearAll,
    Export { width: u32, height: u32 },
    CancelExport,
}

impl From<PointerEvent> for SessionEvent {
    fn from(event: PointerEvent) -> Self {
        SessionEvent::Pointer(event)
    }
}
