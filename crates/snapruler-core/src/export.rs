//! Bitmap export abstraction and background export jobs.
//!
//! The session hands an immutable [`ShapeSet`] to an [`Exporter`] running on
//! a worker thread and picks up the outcome later through [`ExportTask::poll`].
//! Drawing state is never touched by the worker.

use crate::store::ShapeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, TryRecvError, channel};
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid export size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("export cancelled")]
    Cancelled,
    #[error("no exporter configured")]
    NoExporter,
    #[error("render failed: {0}")]
    Render(String),
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Export progress as seen by the shell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExportStatus {
    #[default]
    Idle,
    Exporting,
    Success(PathBuf),
    Error(String),
}

/// Shared cancellation flag for one export job.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Fail with [`ExportError::Cancelled`] once cancelled.
    pub fn check(&self) -> ExportResult<()> {
        if self.is_cancelled() {
            Err(ExportError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Everything an exporter needs to produce one bitmap.
#[derive(Debug, Clone)]
pub struct ExportJob {
    /// Shapes to draw, back to front.
    pub shapes: ShapeSet,
    /// Bitmap width in pixels.
    pub width: u32,
    /// Bitmap height in pixels.
    pub height: u32,
    /// File name without extension.
    pub file_stem: String,
    /// Cancellation flag, checked by the exporter between shapes.
    pub cancel: CancelToken,
}

impl ExportJob {
    /// Create a job with a timestamped file name (`drawing_<unix millis>`).
    pub fn new(shapes: ShapeSet, width: u32, height: u32) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        Self {
            shapes,
            width,
            height,
            file_stem: format!("drawing_{millis}"),
            cancel: CancelToken::new(),
        }
    }

    /// Check the dimensions are usable.
    pub fn validate(&self) -> ExportResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ExportError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Trait for bitmap export backends.
///
/// Implementations rasterize the job's shapes and persist the image,
/// returning the path written.
pub trait Exporter: Send + Sync {
    fn export(&self, job: &ExportJob) -> ExportResult<PathBuf>;
}

/// A running export on a worker thread.
pub struct ExportTask {
    cancel: CancelToken,
    result_rx: Receiver<ExportResult<PathBuf>>,
}

impl ExportTask {
    /// Run `job` on a new thread.
    pub fn spawn(exporter: Arc<dyn Exporter>, job: ExportJob) -> Self {
        let (result_tx, result_rx) = channel();
        let cancel = job.cancel.clone();

        thread::spawn(move || {
            log::debug!("Export thread: {}x{}, {} shapes", job.width, job.height, job.shapes.len());
            let result = job.validate().and_then(|()| exporter.export(&job));
            // The receiver is gone if the session was dropped; nothing to report to.
            let _ = result_tx.send(result);
        });

        Self { cancel, result_rx }
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Non-blocking check for the outcome.
    pub fn poll(&self) -> Option<ExportResult<PathBuf>> {
        match self.result_rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ExportError::Render("export thread exited".to_string()))),
        }
    }

    /// Block until the outcome is available.
    pub fn wait(&self) -> ExportResult<PathBuf> {
        self.result_rx
            .recv()
            .unwrap_or_else(|_| Err(ExportError::Render("export thread exited".to_string())))
    }
}

impl From<&ExportResult<PathBuf>> for ExportStatus {
    fn from(result: &ExportResult<PathBuf>) -> Self {
        match result {
            Ok(path) => ExportStatus::Success(path.clone()),
            Err(e) => ExportStatus::Error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Line, Shape};
    use kurbo::Point;

    struct CountingExporter;

    impl Exporter for CountingExporter {
        fn export(&self, job: &ExportJob) -> ExportResult<PathBuf> {
            job.cancel.check()?;
            Ok(PathBuf::from(format!("{}-{}.png", job.file_stem, job.shapes.len())))
        }
    }

    fn shapes() -> ShapeSet {
        Arc::from(vec![Shape::Line(Line::new(Point::ZERO, Point::new(1.0, 1.0)))])
    }

    #[test]
    fn test_job_file_stem() {
        let job = ExportJob::new(shapes(), 10, 10);
        assert!(job.file_stem.starts_with("drawing_"));
        assert!(job.validate().is_ok());
    }

    #[test]
    fn test_invalid_size() {
        let job = ExportJob::new(shapes(), 0, 10);
        assert!(matches!(job.validate(), Err(ExportError::InvalidSize { width: 0, height: 10 })));
    }

    #[test]
    fn test_task_success() {
        let mut job = ExportJob::new(shapes(), 4, 4);
        job.file_stem = "out".to_string();
        let task = ExportTask::spawn(Arc::new(CountingExporter), job);
        let path = task.wait().unwrap();
        assert_eq!(path, PathBuf::from("out-1.png"));
    }

    #[test]
    fn test_cancelled_before_run() {
        let job = ExportJob::new(shapes(), 4, 4);
        job.cancel.cancel();
        let task = ExportTask::spawn(Arc::new(CountingExporter), job);
        assert!(matches!(task.wait(), Err(ExportError::Cancelled)));
    }

    #[test]
    fn test_status_from_result() {
        let ok: ExportResult<PathBuf> = Ok(PathBuf::from("a.png"));
        assert_eq!(ExportStatus::from(&ok), ExportStatus::Success(PathBuf::from("a.png")));
        let err: ExportResult<PathBuf> = Err(ExportError::Cancelled);
        assert_eq!(ExportStatus::from(&err), ExportStatus::Error("export cancelled".to_string()));
    }
}
