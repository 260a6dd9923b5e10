//! SnapRuler Render Library
//!
//! Bitmap export for SnapRuler drawings. Shapes are rasterized with
//! tiny-skia and written as PNG files.

mod png_exporter;
pub mod raster;

pub use png_exporter::{EXPORT_DIR_NAME, PngExporter};
pub use raster::{draw_shape, rasterize};
