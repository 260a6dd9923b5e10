//! PNG file exporter.

use crate::raster::{rasterize, to_rgba8};
use snapruler_core::export::{ExportError, ExportJob, ExportResult, Exporter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Folder created under the user's pictures directory.
pub const EXPORT_DIR_NAME: &str = "SnapRuler";

/// Writes drawings as `<dir>/<file_stem>.png`.
#[derive(Debug, Clone)]
pub struct PngExporter {
    dir: PathBuf,
}

impl PngExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Exporter writing to `SnapRuler` in the user's pictures directory.
    pub fn default_location() -> ExportResult<Self> {
        let pictures = dirs::picture_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no pictures directory"))?;
        Ok(Self::new(pictures.join(EXPORT_DIR_NAME)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Encode RGBA8 pixel data to PNG bytes.
    pub fn encode(rgba_data: &[u8], width: u32, height: u32) -> ExportResult<Vec<u8>> {
        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, width, height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder
                .write_header()
                .map_err(|e| ExportError::Encode(e.to_string()))?;
            writer
                .write_image_data(rgba_data)
                .map_err(|e| ExportError::Encode(e.to_string()))?;
        }
        Ok(png_data)
    }
}

impl Exporter for PngExporter {
    fn export(&self, job: &ExportJob) -> ExportResult<PathBuf> {
        let pixmap = rasterize(job)?;
        job.cancel.check()?;
        let png_data = Self::encode(&to_rgba8(&pixmap), job.width, job.height)?;

        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}.png", job.file_stem));
        fs::write(&path, &png_data)?;
        log::info!("PNG export complete: {} ({} bytes)", path.display(), png_data.len());
        Ok(path)
    }
}
