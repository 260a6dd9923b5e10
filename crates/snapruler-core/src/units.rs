//! Physical units for the precision HUD.

/// Reference density: at 160 dpi one dp is one pixel.
pub const STANDARD_DPI: f64 = 160.0;

const MM_PER_INCH: f64 = 25.4;

/// Formats lengths and angles for display.
pub trait UnitFormatter: Send + Sync {
    /// Format a length given in device pixels.
    fn format_length(&self, px: f64) -> String;

    /// Format an angle given in degrees.
    fn format_angle(&self, degrees: f64) -> String;
}

/// Converts between pixels and physical units using display density metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DpiCalibration {
    /// Logical density (pixels per dp).
    pub density: f64,
    /// Physical dots per inch.
    pub density_dpi: f64,
}

impl Default for DpiCalibration {
    fn default() -> Self {
        Self {
            density: 1.0,
            density_dpi: STANDARD_DPI,
        }
    }
}

impl DpiCalibration {
    pub fn new(density: f64, density_dpi: f64) -> Self {
        Self { density, density_dpi }
    }

    pub fn dp_to_px(&self, dp: f64) -> f64 {
        dp * self.density
    }

    pub fn px_to_dp(&self, px: f64) -> f64 {
        px / self.density
    }

    pub fn mm_to_px(&self, mm: f64) -> f64 {
        mm / MM_PER_INCH * self.density_dpi
    }

    pub fn px_to_mm(&self, px: f64) -> f64 {
        px * MM_PER_INCH / self.density_dpi
    }

    pub fn cm_to_px(&self, cm: f64) -> f64 {
        self.mm_to_px(cm * 10.0)
    }

    pub fn px_to_cm(&self, px: f64) -> f64 {
        self.px_to_mm(px) / 10.0
    }

    /// Grid spacing in pixels for a spacing given in millimetres.
    pub fn grid_size_px(&self, grid_size_mm: f64) -> f64 {
        self.mm_to_px(grid_size_mm)
    }
}

impl UnitFormatter for DpiCalibration {
    fn format_length(&self, px: f64) -> String {
        format!("{:.1} cm", self.px_to_cm(px))
    }

    fn format_angle(&self, degrees: f64) -> String {
        format!("{degrees:.1}°")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_roundtrip() {
        let dpi = DpiCalibration::new(2.0, 320.0);
        let px = dpi.mm_to_px(12.0);
        assert!((dpi.px_to_mm(px) - 12.0).abs() < 1e-9);
        assert!((dpi.dp_to_px(10.0) - 20.0).abs() < f64::EPSILON);
        assert!((dpi.px_to_dp(20.0) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_one_inch() {
        let dpi = DpiCalibration::default();
        assert!((dpi.cm_to_px(2.54) - 160.0).abs() < 1e-9);
        assert!((dpi.px_to_cm(160.0) - 2.54).abs() < 1e-9);
    }

    #[test]
    fn test_format() {
        let dpi = DpiCalibration::default();
        assert_eq!(dpi.format_length(160.0), "2.5 cm");
        assert_eq!(dpi.format_angle(-44.96), "-45.0°");
    }

    #[test]
    fn test_grid_size_px() {
        let dpi = DpiCalibration::new(1.0, 254.0);
        assert!((dpi.grid_size_px(5.0) - 50.0).abs() < 1e-9);
    }
}
