//! Rasterization of shapes with tiny-skia.

use kurbo::{BezPath, PathEl};
use snapruler_core::export::{ExportError, ExportJob, ExportResult};
use snapruler_core::shapes::Shape;
use tiny_skia::{Color, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Convert a kurbo path to a tiny-skia path.
///
/// Returns `None` for paths without any drawable segment.
fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// Stroke one shape onto the pixmap.
pub fn draw_shape(pixmap: &mut Pixmap, shape: &Shape) {
    let Some(path) = to_skia_path(&shape.to_path()) else {
        return;
    };

    let style = shape.style();
    let rgba = style.stroke().to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgba.r, rgba.g, rgba.b, rgba.a);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: style.stroke_width as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

/// Draw every shape of the job, back to front, on a white background.
///
/// The job's cancel token is checked before each shape.
pub fn rasterize(job: &ExportJob) -> ExportResult<Pixmap> {
    job.validate()?;
    let mut pixmap = Pixmap::new(job.width, job.height)
        .ok_or_else(|| ExportError::Render(format!("cannot allocate {}x{} bitmap", job.width, job.height)))?;
    pixmap.fill(Color::WHITE);

    for shape in job.shapes.iter() {
        job.cancel.check()?;
        draw_shape(&mut pixmap, shape);
    }
    Ok(pixmap)
}

/// Straight-alpha RGBA8 bytes of the pixmap.
pub fn to_rgba8(pixmap: &Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use snapruler_core::shapes::{Circle, Freehand, Line};
    use std::sync::Arc;

    fn job(shapes: Vec<Shape>, width: u32, height: u32) -> ExportJob {
        ExportJob::new(Arc::from(shapes), width, height)
    }

    fn red_at(pixmap: &Pixmap, x: u32, y: u32) -> u8 {
        pixmap.pixel(x, y).unwrap().demultiply().red()
    }

    #[test]
    fn test_empty_drawing_is_white() {
        let pixmap = rasterize(&job(Vec::new(), 8, 8)).unwrap();
        assert!(to_rgba8(&pixmap).iter().all(|&b| b == 255));
    }

    #[test]
    fn test_line_is_stroked() {
        let line = Line::new(Point::new(0.0, 10.5), Point::new(40.0, 10.5));
        let pixmap = rasterize(&job(vec![line.into()], 40, 40)).unwrap();
        assert!(red_at(&pixmap, 20, 10) < 64);
        assert_eq!(red_at(&pixmap, 20, 30), 255);
    }

    #[test]
    fn test_circle_is_outlined() {
        let circle = Circle::new(Point::new(20.0, 20.0), 10.0);
        let pixmap = rasterize(&job(vec![circle.into()], 40, 40)).unwrap();
        assert!(red_at(&pixmap, 29, 20) < 128 || red_at(&pixmap, 30, 20) < 128);
        assert_eq!(red_at(&pixmap, 20, 20), 255);
    }

    #[test]
    fn test_single_point_freehand_draws_nothing() {
        let freehand = Freehand::from_points(vec![Point::new(5.0, 5.0)]).unwrap();
        let pixmap = rasterize(&job(vec![freehand.into()], 10, 10)).unwrap();
        assert!(to_rgba8(&pixmap).iter().all(|&b| b == 255));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            rasterize(&job(Vec::new(), 0, 5)),
            Err(ExportError::InvalidSize { width: 0, height: 5 })
        ));
    }

    #[test]
    fn test_cancelled_job() {
        let line = Line::new(Point::ZERO, Point::new(5.0, 5.0));
        let job = job(vec![line.into()], 10, 10);
        job.cancel.cancel();
        assert!(matches!(rasterize(&job), Err(ExportError::Cancelled)));
    }
}
