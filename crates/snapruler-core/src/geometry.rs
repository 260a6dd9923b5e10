//! Pure geometry helpers used by snapping and the precision HUD.
//!
//! Angles are in degrees, points in device pixels.

use kurbo::Point;

/// Determinant magnitude below which two segments are treated as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-10;

/// Euclidean distance between two points.
pub fn distance(p: Point, q: Point) -> f64 {
    p.distance(q)
}

/// Midpoint of the segment `a`-`b`.
pub fn midpoint(a: Point, b: Point) -> Point {
    a.midpoint(b)
}

/// Normalize an angle in degrees to `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Angle from `vertex→p1` to `vertex→p2`, in degrees within `[0, 360)`.
pub fn angle_between(p1: Point, vertex: Point, p2: Point) -> f64 {
    let a1 = (p1.y - vertex.y).atan2(p1.x - vertex.x);
    let a2 = (p2.y - vertex.y).atan2(p2.x - vertex.x);
    let angle = (a2 - a1).to_degrees();
    if angle < 0.0 { angle + 360.0 } else { angle }
}

/// Bearing of the direction `start→end` in degrees, as returned by `atan2`.
pub fn bearing(start: Point, end: Point) -> f64 {
    (end.y - start.y).atan2(end.x - start.x).to_degrees()
}

/// Rotate `point` about `center` by `degrees`.
pub fn rotate(point: Point, center: Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point::new(
        dx * cos - dy * sin + center.x,
        dx * sin + dy * cos + center.y,
    )
}

/// Intersection of the segments `a_start`-`a_end` and `b_start`-`b_end`.
///
/// Returns `None` for parallel or collinear segments, and when the crossing
/// of the supporting lines falls outside either segment.
pub fn line_intersection(a_start: Point, a_end: Point, b_start: Point, b_end: Point) -> Option<Point> {
    let (x1, y1) = (a_start.x, a_start.y);
    let (x2, y2) = (a_end.x, a_end.y);
    let (x3, y3) = (b_start.x, b_start.y);
    let (x4, y4) = (b_end.x, b_end.y);

    let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / denom;
    let u = -((x1 - x2) * (y1 - y3) - (y1 - y2) * (x1 - x3)) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Point::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1)))
    } else {
        None
    }
}

/// Round each coordinate to the nearest multiple of `grid_size`.
///
/// Halves round away from zero.
pub fn quantize_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point, b: Point) {
        assert!((a.x - b.x).abs() < 1e-9, "{a:?} != {b:?}");
        assert!((a.y - b.y).abs() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_distance_zero_and_symmetric() {
        let p = Point::new(3.0, -4.0);
        let q = Point::new(-1.5, 7.25);
        assert_eq!(distance(p, p), 0.0);
        assert_eq!(distance(p, q), distance(q, p));
        assert!((distance(Point::ZERO, Point::new(3.0, 4.0)) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_angle_between_right_angle() {
        let angle = angle_between(Point::new(1.0, 0.0), Point::ZERO, Point::new(0.0, 1.0));
        assert!((angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_between_is_non_negative() {
        let angle = angle_between(Point::new(0.0, 1.0), Point::ZERO, Point::new(1.0, 0.0));
        assert!((angle - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let rotated = rotate(Point::new(1.0, 0.0), Point::ZERO, 90.0);
        assert_close(rotated, Point::new(0.0, 1.0));
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let p = Point::new(12.5, -3.0);
        let c = Point::new(4.0, 4.0);
        assert_close(rotate(p, c, 0.0), p);
    }

    #[test]
    fn test_rotate_inverse() {
        let p = Point::new(12.5, -3.0);
        let c = Point::new(4.0, 4.0);
        for theta in [17.0, 90.0, 213.5, -45.0, 720.0] {
            assert_close(rotate(rotate(p, c, theta), c, -theta), p);
        }
    }

    #[test]
    fn test_line_intersection_crossing() {
        let hit = line_intersection(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
        );
        assert_close(hit.expect("segments cross"), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_line_intersection_parallel() {
        let hit = line_intersection(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 5.0),
            Point::new(10.0, 5.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_line_intersection_outside_segments() {
        // The supporting lines cross at (15, 0), beyond the first segment.
        let hit = line_intersection(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(15.0, -5.0),
            Point::new(15.0, 5.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_line_intersection_shared_endpoint() {
        let hit = line_intersection(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        );
        assert_close(hit.expect("touching endpoints"), Point::new(10.0, 0.0));
    }

    #[test]
    fn test_quantize_to_grid() {
        assert_eq!(quantize_to_grid(Point::new(23.0, 27.0), 10.0), Point::new(20.0, 30.0));
    }

    #[test]
    fn test_quantize_rounds_half_away_from_zero() {
        assert_eq!(quantize_to_grid(Point::new(5.0, -5.0), 10.0), Point::new(10.0, -10.0));
    }

    #[test]
    fn test_quantize_idempotent() {
        for (x, y, g) in [(23.0, 27.0, 10.0), (-41.3, 88.8, 50.0), (0.4, 0.6, 0.25)] {
            let once = quantize_to_grid(Point::new(x, y), g);
            assert_eq!(quantize_to_grid(once, g), once);
        }
    }

    #[test]
    fn test_normalize_degrees() {
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-9);
        assert!((normalize_degrees(720.0)).abs() < 1e-9);
        assert!((normalize_degrees(45.0) - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing() {
        assert!((bearing(Point::ZERO, Point::new(0.0, 10.0)) - 90.0).abs() < 1e-9);
        assert!((bearing(Point::ZERO, Point::new(-10.0, 0.0)) - 180.0).abs() < 1e-9);
    }
}
