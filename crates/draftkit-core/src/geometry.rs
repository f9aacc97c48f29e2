//! Plane geometry helpers shared by the snap engine and the instruments.

use kurbo::{Point, Rect, Vec2};

/// Determinants below this magnitude are treated as parallel lines.
pub const PARALLEL_EPSILON: f64 = 1e-3;

/// Slack allowed when checking that an intersection lies on a segment.
pub const SEGMENT_BOUNDS_TOLERANCE: f64 = 0.1;

/// Intersection of the infinite lines through `a1→a2` and `b1→b2`.
///
/// Solves `a1x + b1y = c1`, `a2x + b2y = c2` by Cramer's rule. Returns `None`
/// when the lines are parallel or nearly so.
pub fn line_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
    let (la, lb, lc) = line_coefficients(a1, a2);
    let (ma, mb, mc) = line_coefficients(b1, b2);

    let det = la * mb - ma * lb;
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }

    Some(Point::new(
        (mb * lc - lb * mc) / det,
        (la * mc - ma * lc) / det,
    ))
}

/// Coefficients `(a, b, c)` of the implicit line `ax + by = c` through two points.
fn line_coefficients(p: Point, q: Point) -> (f64, f64, f64) {
    let a = q.y - p.y;
    let b = p.x - q.x;
    (a, b, a * p.x + b * p.y)
}

/// Intersection of two drawn segments.
///
/// The crossing of the infinite lines is only accepted when it falls inside
/// both segments' bounding boxes (inclusive, with [`SEGMENT_BOUNDS_TOLERANCE`]).
pub fn segment_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
    let hit = line_intersection(a1, a2, b1, b2)?;
    let on_a = contains_inclusive(Rect::from_points(a1, a2), hit, SEGMENT_BOUNDS_TOLERANCE);
    let on_b = contains_inclusive(Rect::from_points(b1, b2), hit, SEGMENT_BOUNDS_TOLERANCE);
    (on_a && on_b).then_some(hit)
}

/// Inclusive containment with slack on every side.
///
/// `Rect::contains` is half-open, which would drop hits on the far edge.
pub fn contains_inclusive(rect: Rect, point: Point, tolerance: f64) -> bool {
    point.x >= rect.x0 - tolerance
        && point.x <= rect.x1 + tolerance
        && point.y >= rect.y0 - tolerance
        && point.y <= rect.y1 + tolerance
}

/// Inclusive overlap test; degenerate (zero-width) boxes still touch.
pub fn rects_touch(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Normalize an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360.
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Smallest absolute difference between two angles, accounting for wrap-around.
pub fn angle_difference(a: f64, b: f64) -> f64 {
    let diff = (normalize_degrees(a) - normalize_degrees(b)).abs();
    diff.min(360.0 - diff)
}

/// Direction of `from→to` in degrees, normalized into `[0, 360)`.
pub fn direction_degrees(from: Point, to: Point) -> f64 {
    normalize_degrees((to - from).atan2().to_degrees())
}

/// Unit vector pointing along `degrees`.
pub fn unit_vector(degrees: f64) -> Vec2 {
    Vec2::from_angle(degrees.to_radians())
}

/// Angle between rays `vertex→p1` and `vertex→p2` in degrees, in `[0, 180]`.
///
/// Zero-length rays have no direction and yield 0.
pub fn angle_between_rays(vertex: Point, p1: Point, p2: Point) -> f64 {
    let v1 = p1 - vertex;
    let v2 = p2 - vertex;
    let denom = v1.hypot() * v2.hypot();
    if denom < f64::EPSILON {
        return 0.0;
    }
    let cos = (v1.dot(v2) / denom).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}
