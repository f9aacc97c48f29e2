//! Snap functionality: candidate catalogs, point resolution and angle snapping.

use crate::geometry::{
    SEGMENT_BOUNDS_TOLERANCE, angle_difference, normalize_degrees, rects_touch, segment_intersection,
};
use crate::shapes::{ElementRef, SceneElement};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default grid spacing (matches the visual grid).
pub const GRID_SIZE: f64 = 20.0;

/// Default capture radius at zoom 1, in canvas units.
pub const DEFAULT_SNAP_RADIUS: f64 = 20.0;

/// Distances closer than this are considered equal and settled by priority.
pub const DISTANCE_TIE_EPSILON: f64 = 0.1;

/// Type of snap target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnapTargetKind {
    /// Regular grid intersection.
    Grid,
    /// End of a line segment.
    Endpoint,
    /// Middle of a line segment.
    Midpoint,
    /// Crossing of two drawn line segments.
    Intersection,
    /// Center of a circle.
    Center,
}

impl SnapTargetKind {
    /// Tie-break rank among equidistant targets (higher wins).
    pub fn priority(self) -> u8 {
        match self {
            SnapTargetKind::Grid => 0,
            SnapTargetKind::Midpoint => 1,
            SnapTargetKind::Endpoint | SnapTargetKind::Center => 2,
            SnapTargetKind::Intersection => 3,
        }
    }
}

/// A point that can be snapped to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapTarget {
    /// The snap point location.
    pub point: Point,
    /// Type of snap target for visual feedback.
    pub kind: SnapTargetKind,
    /// Tie-break rank (see [`SnapTargetKind::priority`]).
    pub priority: u8,
    /// Index of the element this target came from, if any.
    pub source: Option<ElementRef>,
}

impl SnapTarget {
    /// Create a target with the default priority for its kind.
    pub fn new(point: Point, kind: SnapTargetKind, source: Option<ElementRef>) -> Self {
        Self {
            point,
            kind,
            priority: kind.priority(),
            source,
        }
    }
}

/// Result of a successful snap query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapResult {
    /// The raw query point.
    pub original_point: Point,
    /// Where the point was pulled to.
    pub snapped_point: Point,
    /// The target that won.
    pub target: SnapTarget,
    /// Distance from the raw point to the target.
    pub distance: f64,
}

/// Upper bound on grid targets in one catalog.
pub const MAX_GRID_TARGETS: usize = 1_000_000;

/// Grid columns and rows covering `[0, width] x [0, height]`.
///
/// `None` when the spacing is unusable or the grid would exceed
/// [`MAX_GRID_TARGETS`].
fn grid_dimensions(width: f64, height: f64, spacing: f64) -> Option<(usize, usize)> {
    if !(spacing.is_finite() && spacing > 0.0 && width.is_finite() && height.is_finite()) {
        return None;
    }
    if width < 0.0 || height < 0.0 {
        return None;
    }
    let cols = (width / spacing).floor() + 1.0;
    let rows = (height / spacing).floor() + 1.0;
    if cols * rows > MAX_GRID_TARGETS as f64 {
        return None;
    }
    Some((cols as usize, rows as usize))
}

/// Check that a grid with `spacing` over the canvas stays within
/// [`MAX_GRID_TARGETS`].
pub fn grid_fits(width: f64, height: f64, spacing: f64) -> bool {
    grid_dimensions(width, height, spacing).is_some()
}

/// Snap targets at every grid intersection covering `[0, width] x [0, height]`.
///
/// Empty when the spacing is unusable or the grid would be too dense.
pub fn grid_targets(width: f64, height: f64, spacing: f64) -> Vec<SnapTarget> {
    let Some((cols, rows)) = grid_dimensions(width, height, spacing) else {
        return Vec::new();
    };

    let mut targets = Vec::with_capacity(cols * rows);
    for i in 0..cols {
        for j in 0..rows {
            let point = Point::new(i as f64 * spacing, j as f64 * spacing);
            targets.push(SnapTarget::new(point, SnapTargetKind::Grid, None));
        }
    }
    targets
}

/// Feature targets contributed by a single element.
pub fn element_targets(index: ElementRef, element: &SceneElement) -> Vec<SnapTarget> {
    match element {
        SceneElement::Line(line) => vec![
            SnapTarget::new(line.start, SnapTargetKind::Endpoint, Some(index)),
            SnapTarget::new(line.end, SnapTargetKind::Endpoint, Some(index)),
            SnapTarget::new(line.midpoint(), SnapTargetKind::Midpoint, Some(index)),
        ],
        SceneElement::Circle(circle) => {
            vec![SnapTarget::new(circle.center, SnapTargetKind::Center, Some(index))]
        }
        SceneElement::Freehand(_) | SceneElement::Angle(_) => Vec::new(),
    }
}

/// Crossings between every unordered pair of drawn lines.
pub fn intersection_targets(elements: &[SceneElement]) -> Vec<SnapTarget> {
    let tolerance = SEGMENT_BOUNDS_TOLERANCE;
    let lines: Vec<_> = elements
        .iter()
        .enumerate()
        .filter_map(|(i, e)| e.as_line().map(|l| (i, l, e.bounds().inflate(tolerance, tolerance))))
        .collect();

    let mut targets = Vec::new();
    for (n, (index, a, a_bounds)) in lines.iter().enumerate() {
        for (_, b, b_bounds) in &lines[n + 1..] {
            if !rects_touch(*a_bounds, *b_bounds) {
                continue;
            }
            if let Some(point) = segment_intersection(a.start, a.end, b.start, b.end) {
                targets.push(SnapTarget::new(point, SnapTargetKind::Intersection, Some(*index)));
            }
        }
    }
    targets
}

/// Build the full candidate catalog for a scene.
///
/// Targets are not deduplicated; coincident candidates are settled by the
/// resolver's priority rule.
pub fn build_catalog(
    elements: &[SceneElement],
    canvas_width: f64,
    canvas_height: f64,
    grid_spacing: f64,
) -> Vec<SnapTarget> {
    let mut catalog = grid_targets(canvas_width, canvas_height, grid_spacing);
    for (index, element) in elements.iter().enumerate() {
        catalog.extend(element_targets(index, element));
    }
    catalog.extend(intersection_targets(elements));
    catalog
}

/// Capture radius after accounting for zoom.
///
/// Zooming in shrinks the radius in canvas units so the on-screen reach stays
/// roughly constant.
pub fn effective_snap_radius(base_radius: f64, zoom: f64) -> f64 {
    base_radius / zoom
}

/// Find the best target for `point`.
///
/// Admits targets within the effective radius. The closest target wins;
/// targets closer than [`DISTANCE_TIE_EPSILON`] to each other are settled by
/// priority.
pub fn resolve(
    point: Point,
    catalog: &[SnapTarget],
    zoom: f64,
    base_radius: f64,
    enabled: bool,
) -> Option<SnapResult> {
    if !enabled || catalog.is_empty() {
        return None;
    }

    let radius = effective_snap_radius(base_radius, zoom);
    let mut best: Option<(&SnapTarget, f64)> = None;

    for target in catalog {
        let distance = point.distance(target.point);
        if distance > radius {
            continue;
        }
        let better = match best {
            None => true,
            Some((current, current_distance)) => {
                if (distance - current_distance).abs() < DISTANCE_TIE_EPSILON {
                    target.priority > current.priority
                } else {
                    distance < current_distance
                }
            }
        };
        if better {
            best = Some((target, distance));
        }
    }

    best.map(|(target, distance)| SnapResult {
        original_point: point,
        snapped_point: target.point,
        target: *target,
        distance,
    })
}

/// Common angles offered by the angle snapper, in degrees.
pub const COMMON_ANGLES: [f64; 16] = [
    0.0, 30.0, 45.0, 60.0, 90.0, 120.0, 135.0, 150.0, 180.0, 210.0, 225.0, 240.0, 270.0, 300.0,
    315.0, 330.0,
];

/// Threshold for the common-angle table, in degrees.
pub const ANGLE_SNAP_THRESHOLD: f64 = 5.0;

/// Horizontal and vertical orientations the ruler prefers.
pub const AXIS_ANGLES: [f64; 4] = [0.0, 90.0, 180.0, 270.0];

/// Wider threshold the ruler applies to [`AXIS_ANGLES`].
pub const AXIS_SNAP_THRESHOLD: f64 = 10.0;

/// Relative angles the protractor snaps its second ray to.
pub const PROTRACTOR_ANGLES: [f64; 8] = [30.0, 45.0, 60.0, 90.0, 120.0, 135.0, 150.0, 180.0];

/// Threshold for the protractor table, in degrees.
pub const PROTRACTOR_SNAP_THRESHOLD: f64 = 5.0;

/// First table entry within `threshold` of an already normalized angle.
fn nearest_in_table(normalized: f64, table: &[f64], threshold: f64) -> Option<f64> {
    table
        .iter()
        .copied()
        .find(|&entry| angle_difference(normalized, entry) <= threshold)
}

/// Snap an angle to the common-angle table.
///
/// Returns the table entry when the input is within [`ANGLE_SNAP_THRESHOLD`]
/// of it, otherwise the input normalized into `[0, 360)`.
pub fn snap_angle(raw_degrees: f64) -> f64 {
    let normalized = normalize_degrees(raw_degrees);
    nearest_in_table(normalized, &COMMON_ANGLES, ANGLE_SNAP_THRESHOLD).unwrap_or(normalized)
}

/// Snap a ruler orientation: horizontal/vertical first with a wider pull,
/// then the common-angle table.
pub fn snap_ruler_angle(raw_degrees: f64) -> f64 {
    let normalized = normalize_degrees(raw_degrees);
    nearest_in_table(normalized, &AXIS_ANGLES, AXIS_SNAP_THRESHOLD)
        .unwrap_or_else(|| snap_angle(normalized))
}

/// Snap the relative angle between two protractor rays.
///
/// `relative_degrees` is the counter-direction of ray 2 measured from ray 1.
/// Both the angle and its `360 - angle` reflection are checked so either
/// rotation direction snaps. Returns the snapped relative angle in
/// `[0, 360)`, or `None` when nothing is close enough.
pub fn snap_protractor_angle(relative_degrees: f64) -> Option<f64> {
    let relative = normalize_degrees(relative_degrees);
    if let Some(entry) = nearest_in_table(relative, &PROTRACTOR_ANGLES, PROTRACTOR_SNAP_THRESHOLD) {
        return Some(entry);
    }
    let reflected = normalize_degrees(360.0 - relative);
    nearest_in_table(reflected, &PROTRACTOR_ANGLES, PROTRACTOR_SNAP_THRESHOLD)
        .map(|entry| normalize_degrees(360.0 - entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Freehand, Line};

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> SceneElement {
        SceneElement::Line(Line::new(Point::new(x0, y0), Point::new(x1, y1)))
    }

    #[test]
    fn test_grid_targets_cover_canvas_inclusive() {
        let targets = grid_targets(100.0, 40.0, 20.0);
        assert_eq!(targets.len(), 6 * 3);
        assert!(targets.iter().any(|t| t.point == Point::new(100.0, 40.0)));
        assert!(targets.iter().all(|t| t.kind == SnapTargetKind::Grid && t.priority == 0));
    }

    #[test]
    fn test_grid_targets_invalid_spacing() {
        assert!(grid_targets(100.0, 100.0, 0.0).is_empty());
        assert!(grid_targets(100.0, 100.0, -5.0).is_empty());
        assert!(grid_targets(100.0, 100.0, f64::NAN).is_empty());
    }

    #[test]
    fn test_grid_targets_too_dense() {
        assert!(!grid_fits(1920.0, 1080.0, 1e-6));
        assert!(grid_targets(1920.0, 1080.0, 1e-6).is_empty());
        assert!(grid_targets(f64::MAX, 10.0, 20.0).is_empty());
        assert!(grid_fits(1920.0, 1080.0, 2.0));
    }

    #[test]
    fn test_line_targets() {
        let targets = element_targets(3, &line(0.0, 0.0, 100.0, 0.0));
        assert_eq!(targets.len(), 3);
        let endpoints = targets.iter().filter(|t| t.kind == SnapTargetKind::Endpoint);
        assert!(endpoints.clone().all(|t| t.priority == 2 && t.source == Some(3)));
        assert_eq!(endpoints.count(), 2);
        let mid = targets.iter().find(|t| t.kind == SnapTargetKind::Midpoint).unwrap();
        assert_eq!(mid.point, Point::new(50.0, 0.0));
        assert_eq!(mid.priority, 1);
    }

    #[test]
    fn test_circle_and_passive_targets() {
        let circle = SceneElement::Circle(Circle::new(Point::new(10.0, 10.0), 5.0));
        let targets = element_targets(0, &circle);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].kind, SnapTargetKind::Center);
        assert_eq!(targets[0].priority, 2);

        let stroke = SceneElement::Freehand(Freehand::from_points(vec![Point::ZERO, Point::new(5.0, 5.0)]));
        assert!(element_targets(1, &stroke).is_empty());
    }

    #[test]
    fn test_intersection_containment() {
        // Infinite extensions cross at (50, 0), the drawn segments do not.
        let scene = vec![line(0.0, 0.0, 40.0, 0.0), line(50.0, 10.0, 50.0, 60.0)];
        assert!(intersection_targets(&scene).is_empty());
    }

    #[test]
    fn test_parallel_lines_produce_no_intersection() {
        let scene = vec![line(0.0, 0.0, 100.0, 0.0), line(0.0, 10.0, 100.0, 10.0)];
        assert!(intersection_targets(&scene).is_empty());
    }

    #[test]
    fn test_every_pair_is_checked_once() {
        let scene = vec![
            line(0.0, 50.0, 100.0, 50.0),
            line(20.0, 0.0, 20.0, 100.0),
            line(80.0, 0.0, 80.0, 100.0),
        ];
        let hits = intersection_targets(&scene);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|t| t.priority == 3));
    }

    #[test]
    fn test_corner_touch_is_an_intersection() {
        // Axis-aligned segments have zero-width bounds; the corner still counts.
        let scene = vec![line(0.0, 0.0, 100.0, 0.0), line(100.0, 0.0, 100.0, 50.0)];
        let hits = intersection_targets(&scene);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].point.distance(Point::new(100.0, 0.0)) < 1e-9);
    }

    #[test]
    fn test_radius_monotonic_in_zoom() {
        let base = 20.0;
        assert!(effective_snap_radius(base, 2.0) < effective_snap_radius(base, 1.0));
        assert!(effective_snap_radius(base, 1.0) < effective_snap_radius(base, 0.5));
    }

    #[test]
    fn test_resolve_disabled_or_empty() {
        let catalog = grid_targets(100.0, 100.0, 20.0);
        assert!(resolve(Point::new(21.0, 21.0), &catalog, 1.0, 20.0, false).is_none());
        assert!(resolve(Point::new(21.0, 21.0), &[], 1.0, 20.0, true).is_none());
    }

    #[test]
    fn test_resolve_outside_radius() {
        let catalog = vec![SnapTarget::new(Point::new(100.0, 100.0), SnapTargetKind::Endpoint, Some(0))];
        assert!(resolve(Point::ZERO, &catalog, 1.0, 20.0, true).is_none());
        // Zooming out widens the reach.
        assert!(resolve(Point::new(80.0, 100.0), &catalog, 0.5, 15.0, true).is_some());
    }

    #[test]
    fn test_closest_wins_over_priority() {
        let catalog = vec![
            SnapTarget::new(Point::new(10.0, 0.0), SnapTargetKind::Intersection, Some(0)),
            SnapTarget::new(Point::new(2.0, 0.0), SnapTargetKind::Grid, None),
        ];
        let result = resolve(Point::ZERO, &catalog, 1.0, 20.0, true).unwrap();
        assert_eq!(result.target.kind, SnapTargetKind::Grid);
        assert!((result.distance - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_priority_tie_break() {
        let midpoint = SnapTarget::new(Point::new(5.0, 0.0), SnapTargetKind::Midpoint, Some(0));
        let crossing = SnapTarget::new(Point::new(0.0, 5.05), SnapTargetKind::Intersection, Some(1));
        for catalog in [vec![midpoint, crossing], vec![crossing, midpoint]] {
            let result = resolve(Point::ZERO, &catalog, 1.0, 20.0, true).unwrap();
            assert_eq!(result.target.priority, 3);
            assert_eq!(result.snapped_point, crossing.point);
        }
    }

    #[test]
    fn test_end_to_end_intersection_snap() {
        let scene = vec![line(0.0, 0.0, 100.0, 0.0), line(50.0, -50.0, 50.0, 50.0)];
        let catalog = build_catalog(&scene, 200.0, 200.0, 50.0);

        let crossing = catalog
            .iter()
            .find(|t| t.kind == SnapTargetKind::Intersection)
            .unwrap();
        assert!((crossing.point.x - 50.0).abs() < 1e-9);
        assert!(crossing.point.y.abs() < 1e-9);
        assert_eq!(crossing.priority, 3);
        // A grid point sits on the same spot at a lower priority.
        assert!(catalog.iter().any(|t| t.kind == SnapTargetKind::Grid && t.point == Point::new(50.0, 0.0)));

        let query = Point::new(52.0, 2.0);
        let result = resolve(query, &catalog, 1.0, 20.0, true).unwrap();
        assert_eq!(result.target.kind, SnapTargetKind::Intersection);
        assert!((result.distance - 8.0_f64.sqrt()).abs() < 1e-6);
        assert_eq!(result.original_point, query);
    }

    #[test]
    fn test_snap_angle_table() {
        assert!((snap_angle(33.0) - 30.0).abs() < 1e-9);
        assert!((snap_angle(49.0) - 45.0).abs() < 1e-9);
        assert!((snap_angle(-2.0)).abs() < 1e-9);
        assert!((snap_angle(358.0)).abs() < 1e-9);
        assert!((snap_angle(20.0) - 20.0).abs() < 1e-9);
        assert!((snap_angle(-100.0) - 260.0).abs() < 1e-9);
    }

    #[test]
    fn test_snap_angle_idempotent() {
        let mut a = -725.0;
        while a < 725.0 {
            let once = snap_angle(a);
            assert_eq!(snap_angle(once), once, "not idempotent at {a}");
            a += 0.37;
        }
    }

    #[test]
    fn test_ruler_prefers_axes() {
        // 8° is outside the general 5° pull but inside the ruler's 10° axis pull.
        assert!((snap_ruler_angle(8.0)).abs() < 1e-9);
        assert!((snap_ruler_angle(98.0) - 90.0).abs() < 1e-9);
        assert!((snap_angle(8.0) - 8.0).abs() < 1e-9);
        // Away from the axes the general table still applies.
        assert!((snap_ruler_angle(133.0) - 135.0).abs() < 1e-9);
    }

    #[test]
    fn test_protractor_angle_both_directions() {
        assert_eq!(snap_protractor_angle(47.0), Some(45.0));
        assert_eq!(snap_protractor_angle(313.0), Some(315.0));
        assert_eq!(snap_protractor_angle(180.0), Some(180.0));
        assert_eq!(snap_protractor_angle(20.0), None);
        assert_eq!(snap_protractor_angle(0.0), None);
    }
}
