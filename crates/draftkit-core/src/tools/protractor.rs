//! Protractor instrument: two rays from a shared vertex with angle capture.

use crate::geometry::{angle_between_rays, direction_degrees, unit_vector};
use crate::shapes::{Line, ShapeStyle};
use crate::snap::snap_protractor_angle;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// How far the raw pointer may sit from the snapped second endpoint before
/// the snap is overridden.
pub const OVERRIDE_DISTANCE: f64 = 20.0;

/// Interaction phase of the protractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum ProtractorPhase {
    #[default]
    Empty,
    FirstLineActive,
    FirstLineComplete,
    SecondLineActive,
    BothComplete,
}

/// Where the second ray's endpoint lands for a raw pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondRayPlacement {
    pub point: Point,
    /// Whether the point was pulled onto a common angle.
    pub snapped: bool,
}

/// Place the second ray's endpoint, snapping its angle with override.
///
/// The nearest protractor angle (either rotation direction) gives a snapped
/// position at the raw ray's length. Within `override_distance` of it the
/// snapped position is used; farther away the raw point is kept, letting the
/// user hold an off-angle ray deliberately.
pub fn place_second_endpoint(
    vertex: Point,
    first_endpoint: Point,
    raw: Point,
    override_distance: f64,
) -> SecondRayPlacement {
    let unsnapped = SecondRayPlacement {
        point: raw,
        snapped: false,
    };
    let length = vertex.distance(raw);
    if length < f64::EPSILON || vertex.distance(first_endpoint) < f64::EPSILON {
        return unsnapped;
    }

    let first_direction = direction_degrees(vertex, first_endpoint);
    let relative = direction_degrees(vertex, raw) - first_direction;
    let Some(snapped_relative) = snap_protractor_angle(relative) else {
        return unsnapped;
    };

    let candidate = vertex + unit_vector(first_direction + snapped_relative) * length;
    if raw.distance(candidate) <= override_distance {
        SecondRayPlacement {
            point: candidate,
            snapped: true,
        }
    } else {
        unsnapped
    }
}

/// Protractor state. Every transition returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProtractorTool {
    pub phase: ProtractorPhase,
    pub vertex: Point,
    pub first_endpoint: Point,
    pub second_endpoint: Point,
}

impl ProtractorTool {
    /// Opening between the two rays in degrees, in `[0, 180]`.
    ///
    /// Always derived from the current endpoints.
    pub fn angle(&self) -> f64 {
        angle_between_rays(self.vertex, self.first_endpoint, self.second_endpoint)
    }

    pub fn first_line_complete(&self) -> bool {
        self.phase >= ProtractorPhase::FirstLineComplete
    }

    pub fn is_empty(&self) -> bool {
        self.phase == ProtractorPhase::Empty
    }

    /// Start a measurement at `vertex`; both rays begin with zero length.
    pub fn with_vertex(self, vertex: Point) -> Self {
        Self {
            phase: ProtractorPhase::FirstLineActive,
            vertex,
            first_endpoint: vertex,
            second_endpoint: vertex,
        }
    }

    pub fn with_first_endpoint(self, first_endpoint: Point) -> Self {
        Self {
            first_endpoint,
            ..self
        }
    }

    /// Lock the first ray. A zero-length ray cancels the measurement.
    pub fn with_first_line_complete(self) -> Self {
        if self.first_endpoint == self.vertex {
            return Self::default();
        }
        Self {
            phase: ProtractorPhase::FirstLineComplete,
            ..self
        }
    }

    /// Move the second ray's endpoint toward `raw`, applying angle snapping
    /// with override.
    pub fn with_second_endpoint(self, raw: Point, override_distance: f64) -> (Self, bool) {
        let placement = place_second_endpoint(self.vertex, self.first_endpoint, raw, override_distance);
        let next = Self {
            phase: ProtractorPhase::SecondLineActive,
            second_endpoint: placement.point,
            ..self
        };
        (next, placement.snapped)
    }

    pub fn with_both_complete(self) -> Self {
        Self {
            phase: ProtractorPhase::BothComplete,
            ..self
        }
    }

    /// Emit both rays as lines and reset, if the measurement is complete.
    pub fn commit(self, style: &ShapeStyle) -> (Self, Vec<Line>) {
        if self.phase != ProtractorPhase::BothComplete {
            return (self, Vec::new());
        }
        let lines = vec![
            Line::with_style(self.vertex, self.first_endpoint, style.clone()),
            Line::with_style(self.vertex, self.second_endpoint, style.clone()),
        ];
        (Self::default(), lines)
    }

    /// Called when another tool is selected: commits a complete measurement,
    /// discards anything in progress.
    pub fn flush(self, style: &ShapeStyle) -> (Self, Vec<Line>) {
        match self.phase {
            ProtractorPhase::BothComplete => self.commit(style),
            _ => (Self::default(), Vec::new()),
        }
    }

    /// Start a gesture. Returns the new state and whether an angle snap fired.
    pub fn pointer_down(self, point: Point, override_distance: f64) -> (Self, bool) {
        match self.phase {
            ProtractorPhase::Empty | ProtractorPhase::BothComplete => (self.with_vertex(point), false),
            ProtractorPhase::FirstLineComplete => self.with_second_endpoint(point, override_distance),
            ProtractorPhase::FirstLineActive | ProtractorPhase::SecondLineActive => (self, false),
        }
    }

    /// Continue a gesture. Returns the new state and whether an angle snap fired.
    pub fn pointer_move(self, point: Point, override_distance: f64) -> (Self, bool) {
        match self.phase {
            ProtractorPhase::FirstLineActive => (self.with_first_endpoint(point), false),
            ProtractorPhase::SecondLineActive => self.with_second_endpoint(point, override_distance),
            _ => (self, false),
        }
    }

    /// Finish a gesture, committing both rays once the second is drawn.
    pub fn pointer_up(self, style: &ShapeStyle) -> (Self, Vec<Line>) {
        match self.phase {
            ProtractorPhase::FirstLineActive => (self.with_first_line_complete(), Vec::new()),
            ProtractorPhase::SecondLineActive => self.with_both_complete().commit(style),
            _ => (self, Vec::new()),
        }
    }
}
