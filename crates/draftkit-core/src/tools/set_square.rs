//! Set square instrument: a triangular overlay that can be moved, resized,
//! rotated and switched between its two classic shapes.

use super::hit_test;
use crate::geometry::{direction_degrees, normalize_degrees};
use crate::input::Gesture;
use crate::snap::snap_angle;
use kurbo::{Affine, Point};
use serde::{Deserialize, Serialize};

/// Size of a freshly placed set square.
pub const DEFAULT_SIZE: f64 = 200.0;
/// Smallest size reachable by resizing.
pub const MIN_SIZE: f64 = 50.0;
/// Largest size reachable by resizing.
pub const MAX_SIZE: f64 = 300.0;
/// Grab distance around a vertex.
pub const VERTEX_THRESHOLD: f64 = 40.0;
/// Grab distance around an edge for rotating.
pub const EDGE_THRESHOLD: f64 = 15.0;
/// Radius of the variant toggle at the center.
pub const CONTROL_RADIUS: f64 = 30.0;

/// The two triangle shapes a set square can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SetSquareVariant {
    /// 45°-45°-90°.
    #[default]
    FortyFive,
    /// 30°-60°-90°.
    ThirtySixty,
}

impl SetSquareVariant {
    pub fn toggled(self) -> Self {
        match self {
            SetSquareVariant::FortyFive => SetSquareVariant::ThirtySixty,
            SetSquareVariant::ThirtySixty => SetSquareVariant::FortyFive,
        }
    }
}

/// Interaction phase of the set square.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum SetSquarePhase {
    #[default]
    Hidden,
    /// Just put down by the press that is still held.
    Placing,
    Placed,
    /// A vertex is being pulled; the whole shape scales about its center.
    Resizing {
        vertex: usize,
        /// Distance from the center to the grabbed vertex at grab time.
        grab_distance: f64,
        /// Size at grab time.
        start_size: f64,
    },
    /// The center follows the pointer.
    Dragging,
    /// An edge is being swung around the center.
    Rotating { grab_angle: f64, start_angle: f64 },
}

/// Triangle vertices for the given parameters, in canvas coordinates.
///
/// The shape is laid out around the origin, then rotated by `angle` degrees
/// and moved to `center`.
pub fn vertices_for(center: Point, size: f64, angle: f64, variant: SetSquareVariant) -> [Point; 3] {
    let local = match variant {
        SetSquareVariant::FortyFive => {
            // Right angle at the apex, hypotenuse as the base.
            let h = size / 2.0;
            [
                Point::new(0.0, -h / 2.0),
                Point::new(-h, h / 2.0),
                Point::new(h, h / 2.0),
            ]
        }
        SetSquareVariant::ThirtySixty => {
            // Right angle bottom-left, 30° at the top, 60° bottom-right;
            // laid out around the centroid.
            let b = size / 2.0;
            let height = b * 3f64.sqrt();
            [
                Point::new(-b / 3.0, -2.0 * height / 3.0),
                Point::new(-b / 3.0, height / 3.0),
                Point::new(2.0 * b / 3.0, height / 3.0),
            ]
        }
    };
    let transform = Affine::translate(center.to_vec2()) * Affine::rotate(angle.to_radians());
    local.map(|p| transform * p)
}

/// Set square state. Every transition returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetSquareTool {
    pub phase: SetSquarePhase,
    pub center: Point,
    pub size: f64,
    /// Rotation in degrees.
    pub angle: f64,
    pub variant: SetSquareVariant,
}

impl Default for SetSquareTool {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

impl SetSquareTool {
    /// A hidden set square that will appear at `size`.
    pub fn new(size: f64) -> Self {
        Self {
            phase: SetSquarePhase::Hidden,
            center: Point::ZERO,
            size: size.clamp(MIN_SIZE, MAX_SIZE),
            angle: 0.0,
            variant: SetSquareVariant::default(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.phase != SetSquarePhase::Hidden
    }

    /// Current vertices, derived from center, size, angle and variant.
    pub fn vertices(&self) -> [Point; 3] {
        vertices_for(self.center, self.size, self.angle, self.variant)
    }

    pub fn near_vertex(&self, point: Point, threshold: f64) -> Option<usize> {
        hit_test::near_vertex(&self.vertices(), point, threshold)
    }

    pub fn near_edge(&self, point: Point, threshold: f64) -> Option<usize> {
        hit_test::near_edge(&self.vertices(), point, threshold)
    }

    pub fn contains(&self, point: Point) -> bool {
        hit_test::inside_triangle(&self.vertices(), point)
    }

    /// Check if `point` is on the variant toggle.
    pub fn on_control(&self, point: Point) -> bool {
        hit_test::near_point(point, self.center, CONTROL_RADIUS)
    }

    pub fn placed(self, center: Point) -> Self {
        Self {
            phase: SetSquarePhase::Placed,
            center,
            ..self
        }
    }

    pub fn hidden(self) -> Self {
        Self {
            phase: SetSquarePhase::Hidden,
            ..self
        }
    }

    pub fn with_center(self, center: Point) -> Self {
        Self { center, ..self }
    }

    /// Rotate to `angle` degrees, snapped to the common-angle table.
    pub fn with_rotation(self, angle: f64) -> Self {
        Self {
            angle: snap_angle(angle),
            ..self
        }
    }

    pub fn with_variant_toggled(self) -> Self {
        Self {
            variant: self.variant.toggled(),
            ..self
        }
    }

    /// Scale uniformly about the center.
    ///
    /// The factor is `distance(center, point) / grab_distance`, applied to
    /// `start_size` and clamped to `[MIN_SIZE, MAX_SIZE]`. Which vertex was
    /// grabbed does not matter: the triangle keeps its angles.
    pub fn with_resize(self, point: Point, grab_distance: f64, start_size: f64) -> Self {
        if grab_distance < f64::EPSILON {
            return self;
        }
        let scale = self.center.distance(point) / grab_distance;
        Self {
            size: (start_size * scale).clamp(MIN_SIZE, MAX_SIZE),
            ..self
        }
    }

    /// Start a gesture at `point`.
    pub fn pointer_down(self, point: Point) -> Self {
        match self.phase {
            SetSquarePhase::Hidden => Self {
                phase: SetSquarePhase::Placing,
                center: point,
                ..self
            },
            _ => {
                let vertices = self.vertices();
                // The control disc wins over a vertex sitting inside it.
                let phase = if self.on_control(point) {
                    SetSquarePhase::Dragging
                } else if let Some(vertex) = hit_test::near_vertex(&vertices, point, VERTEX_THRESHOLD) {
                    SetSquarePhase::Resizing {
                        vertex,
                        grab_distance: self.center.distance(vertices[vertex]),
                        start_size: self.size,
                    }
                } else if hit_test::near_edge(&vertices, point, EDGE_THRESHOLD).is_some() {
                    SetSquarePhase::Rotating {
                        grab_angle: direction_degrees(self.center, point),
                        start_angle: self.angle,
                    }
                } else if hit_test::inside_triangle(&vertices, point) {
                    SetSquarePhase::Dragging
                } else {
                    SetSquarePhase::Placed
                };
                Self { phase, ..self }
            }
        }
    }

    /// Continue a gesture.
    pub fn pointer_move(self, point: Point) -> Self {
        match self.phase {
            SetSquarePhase::Resizing {
                grab_distance,
                start_size,
                ..
            } => self.with_resize(point, grab_distance, start_size),
            SetSquarePhase::Placing => self.with_center(point),
            SetSquarePhase::Dragging if self.contains(point) => self.with_center(point),
            SetSquarePhase::Rotating {
                grab_angle,
                start_angle,
            } => {
                let turned = direction_degrees(self.center, point) - grab_angle;
                self.with_rotation(normalize_degrees(start_angle + turned))
            }
            _ => self,
        }
    }

    /// Finish a gesture, applying tap and long-press behaviour.
    pub fn pointer_up(self, point: Point, gesture: Gesture) -> Self {
        if !self.is_visible() {
            return self;
        }
        let settled = Self {
            phase: SetSquarePhase::Placed,
            ..self
        };
        if self.phase == SetSquarePhase::Placing {
            return settled;
        }
        match gesture {
            Gesture::Drag => settled,
            Gesture::LongPress if settled.contains(point) => settled.hidden(),
            Gesture::LongPress => settled,
            Gesture::Tap => settled.tap(point),
        }
    }

    fn tap(self, point: Point) -> Self {
        if self.on_control(point) {
            self.with_variant_toggled()
        } else if self.near_vertex(point, VERTEX_THRESHOLD).is_some() {
            self
        } else if self.contains(point) {
            self.with_center(point)
        } else {
            self
        }
    }
}
