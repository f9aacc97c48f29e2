//! Ruler instrument.

use super::hit_test::near_point;
use crate::geometry::{angle_difference, direction_degrees, unit_vector};
use crate::input::TAP_SLOP;
use crate::shapes::{Line, ShapeStyle, point_to_segment_dist};
use crate::snap::snap_ruler_angle;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Length of a freshly configured ruler.
pub const DEFAULT_LENGTH: f64 = 300.0;

/// Grab distance around either end for rotating.
pub const HANDLE_TOLERANCE: f64 = 40.0;

/// Grab distance around the body for dragging.
pub const BODY_TOLERANCE: f64 = 20.0;

/// Snaps that move the angle by less than this leave the endpoints alone.
const MIN_SNAP_CHANGE: f64 = 0.1;

/// Interaction phase of the ruler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RulerPhase {
    #[default]
    Hidden,
    /// On the canvas, not being manipulated.
    Placed,
    /// Being translated by the pointer.
    Dragging,
    /// One end follows the pointer around the center.
    Rotating,
}

/// Which end of the ruler the pointer holds while rotating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RulerEnd {
    Start,
    #[default]
    End,
}

/// Ruler state. Every transition returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RulerTool {
    pub phase: RulerPhase,
    pub start: Point,
    pub end: Point,
    /// Fixed length, kept through every angle snap.
    pub length: f64,
    /// Pointer position at the last gesture step.
    pub anchor: Point,
    /// End held while rotating.
    pub grabbed: RulerEnd,
}

impl Default for RulerTool {
    fn default() -> Self {
        Self::new(DEFAULT_LENGTH)
    }
}

impl RulerTool {
    /// A hidden ruler of the given length.
    pub fn new(length: f64) -> Self {
        Self {
            phase: RulerPhase::Hidden,
            start: Point::ZERO,
            end: Point::ZERO,
            length,
            anchor: Point::ZERO,
            grabbed: RulerEnd::End,
        }
    }

    /// Check if the ruler is on the canvas.
    pub fn is_visible(&self) -> bool {
        self.phase != RulerPhase::Hidden
    }

    /// Orientation in degrees, in `[0, 360)`.
    pub fn angle(&self) -> f64 {
        direction_degrees(self.start, self.end)
    }

    pub fn center(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Place horizontally, centered on `center`.
    pub fn placed(self, center: Point) -> Self {
        let half = Vec2::new(self.length / 2.0, 0.0);
        Self {
            phase: RulerPhase::Placed,
            start: center - half,
            end: center + half,
            anchor: center,
            ..self
        }
    }

    /// Hide the ruler, keeping its length.
    pub fn hidden(self) -> Self {
        Self::new(self.length)
    }

    /// Move the endpoints, snapping the orientation.
    ///
    /// When the snap changes the angle by more than 0.1°, both endpoints are
    /// recentered around the midpoint at the snapped angle and the fixed
    /// length.
    pub fn with_position(self, start: Point, end: Point) -> Self {
        let raw = direction_degrees(start, end);
        let snapped = snap_ruler_angle(raw);
        if angle_difference(raw, snapped) <= MIN_SNAP_CHANGE {
            return Self { start, end, ..self };
        }

        let center = start.midpoint(end);
        let half = unit_vector(snapped) * (self.length / 2.0);
        Self {
            start: center - half,
            end: center + half,
            ..self
        }
    }

    /// Translate both endpoints; angle and length are unchanged.
    pub fn translated(self, delta: Vec2) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
            ..self
        }
    }

    /// Swing the grabbed end toward `pointer` about the center.
    pub fn rotated_toward(self, pointer: Point) -> Self {
        let center = self.center();
        let dir = pointer - center;
        if dir.hypot() < f64::EPSILON {
            return self;
        }
        let half = dir.normalize() * (self.length / 2.0);
        let (start, end) = match self.grabbed {
            RulerEnd::End => (center - half, center + half),
            RulerEnd::Start => (center + half, center - half),
        };
        self.with_position(start, end)
    }

    /// Start a gesture at `point`.
    pub fn pointer_down(self, point: Point) -> Self {
        match self.phase {
            RulerPhase::Hidden => self.placed(point),
            RulerPhase::Placed | RulerPhase::Dragging | RulerPhase::Rotating => {
                if near_point(point, self.end, HANDLE_TOLERANCE) {
                    self.grab_end(RulerEnd::End, point)
                } else if near_point(point, self.start, HANDLE_TOLERANCE) {
                    self.grab_end(RulerEnd::Start, point)
                } else if point_to_segment_dist(point, self.start, self.end) <= BODY_TOLERANCE {
                    Self {
                        phase: RulerPhase::Dragging,
                        anchor: point,
                        ..self
                    }
                } else {
                    self.placed(point)
                }
            }
        }
    }

    fn grab_end(self, grabbed: RulerEnd, point: Point) -> Self {
        Self {
            phase: RulerPhase::Rotating,
            grabbed,
            anchor: point,
            ..self
        }
    }

    /// Continue a gesture.
    pub fn pointer_move(self, point: Point) -> Self {
        match self.phase {
            RulerPhase::Hidden => self,
            // A fresh placement turns into a rotation once the pointer leaves
            // the tap slop.
            RulerPhase::Placed => {
                if near_point(point, self.anchor, TAP_SLOP) {
                    self
                } else {
                    Self {
                        phase: RulerPhase::Rotating,
                        grabbed: RulerEnd::End,
                        anchor: point,
                        ..self
                    }
                    .rotated_toward(point)
                }
            }
            RulerPhase::Dragging => {
                let delta = point - self.anchor;
                Self {
                    anchor: point,
                    ..self.translated(delta)
                }
            }
            RulerPhase::Rotating => Self {
                anchor: point,
                ..self.rotated_toward(point)
            },
        }
    }

    /// Finish a gesture.
    ///
    /// A drag or rotation commits the current segment and hides the ruler. A
    /// tap placement leaves the ruler placed.
    pub fn pointer_up(self, style: &ShapeStyle) -> (Self, Option<Line>) {
        match self.phase {
            RulerPhase::Dragging | RulerPhase::Rotating => {
                let line = Line::with_style(self.start, self.end, style.clone());
                (self.hidden(), Some(line))
            }
            RulerPhase::Hidden | RulerPhase::Placed => (self, None),
        }
    }
}
