//! Compass instrument.

use crate::shapes::{Circle, ShapeStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Smallest radius the compass draws.
pub const MIN_RADIUS: f64 = 5.0;

/// Compass state. Every transition returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum CompassTool {
    #[default]
    Hidden,
    /// Needle planted, no radius yet.
    Centered { center: Point },
    /// Pencil arm being opened.
    Radiusing { center: Point, radius: f64 },
}

impl CompassTool {
    /// Plant the needle at `center`.
    pub fn pointer_down(self, center: Point) -> Self {
        CompassTool::Centered { center }
    }

    /// Open the arm to `point`, never below `min_radius`.
    pub fn pointer_move(self, point: Point, min_radius: f64) -> Self {
        match self {
            CompassTool::Hidden => self,
            CompassTool::Centered { center } | CompassTool::Radiusing { center, .. } => {
                CompassTool::Radiusing {
                    center,
                    radius: center.distance(point).max(min_radius),
                }
            }
        }
    }

    /// Finish the gesture, committing a circle once a radius exists.
    pub fn pointer_up(self, style: &ShapeStyle) -> (Self, Option<Circle>) {
        let circle = match self {
            CompassTool::Radiusing { center, radius } if radius > 0.0 => {
                Some(Circle::with_style(center, radius, style.clone()))
            }
            _ => None,
        };
        (CompassTool::Hidden, circle)
    }

    pub fn center(&self) -> Option<Point> {
        match self {
            CompassTool::Hidden => None,
            CompassTool::Centered { center } | CompassTool::Radiusing { center, .. } => Some(*center),
        }
    }

    pub fn radius(&self) -> f64 {
        match self {
            CompassTool::Radiusing { radius, .. } => *radius,
            _ => 0.0,
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, CompassTool::Hidden)
    }
}
