//! Circle element.

use super::{ElementId, ShapeStyle, ShapeTrait};
use kurbo::{Circle as KurboCircle, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A full circle outline, as drawn by the compass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ElementId,
    /// Center point.
    pub center: Point,
    /// Radius.
    pub radius: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Circle {
    /// Create a new circle with the default style.
    pub fn new(center: Point, radius: f64) -> Self {
        Self::with_style(center, radius, ShapeStyle::default())
    }

    /// Create a new circle with an explicit style.
    pub fn with_style(center: Point, radius: f64, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            style,
        }
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.center, self.radius)
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }
}
