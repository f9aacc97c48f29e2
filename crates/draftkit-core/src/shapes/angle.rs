//! Angle annotation element.

use super::{ElementId, ShapeStyle, ShapeTrait};
use crate::geometry::angle_between_rays;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An angle annotation made of two rays sharing a vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    pub(crate) id: ElementId,
    /// Shared vertex of both rays.
    pub vertex: Point,
    /// End of the first ray.
    pub first_endpoint: Point,
    /// End of the second ray.
    pub second_endpoint: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Angle {
    /// Create a new angle annotation.
    pub fn new(vertex: Point, first_endpoint: Point, second_endpoint: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            vertex,
            first_endpoint,
            second_endpoint,
            style: ShapeStyle::default(),
        }
    }

    /// Opening of the angle in degrees, in `[0, 180]`.
    pub fn degrees(&self) -> f64 {
        angle_between_rays(self.vertex, self.first_endpoint, self.second_endpoint)
    }
}

impl ShapeTrait for Angle {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.vertex, self.first_endpoint).union_pt(self.second_endpoint)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }
}
