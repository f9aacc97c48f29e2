//! Scene element definitions for the drafting surface.

mod angle;
mod circle;
mod freehand;
mod line;

pub use angle::Angle;
pub use circle::Circle;
pub use freehand::Freehand;
pub use line::Line;

use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Stroke pattern for committed outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Style properties applied to committed elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
    /// Stroke pattern.
    #[serde(default)]
    pub stroke_style: StrokeStyle,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 2.0,
            stroke_style: StrokeStyle::default(),
            opacity: 1.0,
        }
    }
}

/// Unique identifier for scene elements.
pub type ElementId = Uuid;

/// Non-owning handle to an element: its index in the scene slice a
/// catalog was built from.
pub type ElementRef = usize;

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    point.distance(proj)
}

/// Common trait for all scene elements.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ElementId;

    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;
}

/// A committed piece of the drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneElement {
    Line(Line),
    Freehand(Freehand),
    Circle(Circle),
    Angle(Angle),
}

impl SceneElement {
    pub fn id(&self) -> ElementId {
        match self {
            SceneElement::Line(s) => s.id(),
            SceneElement::Freehand(s) => s.id(),
            SceneElement::Circle(s) => s.id(),
            SceneElement::Angle(s) => s.id(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            SceneElement::Line(s) => s.bounds(),
            SceneElement::Freehand(s) => s.bounds(),
            SceneElement::Circle(s) => s.bounds(),
            SceneElement::Angle(s) => s.bounds(),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            SceneElement::Line(s) => s.style(),
            SceneElement::Freehand(s) => s.style(),
            SceneElement::Circle(s) => s.style(),
            SceneElement::Angle(s) => s.style(),
        }
    }

    /// Get the line if this element is a line.
    pub fn as_line(&self) -> Option<&Line> {
        match self {
            SceneElement::Line(l) => Some(l),
            _ => None,
        }
    }

    /// Get the circle if this element is a circle.
    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            SceneElement::Circle(c) => Some(c),
            _ => None,
        }
    }

    /// Short lowercase name of the element kind, used in log output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SceneElement::Line(_) => "line",
            SceneElement::Freehand(_) => "freehand",
            SceneElement::Circle(_) => "circle",
            SceneElement::Angle(_) => "angle",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_to_segment_dist_projection() {
        let d = point_to_segment_dist(Point::new(50.0, 10.0), Point::ZERO, Point::new(100.0, 0.0));
        assert!((d - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_to_segment_dist_clamped_to_end() {
        let d = point_to_segment_dist(Point::new(103.0, 4.0), Point::ZERO, Point::new(100.0, 0.0));
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_to_segment_dist_degenerate() {
        let p = Point::new(3.0, 4.0);
        let d = point_to_segment_dist(p, Point::ZERO, Point::ZERO);
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_color_roundtrip_through_peniko() {
        let color = SerializableColor::from(Color::from_rgba8(10, 20, 30, 255));
        assert_eq!(color, SerializableColor::new(10, 20, 30, 255));
        assert_eq!(Color::from(color), Color::from_rgba8(10, 20, 30, 255));
    }

    #[test]
    fn test_element_dispatch() {
        let line = SceneElement::Line(Line::new(Point::ZERO, Point::new(10.0, 0.0)));
        assert!(line.as_line().is_some());
        assert!(line.as_circle().is_none());
        assert_eq!(line.kind_name(), "line");
    }
}
