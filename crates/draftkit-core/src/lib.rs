//! Draftkit Core Library
//!
//! Snapping and instrument engine for a 2D drafting surface: a snap catalog
//! built from the grid and the drawing, a zoom-aware resolver, and the ruler,
//! compass, protractor and set square state machines.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod geometry;
pub mod input;
pub mod shapes;
pub mod snap;
pub mod tools;

pub use camera::Camera;
pub use canvas::{Canvas, CanvasDocument, ToolResponse};
pub use config::{CanvasConfig, ConfigError, ConfigResult};
pub use input::{Gesture, InputState, PointerEvent};
pub use shapes::{Angle, Circle, ElementRef, Freehand, Line, SceneElement, ShapeStyle};
pub use snap::{GRID_SIZE, SnapResult, SnapTarget, SnapTargetKind, build_catalog, resolve, snap_angle};
pub use tools::{ToolKind, ToolManager};
