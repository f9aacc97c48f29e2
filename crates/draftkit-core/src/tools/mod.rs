//! Drafting instruments and the manager that routes gestures to them.

pub mod compass;
pub mod protractor;
pub mod ruler;
pub mod set_square;

pub use compass::CompassTool;
pub use protractor::{ProtractorPhase, ProtractorTool};
pub use ruler::{RulerPhase, RulerTool};
pub use set_square::{SetSquarePhase, SetSquareTool, SetSquareVariant};

use crate::config::CanvasConfig;
use crate::input::Gesture;
use crate::shapes::{SceneElement, ShapeStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    /// No instrument; pointer events only produce snap feedback.
    #[default]
    None,
    Ruler,
    Compass,
    Protractor,
    SetSquare,
}

/// What a tool produced for one pointer event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolOutput {
    /// An angle snap fired during this event.
    pub angle_snapped: bool,
    /// Elements to append to the scene.
    pub committed: Vec<SceneElement>,
}

impl ToolOutput {
    fn snapped(angle_snapped: bool) -> Self {
        Self {
            angle_snapped,
            committed: Vec::new(),
        }
    }

    fn committed(committed: Vec<SceneElement>) -> Self {
        Self {
            angle_snapped: false,
            committed,
        }
    }
}

/// Manages the current tool and the state of every instrument.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    pub ruler: RulerTool,
    pub compass: CompassTool,
    pub protractor: ProtractorTool,
    pub set_square: SetSquareTool,
    /// Current style to apply to committed elements.
    pub current_style: ShapeStyle,
    /// Smallest radius the compass draws.
    pub compass_min_radius: f64,
    /// Protractor snap override distance.
    pub protractor_override_distance: f64,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::from_config(&CanvasConfig::default())
    }
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tool manager with instrument settings taken from `config`.
    pub fn from_config(config: &CanvasConfig) -> Self {
        Self {
            current_tool: ToolKind::default(),
            ruler: RulerTool::new(config.ruler_length),
            compass: CompassTool::default(),
            protractor: ProtractorTool::default(),
            set_square: SetSquareTool::new(config.set_square_size),
            current_style: ShapeStyle::default(),
            compass_min_radius: config.compass_min_radius,
            protractor_override_distance: config.protractor_override_distance,
        }
    }

    /// Set the current tool.
    ///
    /// Leaving the ruler or compass discards it. Leaving the protractor
    /// commits a finished measurement and discards anything else. The set
    /// square stays where it is. Returns whatever was committed.
    pub fn set_tool(&mut self, tool: ToolKind) -> Vec<SceneElement> {
        if tool == self.current_tool {
            return Vec::new();
        }
        log::debug!("Tool {:?} -> {:?}", self.current_tool, tool);

        let committed = match self.current_tool {
            ToolKind::Ruler => {
                self.ruler = self.ruler.hidden();
                Vec::new()
            }
            ToolKind::Compass => {
                self.compass = CompassTool::Hidden;
                Vec::new()
            }
            ToolKind::Protractor => {
                let (protractor, lines) = self.protractor.flush(&self.current_style);
                self.protractor = protractor;
                lines.into_iter().map(SceneElement::Line).collect()
            }
            ToolKind::SetSquare | ToolKind::None => Vec::new(),
        };
        self.current_tool = tool;
        committed
    }

    /// Begin an interaction at an already snapped point.
    pub fn begin(&mut self, point: Point) -> ToolOutput {
        match self.current_tool {
            ToolKind::None => ToolOutput::default(),
            ToolKind::Ruler => {
                let next = self.ruler.pointer_down(point);
                if next.phase != self.ruler.phase {
                    log::debug!("Ruler {:?} -> {:?}", self.ruler.phase, next.phase);
                }
                self.ruler = next;
                ToolOutput::default()
            }
            ToolKind::Compass => {
                self.compass = self.compass.pointer_down(point);
                log::debug!("Compass centered at ({:.1}, {:.1})", point.x, point.y);
                ToolOutput::default()
            }
            ToolKind::Protractor => {
                let (next, snapped) = self
                    .protractor
                    .pointer_down(point, self.protractor_override_distance);
                if next.phase != self.protractor.phase {
                    log::debug!("Protractor {:?} -> {:?}", self.protractor.phase, next.phase);
                }
                self.protractor = next;
                ToolOutput::snapped(snapped)
            }
            ToolKind::SetSquare => {
                let next = self.set_square.pointer_down(point);
                if next.phase != self.set_square.phase {
                    log::debug!("Set square {:?} -> {:?}", self.set_square.phase, next.phase);
                }
                self.set_square = next;
                ToolOutput::default()
            }
        }
    }

    /// Update the current interaction.
    pub fn update(&mut self, point: Point) -> ToolOutput {
        match self.current_tool {
            ToolKind::None => ToolOutput::default(),
            ToolKind::Ruler => {
                self.ruler = self.ruler.pointer_move(point);
                ToolOutput::default()
            }
            ToolKind::Compass => {
                self.compass = self.compass.pointer_move(point, self.compass_min_radius);
                ToolOutput::default()
            }
            ToolKind::Protractor => {
                let (next, snapped) = self
                    .protractor
                    .pointer_move(point, self.protractor_override_distance);
                self.protractor = next;
                ToolOutput::snapped(snapped)
            }
            ToolKind::SetSquare => {
                self.set_square = self.set_square.pointer_move(point);
                ToolOutput::default()
            }
        }
    }

    /// End the current interaction and return any committed elements.
    pub fn end(&mut self, point: Point, gesture: Gesture) -> ToolOutput {
        let style = &self.current_style;
        match self.current_tool {
            ToolKind::None => ToolOutput::default(),
            ToolKind::Ruler => {
                let (ruler, line) = self.ruler.pointer_up(style);
                self.ruler = ruler;
                ToolOutput::committed(line.into_iter().map(SceneElement::Line).collect())
            }
            ToolKind::Compass => {
                let (compass, circle) = self.compass.pointer_up(style);
                self.compass = compass;
                ToolOutput::committed(circle.into_iter().map(SceneElement::Circle).collect())
            }
            ToolKind::Protractor => {
                let (protractor, lines) = self.protractor.pointer_up(style);
                if protractor.phase != self.protractor.phase {
                    log::debug!("Protractor {:?} -> {:?}", self.protractor.phase, protractor.phase);
                }
                self.protractor = protractor;
                ToolOutput::committed(lines.into_iter().map(SceneElement::Line).collect())
            }
            ToolKind::SetSquare => {
                let next = self.set_square.pointer_up(point, gesture);
                if next.variant != self.set_square.variant {
                    log::debug!("Set square variant {:?}", next.variant);
                }
                self.set_square = next;
                ToolOutput::default()
            }
        }
    }

    /// Abandon the current interaction without committing.
    pub fn cancel(&mut self) {
        match self.current_tool {
            ToolKind::None => {}
            ToolKind::Ruler => self.ruler = self.ruler.hidden(),
            ToolKind::Compass => self.compass = CompassTool::Hidden,
            ToolKind::Protractor => self.protractor = ProtractorTool::default(),
            ToolKind::SetSquare => {
                if self.set_square.is_visible() {
                    self.set_square.phase = SetSquarePhase::Placed;
                }
            }
        }
    }

    /// Check if the active instrument is mid-gesture or otherwise on screen.
    pub fn is_active(&self) -> bool {
        match self.current_tool {
            ToolKind::None => false,
            ToolKind::Ruler => self.ruler.is_visible(),
            ToolKind::Compass => self.compass.is_visible(),
            ToolKind::Protractor => !self.protractor.is_empty(),
            ToolKind::SetSquare => self.set_square.is_visible(),
        }
    }
}
