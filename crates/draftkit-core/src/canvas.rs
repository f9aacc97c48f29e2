//! Canvas document and drafting session.

use crate::camera::Camera;
use crate::config::{CanvasConfig, ConfigError, ConfigResult};
use crate::input::{InputState, PointerEvent};
use crate::shapes::{ElementRef, SceneElement};
use crate::snap::{self, SnapResult, SnapTarget};
use crate::tools::{ToolKind, ToolManager, ToolOutput};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;

/// The committed drawing. Elements are only ever appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasDocument {
    /// Unique document identifier.
    pub id: String,
    /// Document name.
    pub name: String,
    /// Elements in commit order; an [`ElementRef`] indexes into this.
    pub elements: Vec<SceneElement>,
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            elements: Vec::new(),
        }
    }

    /// Append an element and return its handle.
    pub fn add_element(&mut self, element: SceneElement) -> ElementRef {
        self.elements.push(element);
        self.elements.len() - 1
    }

    pub fn get(&self, element: ElementRef) -> Option<&SceneElement> {
        self.elements.get(element)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Outcome of one pointer event.
#[derive(Debug, Clone, Default)]
pub struct ToolResponse {
    /// Snap feedback for this event, if the pointer was pulled to a target.
    pub snap: Option<SnapResult>,
    /// The active instrument snapped an angle.
    pub angle_snapped: bool,
    /// Elements appended to the document by this event.
    pub committed: Vec<SceneElement>,
}

/// A drafting session: document, instruments, zoom and snap settings.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The document being edited.
    pub document: CanvasDocument,
    /// Camera for zoom-adaptive snapping.
    pub camera: Camera,
    /// Tool manager.
    pub tool_manager: ToolManager,
    config: CanvasConfig,
    input: InputState,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::from_valid_config(CanvasConfig::default())
    }
}

impl Canvas {
    /// Create a new canvas with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a canvas from a configuration, validating it first.
    pub fn with_config(config: CanvasConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: CanvasConfig) -> Self {
        Self {
            document: CanvasDocument::new(),
            camera: Camera::new(),
            tool_manager: ToolManager::from_config(&config),
            config,
            input: InputState::new(),
        }
    }

    /// Current settings.
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn elements(&self) -> &[SceneElement] {
        &self.document.elements
    }

    /// Append an element that did not come from an instrument.
    pub fn add_element(&mut self, element: SceneElement) -> ElementRef {
        self.document.add_element(element)
    }

    /// Snap targets for the current document and grid.
    pub fn catalog(&self) -> Vec<SnapTarget> {
        snap::build_catalog(
            &self.document.elements,
            self.config.canvas_width,
            self.config.canvas_height,
            self.config.grid_spacing,
        )
    }

    /// Resolve `point` against a fresh catalog.
    pub fn snap_point(&self, point: Point) -> Option<SnapResult> {
        snap::resolve(
            point,
            &self.catalog(),
            self.camera.zoom,
            self.config.snap_radius,
            self.config.snap_enabled,
        )
    }

    pub fn pointer_down(&mut self, point: Point) -> ToolResponse {
        self.pointer_down_at(point, Instant::now())
    }

    pub fn pointer_move(&mut self, point: Point) -> ToolResponse {
        self.pointer_move_at(point, Instant::now())
    }

    pub fn pointer_up(&mut self, point: Point) -> ToolResponse {
        self.pointer_up_at(point, Instant::now())
    }

    /// Start a press at `point`.
    pub fn pointer_down_at(&mut self, point: Point, now: Instant) -> ToolResponse {
        self.input
            .handle_pointer_event_at(PointerEvent::Down { position: point }, now);
        let snap = self.snap_point(point);
        let output = self.tool_manager.begin(snapped(point, snap));
        self.respond(snap, output)
    }

    /// Pointer motion. Instruments only see it while the pointer is pressed;
    /// otherwise only snap feedback is produced.
    pub fn pointer_move_at(&mut self, point: Point, now: Instant) -> ToolResponse {
        self.input
            .handle_pointer_event_at(PointerEvent::Move { position: point }, now);
        let snap = self.snap_point(point);
        if !self.input.is_pressed() {
            return ToolResponse {
                snap,
                ..ToolResponse::default()
            };
        }
        let output = self.tool_manager.update(snapped(point, snap));
        self.respond(snap, output)
    }

    /// End a press at `point`, committing whatever the instrument produces.
    pub fn pointer_up_at(&mut self, point: Point, now: Instant) -> ToolResponse {
        let gesture = self
            .input
            .handle_pointer_event_at(PointerEvent::Up { position: point }, now);
        let snap = self.snap_point(point);
        let Some(gesture) = gesture else {
            return ToolResponse {
                snap,
                ..ToolResponse::default()
            };
        };
        log::debug!("Gesture {:?} with {:?}", gesture, self.tool_manager.current_tool);
        let output = self.tool_manager.end(snapped(point, snap), gesture);
        self.respond(snap, output)
    }

    /// Switch instruments, committing anything the outgoing one flushes.
    pub fn tool_selected(&mut self, tool: ToolKind) -> Vec<SceneElement> {
        let committed = self.tool_manager.set_tool(tool);
        self.commit(&committed);
        committed
    }

    /// Apply a new zoom level. Invalid scales leave the zoom unchanged.
    pub fn zoom_changed(&mut self, scale: f64) -> ConfigResult<()> {
        self.camera.set_zoom(scale).inspect_err(|err| {
            log::warn!("Ignoring zoom change: {err}");
        })
    }

    /// Change the grid spacing. Invalid spacings, including ones that would
    /// make the grid too dense to enumerate, leave the grid unchanged.
    pub fn grid_spacing_changed(&mut self, spacing: f64) -> ConfigResult<()> {
        if !snap::grid_fits(self.config.canvas_width, self.config.canvas_height, spacing) {
            let err = ConfigError::InvalidGridSpacing(spacing);
            log::warn!("Ignoring grid change: {err}");
            return Err(err);
        }
        self.config.grid_spacing = spacing;
        Ok(())
    }

    /// Change the snap radius at zoom 1.
    pub fn snap_radius_changed(&mut self, radius: f64) -> ConfigResult<()> {
        if !(radius.is_finite() && radius >= 0.0) {
            let err = ConfigError::InvalidSnapRadius(radius);
            log::warn!("Ignoring snap radius change: {err}");
            return Err(err);
        }
        self.config.snap_radius = radius;
        Ok(())
    }

    pub fn snap_toggled(&mut self, enabled: bool) {
        log::debug!("Snapping {}", if enabled { "on" } else { "off" });
        self.config.snap_enabled = enabled;
    }

    fn respond(&mut self, snap: Option<SnapResult>, output: ToolOutput) -> ToolResponse {
        if let Some(result) = &snap {
            log::debug!(
                "Snapped to {:?} at ({:.1}, {:.1})",
                result.target.kind,
                result.snapped_point.x,
                result.snapped_point.y
            );
        }
        self.commit(&output.committed);
        ToolResponse {
            snap,
            angle_snapped: output.angle_snapped,
            committed: output.committed,
        }
    }

    fn commit(&mut self, elements: &[SceneElement]) {
        for element in elements {
            log::info!("Committed {} {}", element.kind_name(), element.id());
            self.document.add_element(element.clone());
        }
    }
}

fn snapped(point: Point, snap: Option<SnapResult>) -> Point {
    snap.map_or(point, |s| s.snapped_point)
}
