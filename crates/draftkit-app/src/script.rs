//! Gesture scripts: JSON event lists replayed through a canvas session.

use draftkit_core::{Canvas, CanvasConfig, CanvasDocument, ConfigError, SceneElement, ShapeStyle, ToolKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors that can occur while loading or replaying a script.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// One step of a script.
///
/// Pointer events carry a timestamp in milliseconds from the start of the
/// script so that taps, long presses and drags replay faithfully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        t_ms: u64,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        t_ms: u64,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default)]
        t_ms: u64,
    },
    Tool {
        tool: ToolKind,
    },
    Zoom {
        scale: f64,
    },
    Grid {
        spacing: f64,
    },
    Snap {
        enabled: bool,
    },
    /// Style applied to elements committed from here on.
    Style {
        style: ShapeStyle,
    },
    /// Insert an element directly, bypassing the instruments.
    Add {
        element: SceneElement,
    },
}

/// A list of events to replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub fn from_json(json: &str) -> ReplayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a script file.
    pub fn load(path: impl AsRef<Path>) -> ReplayResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// What a replay produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayReport {
    /// The resulting drawing.
    pub document: CanvasDocument,
    /// Pointer events that were pulled onto a snap target.
    pub point_snaps: usize,
    /// Pointer events where an instrument snapped an angle.
    pub angle_snaps: usize,
}

/// Replay `script` on a fresh canvas built from `config`.
///
/// Rejected settings inside the script are skipped with a warning, the same
/// way a live session ignores them.
pub fn replay(config: CanvasConfig, script: &Script) -> ReplayResult<ReplayReport> {
    let mut canvas = Canvas::with_config(config)?;
    let origin = Instant::now();
    let at = |t_ms: u64| origin + Duration::from_millis(t_ms);

    let mut point_snaps = 0;
    let mut angle_snaps = 0;

    for event in &script.events {
        let response = match *event {
            ScriptEvent::Down { x, y, t_ms } => Some(canvas.pointer_down_at(Point::new(x, y), at(t_ms))),
            ScriptEvent::Move { x, y, t_ms } => Some(canvas.pointer_move_at(Point::new(x, y), at(t_ms))),
            ScriptEvent::Up { x, y, t_ms } => Some(canvas.pointer_up_at(Point::new(x, y), at(t_ms))),
            ScriptEvent::Tool { tool } => {
                canvas.tool_selected(tool);
                None
            }
            // Rejections are logged by the canvas.
            ScriptEvent::Zoom { scale } => {
                canvas.zoom_changed(scale).ok();
                None
            }
            ScriptEvent::Grid { spacing } => {
                canvas.grid_spacing_changed(spacing).ok();
                None
            }
            ScriptEvent::Style { ref style } => {
                canvas.tool_manager.current_style = style.clone();
                None
            }
            ScriptEvent::Snap { enabled } => {
                canvas.snap_toggled(enabled);
                None
            }
            ScriptEvent::Add { ref element } => {
                canvas.add_element(element.clone());
                None
            }
        };

        if let Some(response) = response {
            point_snaps += usize::from(response.snap.is_some());
            angle_snaps += usize::from(response.angle_snapped);
        }
    }

    log::info!(
        "Replayed {} events into {} elements",
        script.events.len(),
        canvas.document.len()
    );

    Ok(ReplayReport {
        document: canvas.document,
        point_snaps,
        angle_snaps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftkit_core::Line;
    use draftkit_core::shapes::StrokeStyle;
    use std::io::Write;

    #[test]
    fn test_compass_script() {
        let script = Script::from_json(
            r#"{"events": [
                {"event": "tool", "tool": "Compass"},
                {"event": "down", "x": 101.0, "y": 99.0},
                {"event": "move", "x": 140.0, "y": 101.0, "t_ms": 40},
                {"event": "up", "x": 140.0, "y": 101.0, "t_ms": 80}
            ]}"#,
        )
        .unwrap();

        let report = replay(CanvasConfig::default(), &script).unwrap();
        assert_eq!(report.document.len(), 1);
        let circle = report.document.elements[0].as_circle().unwrap();
        assert_eq!(circle.center, Point::new(100.0, 100.0));
        assert!((circle.radius - 40.0).abs() < 1e-9);
        assert_eq!(report.point_snaps, 3);
    }

    #[test]
    fn test_timestamps_drive_gestures() {
        // Place a set square, then hold inside it long enough to hide it.
        let script = Script::from_json(
            r#"{"events": [
                {"event": "snap", "enabled": false},
                {"event": "tool", "tool": "SetSquare"},
                {"event": "down", "x": 500.0, "y": 500.0, "t_ms": 0},
                {"event": "up", "x": 500.0, "y": 500.0, "t_ms": 50},
                {"event": "down", "x": 500.0, "y": 510.0, "t_ms": 1000},
                {"event": "up", "x": 500.0, "y": 510.0, "t_ms": 1700}
            ]}"#,
        )
        .unwrap();
        let report = replay(CanvasConfig::default(), &script).unwrap();
        assert!(report.document.is_empty());
        assert_eq!(report.point_snaps, 0);
    }

    #[test]
    fn test_added_elements_are_snap_targets() {
        let line = SceneElement::Line(Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0)));
        let script = Script {
            events: vec![
                ScriptEvent::Grid { spacing: 1000.0 },
                ScriptEvent::Add { element: line },
                ScriptEvent::Tool { tool: ToolKind::Compass },
                ScriptEvent::Down { x: 98.0, y: 3.0, t_ms: 0 },
                ScriptEvent::Move { x: 150.0, y: 0.0, t_ms: 30 },
                ScriptEvent::Up { x: 150.0, y: 0.0, t_ms: 60 },
            ],
        };
        let report = replay(CanvasConfig::default(), &script).unwrap();
        assert_eq!(report.document.len(), 2);
        let circle = report.document.elements[1].as_circle().unwrap();
        assert_eq!(circle.center, Point::new(100.0, 0.0));
    }

    #[test]
    fn test_rejected_settings_are_skipped() {
        let script = Script {
            events: vec![
                ScriptEvent::Zoom { scale: -2.0 },
                ScriptEvent::Grid { spacing: 0.0 },
                ScriptEvent::Grid { spacing: 1e-6 },
            ],
        };
        assert!(replay(CanvasConfig::default(), &script).is_ok());
    }

    #[test]
    fn test_style_applies_to_commits() {
        let script = Script::from_json(
            r#"{"events": [
                {"event": "style", "style": {
                    "stroke_color": {"r": 200, "g": 0, "b": 0, "a": 255},
                    "stroke_width": 4.0,
                    "stroke_style": "Dashed"
                }},
                {"event": "tool", "tool": "Compass"},
                {"event": "down", "x": 100.0, "y": 100.0},
                {"event": "move", "x": 160.0, "y": 100.0, "t_ms": 40},
                {"event": "up", "x": 160.0, "y": 100.0, "t_ms": 80}
            ]}"#,
        )
        .unwrap();
        let report = replay(CanvasConfig::default(), &script).unwrap();
        let circle = report.document.elements[0].as_circle().unwrap();
        assert_eq!(circle.style.stroke_width, 4.0);
        assert_eq!(circle.style.stroke_style, StrokeStyle::Dashed);
        assert_eq!(circle.style.opacity, 1.0);
    }

    #[test]
    fn test_invalid_config_fails() {
        let config = CanvasConfig {
            snap_radius: -1.0,
            ..CanvasConfig::default()
        };
        let result = replay(config, &Script::default());
        assert!(matches!(result, Err(ReplayError::Config(_))));
    }

    #[test]
    fn test_load_script_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"events": [{{"event": "snap", "enabled": false}}]}}"#).unwrap();
        let script = Script::load(file.path()).unwrap();
        assert_eq!(script.events, vec![ScriptEvent::Snap { enabled: false }]);

        assert!(matches!(Script::from_json("{"), Err(ReplayError::Parse(_))));
        assert!(matches!(
            Script::load(file.path().with_extension("missing")),
            Err(ReplayError::Io(_))
        ));
    }
}
