//! Canvas configuration and its validation errors.

use crate::snap::{DEFAULT_SNAP_RADIUS, GRID_SIZE, grid_fits};
use crate::tools::compass::MIN_RADIUS;
use crate::tools::protractor::OVERRIDE_DISTANCE;
use crate::tools::ruler::DEFAULT_LENGTH;
use crate::tools::set_square::DEFAULT_SIZE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid grid spacing: {0}")]
    InvalidGridSpacing(f64),
    #[error("Invalid zoom level: {0}")]
    InvalidZoom(f64),
    #[error("Invalid snap radius: {0}")]
    InvalidSnapRadius(f64),
    #[error("Invalid canvas size: {0}x{1}")]
    InvalidCanvasSize(f64, f64),
    #[error("Invalid instrument setting {name}: {value}")]
    InvalidInstrument { name: &'static str, value: f64 },
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for the drafting surface.
///
/// Distances are in canvas units. The protractor override distance and the
/// compass minimum radius do not scale with zoom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Width of the area covered by grid targets.
    pub canvas_width: f64,
    /// Height of the area covered by grid targets.
    pub canvas_height: f64,
    /// Grid spacing.
    pub grid_spacing: f64,
    /// Snap capture radius at zoom 1.
    pub snap_radius: f64,
    /// Whether point snapping starts enabled.
    pub snap_enabled: bool,
    /// Fixed length of the ruler.
    pub ruler_length: f64,
    /// Smallest radius the compass will draw.
    pub compass_min_radius: f64,
    /// How far past a snapped angle the protractor ray must be dragged to
    /// override the snap.
    pub protractor_override_distance: f64,
    /// Size of a freshly placed set square.
    pub set_square_size: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1920.0,
            canvas_height: 1080.0,
            grid_spacing: GRID_SIZE,
            snap_radius: DEFAULT_SNAP_RADIUS,
            snap_enabled: true,
            ruler_length: DEFAULT_LENGTH,
            compass_min_radius: MIN_RADIUS,
            protractor_override_distance: OVERRIDE_DISTANCE,
            set_square_size: DEFAULT_SIZE,
        }
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl CanvasConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check every value is usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.canvas_width.is_finite()
            && self.canvas_height.is_finite()
            && self.canvas_width >= 0.0
            && self.canvas_height >= 0.0)
        {
            return Err(ConfigError::InvalidCanvasSize(self.canvas_width, self.canvas_height));
        }
        if !grid_fits(self.canvas_width, self.canvas_height, self.grid_spacing) {
            return Err(ConfigError::InvalidGridSpacing(self.grid_spacing));
        }
        if !(self.snap_radius.is_finite() && self.snap_radius >= 0.0) {
            return Err(ConfigError::InvalidSnapRadius(self.snap_radius));
        }
        let instruments = [
            ("ruler_length", self.ruler_length),
            ("compass_min_radius", self.compass_min_radius),
            ("protractor_override_distance", self.protractor_override_distance),
            ("set_square_size", self.set_square_size),
        ];
        for (name, value) in instruments {
            if !positive(value) {
                return Err(ConfigError::InvalidInstrument { name, value });
            }
        }
        Ok(())
    }
}
