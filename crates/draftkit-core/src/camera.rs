//! Camera module tracking the zoom level that drives zoom-adaptive snapping.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Camera state relevant to the core.
///
/// The host owns the screen-to-canvas transform; the core only needs the
/// current scale so that snap reach stays constant on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current zoom level (1.0 = 100%).
    pub zoom: f64,
    /// Minimum allowed zoom level
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the zoom level, clamped to the allowed range.
    ///
    /// Non-finite or non-positive scales are rejected and leave the camera
    /// unchanged.
    pub fn set_zoom(&mut self, scale: f64) -> Result<(), ConfigError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ConfigError::InvalidZoom(scale));
        }
        self.zoom = scale.clamp(self.min_zoom, self.max_zoom);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert!((camera.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.set_zoom(0.001).unwrap();
        assert!((camera.zoom - camera.min_zoom).abs() < f64::EPSILON);

        camera.set_zoom(1000.0).unwrap();
        assert!((camera.zoom - camera.max_zoom).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_zoom_rejected() {
        let mut camera = Camera::new();
        camera.set_zoom(2.0).unwrap();
        assert!(camera.set_zoom(0.0).is_err());
        assert!(camera.set_zoom(f64::NAN).is_err());
        assert!((camera.zoom - 2.0).abs() < f64::EPSILON);
    }
}
