//! Perspective camera for the card scene.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Configuration for the scene camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraConfig {
    /// Vertical field of view in degrees (default: 40).
    pub fov_degrees: f32,
    /// Distance from the origin along +Z (default: 3000).
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 40.0,
            distance: 3000.0,
        }
    }
}

/// A perspective camera looking at a target point.
///
/// CSS perspective has no clip planes, so only the field of view and the
/// eye placement matter.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub fov_degrees: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Camera {
    /// Camera on the +Z axis looking at the origin.
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            fov_degrees: config.fov_degrees,
            position: Vec3::new(0.0, 0.0, config.distance),
            target: Vec3::ZERO,
        }
    }

    /// World-to-camera matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Distance in CSS pixels from the eye to the projection plane for a
    /// viewport `viewport_height` pixels tall.
    pub fn focal_length(&self, viewport_height: f32) -> f32 {
        0.5 * viewport_height / (self.fov_degrees.to_radians() / 2.0).tan()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}
