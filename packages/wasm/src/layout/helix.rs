//! Double helix layout.
//!
//! Even and odd items sit on two strands half a turn apart. The angle grows
//! linearly with the index while the height falls linearly, so the first
//! card is at the top and the last at the bottom.

use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::transform::Transform;

/// Configuration for the helix layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HelixConfig {
    /// Distance from the helix axis (default: 900).
    pub radius: f32,
    /// Angle added per item, in radians (default: 0.35).
    pub angle_step: f32,
    /// Vertical extent from first to last item (default: 1600).
    pub height: f32,
}

impl Default for HelixConfig {
    fn default() -> Self {
        Self {
            radius: 900.0,
            angle_step: 0.35,
            height: 1600.0,
        }
    }
}

/// Angle of item `index` around the helix axis, before wrapping.
#[inline]
pub fn helix_angle(index: usize, angle_step: f32) -> f32 {
    let strand_offset = if index % 2 == 0 { 0.0 } else { PI };
    index as f32 * angle_step + strand_offset
}

/// Compute helix targets for `count` items.
pub fn compute_helix_layout(count: usize, config: &HelixConfig) -> Vec<Transform> {
    if count == 0 {
        return Vec::new();
    }

    let y_step = if count > 1 {
        config.height / (count - 1) as f32
    } else {
        0.0
    };
    let top = (count - 1) as f32 * y_step / 2.0;

    (0..count)
        .map(|i| {
            let theta = helix_angle(i, config.angle_step);
            let x = theta.sin() * config.radius;
            let z = theta.cos() * config.radius;
            let y = top - i as f32 * y_step;

            Transform::facing(Vec3::new(x, y, z), Vec3::new(x * 2.0, y, z * 2.0))
        })
        .collect()
}
