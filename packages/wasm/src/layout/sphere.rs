//! Sphere layout.
//!
//! Points follow a deterministic spiral over the sphere:
//! `phi = acos(-1 + 2i/N)`, `theta = sqrt(N*pi) * phi`. The spread is
//! close to even for large N but not exactly equal-area for small N.
//! Each panel faces away from the centre.

use std::f64::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::transform::Transform;

/// Configuration for the sphere layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SphereConfig {
    /// Sphere radius (default: 800).
    pub radius: f32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self { radius: 800.0 }
    }
}

/// Spherical coordinates `(phi, theta)` of item `index` out of `count`.
pub fn sphere_angles(index: usize, count: usize) -> (f64, f64) {
    let n = count as f64;
    let phi = (-1.0 + 2.0 * index as f64 / n).clamp(-1.0, 1.0).acos();
    let theta = (n * PI).sqrt() * phi;
    (phi, theta)
}

/// Compute sphere targets for `count` items.
pub fn compute_sphere_layout(count: usize, config: &SphereConfig) -> Vec<Transform> {
    let radius = f64::from(config.radius);

    (0..count)
        .map(|i| {
            let (phi, theta) = sphere_angles(i, count);

            // y-up spherical convention: phi from +Y, theta around Y from +Z
            let position = Vec3::new(
                (radius * phi.sin() * theta.sin()) as f32,
                (radius * phi.cos()) as f32,
                (radius * phi.sin() * theta.cos()) as f32,
            );

            Transform::facing(position, position * 2.0)
        })
        .collect()
}
