//! Position + orientation of one card.

use glam::{Mat3, Mat4, Quat, Vec3};

/// World-space placement of a panel.
///
/// Panels are flat and face their local +Z axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// At the origin, facing +Z.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    /// Create a transform with identity orientation.
    #[inline]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
        }
    }

    /// Create a transform at `position` whose +Z axis points at `target`.
    pub fn facing(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            orientation: look_at(position, target, Vec3::Y),
        }
    }

    /// Interpolate towards `other`: linear on position, spherical on orientation.
    pub fn interpolate(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            orientation: self.orientation.slerp(other.orientation, t),
        }
    }

    /// World matrix (rotation then translation).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }

    /// Compare within `max_abs_diff` on every component.
    ///
    /// `q` and `-q` describe the same rotation and compare equal.
    pub fn abs_diff_eq(&self, other: &Self, max_abs_diff: f32) -> bool {
        self.position.abs_diff_eq(other.position, max_abs_diff)
            && (self.orientation.abs_diff_eq(other.orientation, max_abs_diff)
                || self.orientation.abs_diff_eq(-other.orientation, max_abs_diff))
    }
}

/// Rotation that turns the local +Z axis from `position` towards `target`.
///
/// Degenerate inputs (target on top of position, or view direction parallel
/// to `up`) are nudged rather than producing NaN.
pub fn look_at(position: Vec3, target: Vec3, up: Vec3) -> Quat {
    const DEGENERATE: f32 = 1e-12;

    let mut z = target - position;
    if z.length_squared() < DEGENERATE {
        z = Vec3::Z;
    }
    z = z.normalize();

    let mut x = up.cross(z);
    if x.length_squared() < DEGENERATE {
        if up.z.abs() >= 1.0 - f32::EPSILON {
            z.x += 1e-4;
        } else {
            z.z += 1e-4;
        }
        z = z.normalize();
        x = up.cross(z);
    }
    let x = x.normalize();
    let y = z.cross(x);

    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}
