//! CSS 3D transform strings.
//!
//! CSS uses a y-down coordinate system while the scene is y-up, so object
//! matrices flip their Y basis column and the camera matrix flips its Y row.
//! Values are written column-major, which is what `matrix3d()` expects.

use std::fmt::Write;

use glam::Mat4;

/// Magnitudes below this are written as `0`, which also avoids `-0`.
const EPSILON: f32 = 1e-10;

#[inline]
fn clean(value: f32) -> f32 {
    if value.abs() < EPSILON { 0.0 } else { value }
}

fn matrix3d(values: &[f32; 16]) -> String {
    let mut out = String::with_capacity(160);
    out.push_str("matrix3d(");
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{}", clean(*value));
    }
    out.push(')');
    out
}

/// `transform` value for a panel with world matrix `world`.
///
/// The panel is centred on its anchor point.
pub fn object_css_transform(world: &Mat4) -> String {
    let mut e = world.to_cols_array();
    for v in &mut e[4..8] {
        *v = -*v;
    }
    format!("translate(-50%,-50%) {}", matrix3d(&e))
}

/// `transform` value for the stage element seen through a camera.
///
/// `focal` is the perspective distance in pixels. `width` and `height` are
/// the viewport size, used to put the world origin at the viewport centre.
pub fn camera_css_transform(view: &Mat4, focal: f32, width: f32, height: f32) -> String {
    let mut e = view.to_cols_array();
    for i in [1, 5, 9, 13] {
        e[i] = -e[i];
    }
    format!(
        "translateZ({}px) {} translate({}px,{}px)",
        clean(focal),
        matrix3d(&e),
        clean(width / 2.0),
        clean(height / 2.0)
    )
}
