//! Easing curves mapping linear progress to eased progress.

use serde::{Deserialize, Serialize};

/// Easing curve.
///
/// Every curve is monotonic on `[0, 1]` with `apply(0) == 0` and
/// `apply(1) == 1`. The in/out curves start and end with zero slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    /// Exponential ease-in-out (default).
    #[default]
    ExponentialInOut,
    CubicInOut,
}

impl Easing {
    /// Map progress `k` (clamped to `[0, 1]`) through the curve.
    pub fn apply(self, k: f32) -> f32 {
        if k <= 0.0 {
            return 0.0;
        }
        if k >= 1.0 {
            return 1.0;
        }

        match self {
            Self::Linear => k,
            Self::ExponentialInOut => {
                let k = k * 2.0;
                if k < 1.0 {
                    0.5 * 1024f32.powf(k - 1.0)
                } else {
                    0.5 * (2.0 - 2f32.powf(-10.0 * (k - 1.0)))
                }
            }
            Self::CubicInOut => {
                let k = k * 2.0;
                if k < 1.0 {
                    0.5 * k * k * k
                } else {
                    let k = k - 2.0;
                    0.5 * (k * k * k + 2.0)
                }
            }
        }
    }
}
