//! A single time-based interpolation.

use super::easing::Easing;
use crate::layout::Transform;

/// One object's move from `from` to `to`.
///
/// Progress is measured in wall-clock milliseconds, so irregular or paused
/// frame ticks only change how many samples are taken, not where the tween
/// ends up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: Transform,
    pub to: Transform,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Tween {
    /// Create a tween starting at `start_ms`.
    pub fn new(from: Transform, to: Transform, start_ms: f64, duration_ms: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
            easing,
        }
    }

    /// Linear progress in `[0, 1]` at `now_ms`.
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    /// Check if the tween has reached its target at `now_ms`.
    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Transform at `now_ms`. Exactly `to` once finished.
    pub fn sample(&self, now_ms: f64) -> Transform {
        let progress = self.progress(now_ms);
        if progress >= 1.0 {
            return self.to;
        }
        self.from.interpolate(&self.to, self.easing.apply(progress))
    }
}
