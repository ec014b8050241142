//! Transition engine: eased, time-based movement between layouts.

pub mod easing;
pub mod engine;
pub mod tween;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use easing::Easing;
pub use engine::TransitionEngine;
pub use tween::Tween;

/// Transition failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("{objects} objects but {targets} targets")]
    LengthMismatch { objects: usize, targets: usize },
}

/// Configuration for layout transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransitionConfig {
    /// Duration of a layout switch in milliseconds (default: 2000).
    pub duration_ms: f64,
    /// Easing curve (default: exponential in/out).
    pub easing: Easing,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000.0,
            easing: Easing::ExponentialInOut,
        }
    }
}
