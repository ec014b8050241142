//! Top-level configuration passed from JavaScript.

use serde::{Deserialize, Serialize};

use crate::layout::{LayoutConfig, LayoutScheme};
use crate::records::PREVIEW_LIMIT;
use crate::scene::CameraConfig;
use crate::transition::TransitionConfig;

/// Everything tunable about a visualization.
///
/// Every field has a default, so JS may pass `{}` or any partial object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AtlasConfig {
    pub layout: LayoutConfig,
    pub transition: TransitionConfig,
    pub camera: CameraConfig,
    /// Side of the cube new panels are scattered in before the first layout (default: 4000).
    pub scatter_extent: f32,
    /// Number of records generated when the data source fails (default: 200).
    pub synthetic_count: usize,
    /// Records included in the preview list (default: 50).
    pub preview_limit: usize,
    /// Layout applied after every load (default: table).
    pub initial_layout: LayoutScheme,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            transition: TransitionConfig::default(),
            camera: CameraConfig::default(),
            scatter_extent: 4000.0,
            synthetic_count: 200,
            preview_limit: PREVIEW_LIMIT,
            initial_layout: LayoutScheme::Table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::Easing;

    #[test]
    fn test_empty_object_is_default() {
        let config: AtlasConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AtlasConfig::default());
    }

    #[test]
    fn test_partial_nested_override() {
        let config: AtlasConfig = serde_json::from_str(
            r#"{"transition":{"durationMs":500},"initialLayout":"helix","scatterExtent":100}"#,
        )
        .unwrap();
        assert_eq!(config.transition.duration_ms, 500.0);
        assert_eq!(config.transition.easing, Easing::ExponentialInOut);
        assert_eq!(config.initial_layout, LayoutScheme::Helix);
        assert_eq!(config.scatter_extent, 100.0);
        assert_eq!(config.synthetic_count, 200);
    }
}
