//! Layout schemes for card visualization.
//!
//! Each scheme is a pure function of the item count and its configuration
//! that returns one target [`Transform`] per item, in item order. The
//! transition engine then animates cards from wherever they are to these
//! targets.
//!
//! - `table`: flat rows of 20, reading order
//! - `sphere`: spiral over a sphere, panels facing outward
//! - `helix`: two strands half a turn apart, descending
//! - `grid`: 3D lattice, grows or rejects on overflow

pub mod cache;
pub mod grid;
pub mod helix;
pub mod sphere;
pub mod table;
pub mod transform;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use cache::LayoutCache;
pub use grid::{GridConfig, GridOverflow};
pub use helix::HelixConfig;
pub use sphere::SphereConfig;
pub use table::TableConfig;
pub use transform::Transform;

/// A named arrangement of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutScheme {
    Table,
    Sphere,
    Helix,
    Grid,
}

impl LayoutScheme {
    /// Every scheme, in toolbar order.
    pub const ALL: [Self; 4] = [Self::Table, Self::Sphere, Self::Helix, Self::Grid];

    /// The command name used by the toolbar and the JS API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Sphere => "sphere",
            Self::Helix => "helix",
            Self::Grid => "grid",
        }
    }
}

impl fmt::Display for LayoutScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutScheme {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| LayoutError::UnknownScheme(name.to_owned()))
    }
}

/// Layout failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("{count} items exceed the grid capacity of {capacity}")]
    CapacityExceeded { count: usize, capacity: usize },
    #[error("unknown layout scheme `{0}`")]
    UnknownScheme(String),
}

/// Configuration for every scheme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub table: TableConfig,
    pub sphere: SphereConfig,
    pub helix: HelixConfig,
    pub grid: GridConfig,
}

/// Compute `count` target transforms for `scheme`.
///
/// Deterministic: the same arguments always give the same output.
pub fn generate(
    scheme: LayoutScheme,
    count: usize,
    config: &LayoutConfig,
) -> Result<Vec<Transform>, LayoutError> {
    match scheme {
        LayoutScheme::Table => Ok(table::compute_table_layout(count, &config.table)),
        LayoutScheme::Sphere => Ok(sphere::compute_sphere_layout(count, &config.sphere)),
        LayoutScheme::Helix => Ok(helix::compute_helix_layout(count, &config.helix)),
        LayoutScheme::Grid => grid::compute_grid_layout(count, &config.grid),
    }
}
