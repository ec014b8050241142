//! 3D lattice layout.
//!
//! Items fill `columns × rows × layers` slots with x varying fastest, then
//! y, then z. The lattice is centred on the origin. Counts above capacity
//! either grow extra layers or are rejected, never truncated.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::LayoutError;
use super::transform::Transform;

/// What to do when there are more items than lattice slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GridOverflow {
    /// Add layers until every item has a slot.
    #[default]
    Grow,
    /// Fail with [`LayoutError::CapacityExceeded`].
    Reject,
}

/// Configuration for the grid layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Slots along x (default: 5).
    pub columns: u32,
    /// Slots along y (default: 4).
    pub rows: u32,
    /// Slots along z (default: 5).
    pub layers: u32,
    /// Distance between neighbouring slots (default: 400).
    pub spacing: f32,
    /// Overflow policy (default: grow).
    pub overflow: GridOverflow,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 5,
            rows: 4,
            layers: 5,
            spacing: 400.0,
            overflow: GridOverflow::Grow,
        }
    }
}

impl GridConfig {
    /// Number of slots with the configured dimensions.
    pub fn capacity(&self) -> usize {
        self.columns.max(1) as usize * self.rows.max(1) as usize * self.layers.max(1) as usize
    }
}

/// Lattice slot `(column, row, layer)` of item `index`.
#[inline]
pub fn grid_slot(index: usize, columns: u32, rows: u32) -> (usize, usize, usize) {
    let columns = columns.max(1) as usize;
    let rows = rows.max(1) as usize;
    (index % columns, (index / columns) % rows, index / (columns * rows))
}

/// Compute grid targets for `count` items.
pub fn compute_grid_layout(count: usize, config: &GridConfig) -> Result<Vec<Transform>, LayoutError> {
    let capacity = config.capacity();
    let columns = config.columns.max(1) as usize;
    let rows = config.rows.max(1) as usize;

    let layers = if count > capacity {
        match config.overflow {
            GridOverflow::Reject => return Err(LayoutError::CapacityExceeded { count, capacity }),
            GridOverflow::Grow => count.div_ceil(columns * rows),
        }
    } else {
        config.layers.max(1) as usize
    };

    let spacing = config.spacing;
    let half = Vec3::new(
        (columns - 1) as f32 * spacing / 2.0,
        (rows - 1) as f32 * spacing / 2.0,
        (layers - 1) as f32 * spacing / 2.0,
    );

    Ok((0..count)
        .map(|i| {
            let (col, row, layer) = grid_slot(i, config.columns, config.rows);
            Transform::from_position(Vec3::new(
                col as f32 * spacing - half.x,
                half.y - row as f32 * spacing,
                layer as f32 * spacing - half.z,
            ))
        })
        .collect())
}
