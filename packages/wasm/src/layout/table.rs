//! Flat periodic-table layout.
//!
//! Items fill a fixed number of columns in row-major reading order. The
//! block is centred on the origin in the z = 0 plane and every panel faces
//! the camera.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::transform::Transform;

/// Configuration for the table layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableConfig {
    /// Cards per row (default: 20).
    pub columns: u32,
    /// Horizontal distance between card centres (default: 160).
    pub column_spacing: f32,
    /// Vertical distance between card centres (default: 200).
    pub row_spacing: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            columns: 20,
            column_spacing: 160.0,
            row_spacing: 200.0,
        }
    }
}

/// Grid cell `(row, col)` of item `index`.
#[inline]
pub fn table_cell(index: usize, columns: u32) -> (usize, usize) {
    let columns = columns.max(1) as usize;
    (index / columns, index % columns)
}

/// Compute table targets for `count` items.
pub fn compute_table_layout(count: usize, config: &TableConfig) -> Vec<Transform> {
    if count == 0 {
        return Vec::new();
    }

    let columns = config.columns.max(1) as usize;
    let rows = count.div_ceil(columns);

    let half_width = (columns - 1) as f32 * config.column_spacing / 2.0;
    let half_height = (rows - 1) as f32 * config.row_spacing / 2.0;

    (0..count)
        .map(|i| {
            let (row, col) = table_cell(i, config.columns);
            Transform::from_position(Vec3::new(
                col as f32 * config.column_spacing - half_width,
                -(row as f32) * config.row_spacing + half_height,
                0.0,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn test_empty() {
        assert!(compute_table_layout(0, &TableConfig::default()).is_empty());
    }

    #[test]
    fn test_cells_in_reading_order() {
        assert_eq!(table_cell(0, 20), (0, 0));
        assert_eq!(table_cell(19, 20), (0, 19));
        assert_eq!(table_cell(20, 20), (1, 0));
        assert_eq!(table_cell(45, 20), (2, 5));
    }

    #[test]
    fn test_zero_columns_treated_as_one() {
        assert_eq!(table_cell(3, 0), (3, 0));
        let targets = compute_table_layout(3, &TableConfig { columns: 0, ..Default::default() });
        assert_eq!(targets.len(), 3);
        assert!(targets.iter().all(|t| t.position.x == 0.0));
    }

    #[test]
    fn test_positions_follow_cells() {
        let config = TableConfig::default();
        let targets = compute_table_layout(21, &config);
        assert_eq!(targets.len(), 21);

        let first = targets[0].position;
        let last_in_row = targets[19].position;
        let second_row = targets[20].position;

        // Same row, 19 columns apart
        assert_eq!(first.y, last_in_row.y);
        assert!((last_in_row.x - first.x - 19.0 * config.column_spacing).abs() < 1e-3);

        // Next row starts back at column 0, one row lower
        assert_eq!(second_row.x, first.x);
        assert!((first.y - second_row.y - config.row_spacing).abs() < 1e-3);
    }

    #[test]
    fn test_centred_flat_and_facing_camera() {
        let targets = compute_table_layout(40, &TableConfig::default());
        let centroid = targets.iter().map(|t| t.position).sum::<Vec3>() / targets.len() as f32;
        assert!(centroid.length() < 1e-2, "centroid={centroid}");
        for t in &targets {
            assert_eq!(t.position.z, 0.0);
            assert_eq!(t.orientation, Quat::IDENTITY);
        }
    }
}
