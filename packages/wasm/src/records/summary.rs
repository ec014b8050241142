//! Derived, read-only views of the loaded records.

use serde::Serialize;

use super::record::{MetricField, Record};

/// Number of records shown in the preview list.
pub const PREVIEW_LIMIT: usize = 50;

/// Aggregate figures for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Total number of records.
    pub count: usize,
    /// Records whose metric is known.
    pub known: usize,
    /// Mean of the known values, rounded down. `None` when nothing is known.
    pub mean: Option<u64>,
}

/// Summarize one metric across all records.
///
/// Unknown values count towards `count` but are left out of the mean.
pub fn summarize(records: &[Record], field: MetricField) -> Summary {
    let mut known = 0usize;
    let mut total: u128 = 0;

    for value in records.iter().filter_map(|r| r.metric(field).value()) {
        known += 1;
        total += u128::from(value);
    }

    let mean = (known > 0).then(|| (total / known as u128) as u64);

    Summary {
        count: records.len(),
        known,
        mean,
    }
}

/// The first `limit` records, in dataset order.
pub fn preview(records: &[Record], limit: usize) -> &[Record] {
    &records[..records.len().min(limit)]
}
