//! Record model: parsed dataset rows and views derived from them.

mod fetch;
mod record;
mod spreadsheet;
mod summary;
mod synthetic;

pub use fetch::{fetch_csv, load_remote};
pub use record::{Metric, MetricField, Record, RecordId};
pub use spreadsheet::parse_csv;
pub use summary::{PREVIEW_LIMIT, Summary, preview, summarize};
pub use synthetic::synthetic_records;

use serde::Serialize;
use thiserror::Error;

/// Failure to obtain a dataset.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("server responded with HTTP {0}")]
    Status(u16),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset has no rows")]
    Empty,
}

/// Where the currently loaded records came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DataOrigin {
    /// Records supplied directly (CSV text or tests).
    Inline,
    /// Records fetched from a remote export.
    Remote { url: String },
    /// Synthetic records substituted after a load failure.
    Synthetic { reason: String },
}

impl DataOrigin {
    /// Check if the dataset is a fallback.
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic { .. })
    }
}

/// Pick the records to show from the outcome of a remote load.
///
/// A failed or empty load is replaced by `fallback_count` synthetic records
/// generated from `seed`, and the origin carries the reason.
pub fn resolve_dataset(
    fetched: Result<Vec<Record>, DataError>,
    url: &str,
    fallback_count: usize,
    seed: u64,
) -> (Vec<Record>, DataOrigin) {
    let err = match fetched {
        Ok(records) if !records.is_empty() => {
            return (records, DataOrigin::Remote { url: url.to_owned() });
        }
        Ok(_) => DataError::Empty,
        Err(err) => err,
    };

    log::warn!("Could not load {url}: {err}. Using synthetic data");
    (
        synthetic_records(fallback_count, seed),
        DataOrigin::Synthetic {
            reason: err.to_string(),
        },
    )
}
