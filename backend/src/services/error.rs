//! Typed failures of the transformation pipeline.
//!
//! The original consumer swallowed every structural problem and rendered
//! nothing; these errors make "malformed response" a first-class outcome so
//! callers can log or surface it while still degrading gracefully.

use thiserror::Error;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A heatmap's `ranges` and `values` sequences disagree in length, so
    /// rows cannot be paired with their key ranges.
    #[error("heatmap {heatmap}: {ranges} ranges but {values} value rows")]
    RowCountMismatch {
        heatmap: usize,
        ranges: usize,
        values: usize,
    },

    /// A row's time series does not match the bucket count derived from the
    /// first row of the first heatmap.
    #[error("heatmap {heatmap} row {row}: expected {expected} time buckets, found {found}")]
    RaggedRow {
        heatmap: usize,
        row: usize,
        expected: usize,
        found: usize,
    },
}
