//! Range index construction for tooltip lookups.

use crate::models::{KeyRange, RawHeatmapResponse};

/// Flatten every heatmap's ranges into one position-indexed list.
///
/// The order is outer heatmap order, inner range order: exactly the row
/// order the matrix builder produces, so `flatten_ranges(r)[i]` describes
/// the same source row as row node `i`. Empty input yields an empty list.
pub fn flatten_ranges(response: &RawHeatmapResponse) -> Vec<KeyRange> {
    response
        .heatmaps
        .iter()
        .flat_map(|h| h.ranges.iter().cloned())
        .collect()
}
