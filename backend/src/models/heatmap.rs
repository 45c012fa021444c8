//! Heatmap payload exchanged between the collector and visualization
//! consumers.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Boundary pair describing the key range one matrix row covers.
///
/// `start` and `end` are opaque JSON values on this side of the fence: the
/// collector fills them with decoded key objects, but consumers only ever
/// re-serialize them for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyRange {
    pub start: serde_json::Value,
    pub end: serde_json::Value,
}

/// Statistics for one table (or one table index) over the queried window.
///
/// `ranges` and `values` are parallel: `values[i]` is the time series for
/// the key range `ranges[i]`, one entry per time bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub ranges: Vec<KeyRange>,
    #[serde(default)]
    pub values: Vec<Vec<u64>>,
}

/// Top-level response of the `/heatmaps` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawHeatmapResponse {
    #[serde(default)]
    pub heatmaps: Vec<Heatmap>,
}

/// Parse a heatmap response, reporting the JSON path of any mismatch.
pub fn parse_heatmap_response(json: &str) -> Result<RawHeatmapResponse> {
    let mut de = serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(&mut de).context("Failed to deserialize heatmap response")
}
