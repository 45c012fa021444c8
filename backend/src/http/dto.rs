//! Data Transfer Objects for the HTTP API.
//!
//! The heatmap payload and widget config are already serializable wire
//! models, so only the request/ancillary shapes live here.

use serde::{Deserialize, Serialize};

/// Query parameters for the heatmap endpoints.
///
/// `start` and `end` are durations relative to now (e.g. `-60m`); the
/// default window is one sampling interval back. Unparseable values fall
/// back to the defaults rather than failing the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeatmapParams {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Number of snapshots currently held
    pub samples: usize,
}
