//! HTTP handlers for the REST API.
//!
//! Each handler resolves the requested time window against the snapshot
//! ring and delegates to the collector and transformation services.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Duration, Utc};

use super::dto::{HealthResponse, HeatmapParams};
use super::error::AppError;
use super::state::AppState;
use crate::api::WidgetConfig;
use crate::collector::table_heatmaps;
use crate::models::time::parse_relative_duration;
use crate::models::{MetricTag, RawHeatmapResponse};
use crate::services::{build_matrix, build_widget_config};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
///
/// Health check endpoint reporting how many snapshots are available.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        samples: state.ring.len(),
    })
}

/// GET /heatmaps?start=-60m&end=&tag=written_bytes
///
/// Per-table heatmaps for the requested window. An empty ring or a window
/// with no snapshots yields an empty heatmap list, not an error.
pub async fn get_heatmaps(
    State(state): State<AppState>,
    Query(params): Query<HeatmapParams>,
) -> Json<RawHeatmapResponse> {
    Json(heatmaps_for(&state, &params))
}

/// GET /heatmaps/widget-config?start=-60m&end=&tag=written_bytes
///
/// The same window, already transformed into the matrix-visualization
/// widget's network-data shape. Tooltip resolution is a library concern;
/// over HTTP only the serializable configuration is returned.
pub async fn get_widget_config(
    State(state): State<AppState>,
    Query(params): Query<HeatmapParams>,
) -> HandlerResult<WidgetConfig> {
    let response = heatmaps_for(&state, &params);
    let matrix = build_matrix(&response)?;
    let context = build_widget_config(matrix, &response);
    Ok(Json(context.config))
}

fn heatmaps_for(state: &AppState, params: &HeatmapParams) -> RawHeatmapResponse {
    let (start_time, end_time) = resolve_window(params, Utc::now(), state.interval);
    let tag = MetricTag::parse(params.tag.as_deref().unwrap_or_default());

    let snapshots = state.ring.window(start_time, end_time, state.interval);
    let windows: Vec<_> = snapshots.into_iter().map(|s| s.regions).collect();

    let catalog = state.catalog.read().clone();
    let heatmaps = table_heatmaps(&catalog, &windows, state.max_buckets, tag);
    RawHeatmapResponse { heatmaps }
}

/// Resolve `start`/`end` durations against `now`. Absent or unparseable
/// values keep the default window of one interval ending now.
fn resolve_window(
    params: &HeatmapParams,
    now: DateTime<Utc>,
    interval: Duration,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let mut start_time = now - interval;
    let mut end_time = now;

    if let Some(start) = params.start.as_deref() {
        if let Ok(offset) = parse_relative_duration(start) {
            start_time = now + offset;
        }
    }
    if let Some(end) = params.end.as_deref() {
        if let Ok(offset) = parse_relative_duration(end) {
            end_time = now + offset;
        }
    }

    (start_time, end_time)
}
