//! Application state for the HTTP server.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::collector::{StatRing, TableCatalog};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Snapshot history written by the sampler.
    pub ring: Arc<StatRing>,
    /// Current table catalog, refreshed by the sampler.
    pub catalog: Arc<RwLock<TableCatalog>>,
    /// Bucket budget per heatmap.
    pub max_buckets: usize,
    /// Sampling interval; also the default window width.
    pub interval: chrono::Duration,
}

impl AppState {
    pub fn new(
        ring: Arc<StatRing>,
        catalog: Arc<RwLock<TableCatalog>>,
        max_buckets: usize,
        interval: chrono::Duration,
    ) -> Self {
        Self {
            ring,
            catalog,
            max_buckets,
            interval,
        }
    }
}
