//! Background sampling of region statistics.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::client::RegionSource;
use crate::collector::catalog::TableCatalog;
use crate::collector::ring::StatRing;

/// Periodically scans the upstream region API and feeds the ring.
///
/// A failed tick is logged and skipped; the next tick starts fresh.
pub struct Sampler {
    source: Arc<dyn RegionSource>,
    ring: Arc<StatRing>,
    catalog: Arc<RwLock<TableCatalog>>,
    interval: Duration,
}

impl Sampler {
    pub fn new(
        source: Arc<dyn RegionSource>,
        ring: Arc<StatRing>,
        catalog: Arc<RwLock<TableCatalog>>,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            ring,
            catalog,
            interval,
        }
    }

    /// Run the sampling loop forever. The first tick fires immediately so
    /// the server has data shortly after startup.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// One sampling pass: refresh the catalog, then snapshot the regions.
    pub async fn tick(&self) {
        match self.source.load_catalog().await {
            Ok(catalog) => {
                debug!(tables = catalog.len(), "catalog refreshed");
                *self.catalog.write() = catalog;
            }
            Err(err) => warn!(error = %err, "catalog refresh failed"),
        }

        match self.source.scan_regions().await {
            Ok(regions) => {
                debug!(regions = regions.len(), "region snapshot recorded");
                self.ring.append(regions);
            }
            Err(err) => warn!(error = %err, "region scan failed, skipping tick"),
        }
    }
}
