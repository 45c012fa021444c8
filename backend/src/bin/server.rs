//! keyviz HTTP Server Binary
//!
//! Entry point for the heatmap telemetry server. It starts the background
//! region sampler and serves the heatmap API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin keyviz-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8000)
//! - `PD_ADDR`: Placement driver base URL (default: http://127.0.0.1:2379)
//! - `TIDB_ADDR`: SQL layer base URL for schema metadata (default: http://127.0.0.1:10080)
//! - `KEYVIZ_MAX_BUCKETS`: Bucket budget per heatmap (default: 256)
//! - `KEYVIZ_INTERVAL_SECS`: Sampling interval (default: 60)
//! - `KEYVIZ_RING_CAPACITY`: Snapshot history length (default: 1024)
//! - `KEYVIZ_CONFIG`: Optional TOML config file, overridden by the above
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use keyviz::client::HttpRegionSource;
use keyviz::collector::{Sampler, StatRing, TableCatalog};
use keyviz::config::ServerConfig;
use keyviz::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting keyviz HTTP Server");

    let config = ServerConfig::load()?;
    info!(
        pd = %config.pd_addr,
        tidb = %config.tidb_addr,
        interval_secs = config.interval_secs,
        "Collector configured"
    );

    let ring = Arc::new(StatRing::new(config.ring_capacity));
    let catalog = Arc::new(RwLock::new(TableCatalog::default()));
    let source = Arc::new(HttpRegionSource::new(
        config.pd_addr.clone(),
        config.tidb_addr.clone(),
    ));

    // Background sampling loop; the first tick fires immediately.
    Sampler::new(
        source,
        Arc::clone(&ring),
        Arc::clone(&catalog),
        config.interval(),
    )
    .spawn();

    let state = AppState::new(ring, catalog, config.max_buckets, config.interval_chrono());
    let app = create_router(state);

    let addr: SocketAddr = config.listen_addr().parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
