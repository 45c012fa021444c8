//! # keyviz
//!
//! Key-range heatmap telemetry backend for a matrix-visualization widget.
//!
//! The crate periodically samples per-region traffic counters from a
//! placement-driver-style API, keeps a bounded history of snapshots, and
//! serves time-bucketed per-table heatmaps. On the consumer side it
//! reshapes those heatmaps into the row/column/matrix/category model the
//! external widget expects, together with a row-aligned range index that
//! answers tooltip queries.
//!
//! ## Architecture
//!
//! - [`models`]: wire models (regions, heatmaps, key codec, durations)
//! - [`api`]: widget-facing DTOs (column/row nodes, widget config)
//! - [`services`]: the transformation pipeline (matrix, colors, ranges,
//!   widget config, tooltip snapshots)
//! - [`collector`]: sampling ring, histogram assembly, table catalog
//! - [`client`]: upstream HTTP access and the heatmap fetch client
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Invariants
//!
//! Row order is load-bearing: matrix rows, row nodes, and the flattened
//! range index are all produced in outer-heatmap, inner-range order, so
//! position `i` means the same source row everywhere. Tooltip resolvers
//! are bound to the snapshot they were built from and never read shared
//! mutable state.

pub mod api;

pub mod client;
pub mod collector;
pub mod config;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
