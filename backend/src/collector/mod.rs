//! Region sampling, storage, and heatmap assembly.
//!
//! The collector mirrors the data path of the upstream metrics service:
//! scan regions on an interval, keep a bounded history of snapshots, and
//! turn a time window of snapshots into per-table heatmaps on request.

pub mod catalog;
pub mod histogram;
pub mod ring;
pub mod sampler;

pub use catalog::{table_heatmaps, TableCatalog, TableMeta};
pub use histogram::{build_heatmap, build_ranges, squash_ranges, RangeBounds};
pub use ring::StatRing;
pub use sampler::Sampler;
