//! Wire models shared by the collector and the transformation pipeline.

pub mod heatmap;
pub mod keys;
pub mod region;
pub mod time;

pub use heatmap::{Heatmap, KeyRange, RawHeatmapResponse};
pub use keys::DecodedKey;
pub use region::{MetricTag, RegionInfo, RegionSnapshot};
