//! Transformation pipeline: raw heatmap payload in, widget-ready model out.

pub mod colors;
pub mod error;
pub mod matrix;
pub mod ranges;
pub mod widget;

pub use colors::{assign_category_colors, CATEGORY_PALETTE};
pub use error::TransformError;
pub use matrix::{build_matrix, HeatmapMatrix};
pub use ranges::flatten_ranges;
pub use widget::{build_widget_config, CellPosition, HeatmapSnapshot, WidgetContext};
