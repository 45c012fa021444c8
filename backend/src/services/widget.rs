//! Widget configuration assembly and tooltip resolution.
//!
//! The external widget receives a serializable [`WidgetConfig`] plus
//! tooltip callbacks. Each build returns its own immutable
//! [`HeatmapSnapshot`]; callbacks capture that snapshot, so a later fetch
//! can never change what an already-rendered heatmap's tooltips say.

use std::sync::Arc;

use crate::api::WidgetConfig;
use crate::models::{KeyRange, RawHeatmapResponse};
use crate::services::matrix::HeatmapMatrix;
use crate::services::ranges::flatten_ranges;

/// Row-position-aligned range index frozen at build time.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapSnapshot {
    range_index: Vec<KeyRange>,
}

/// Cell descriptor the widget passes to the matrix tooltip callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub pos_x: usize,
    pub pos_y: usize,
}

/// A widget configuration together with the snapshot its tooltips read.
#[derive(Debug, Clone)]
pub struct WidgetContext {
    pub config: WidgetConfig,
    pub snapshot: Arc<HeatmapSnapshot>,
}

/// Assemble the widget configuration from a built matrix and the response
/// it came from.
pub fn build_widget_config(matrix: HeatmapMatrix, response: &RawHeatmapResponse) -> WidgetContext {
    let snapshot = Arc::new(HeatmapSnapshot {
        range_index: flatten_ranges(response),
    });

    let config = WidgetConfig {
        col_nodes: matrix.col_nodes,
        row_nodes: matrix.row_nodes,
        mat: matrix.mat,
        cat_colors: matrix.cat_colors,
        links: Vec::new(),
        views: Vec::new(),
    };

    WidgetContext { config, snapshot }
}

impl HeatmapSnapshot {
    pub fn range_index(&self) -> &[KeyRange] {
        &self.range_index
    }

    /// Tooltip text for one row: the key range it covers, boundaries
    /// rendered as JSON text. Unknown positions resolve to an empty string.
    pub fn row_tooltip(&self, row: usize) -> String {
        match self.range_index.get(row) {
            Some(range) => format!(
                "key range from {} to {}",
                json_text(&range.start),
                json_text(&range.end)
            ),
            None => String::new(),
        }
    }

    /// Tooltip text for one column. The time label is not carried through
    /// the payload, so this is always empty.
    pub fn col_tooltip(&self, _col: usize) -> String {
        String::new()
    }

    /// Tooltip markup for one cell, embedding the row's range boundaries
    /// and the cell value the widget already computed.
    pub fn cell_tooltip(&self, cell: &CellPosition, value: u64) -> String {
        let row_name = self.row_tooltip(cell.pos_y);
        let col_name = self.col_tooltip(cell.pos_x);
        format!("<p>{row_name} and at time {col_name}</p><div> value: {value}</div>")
    }
}

impl WidgetContext {
    /// Row tooltip callback for the widget, bound to this build's snapshot.
    pub fn row_tooltip_handler(&self) -> impl Fn(usize) -> String {
        let snapshot = Arc::clone(&self.snapshot);
        move |row| snapshot.row_tooltip(row)
    }

    /// Matrix cell tooltip callback, bound to this build's snapshot.
    pub fn cell_tooltip_handler(&self) -> impl Fn(CellPosition, u64) -> String {
        let snapshot = Arc::clone(&self.snapshot);
        move |cell, value| snapshot.cell_tooltip(&cell, value)
    }
}

fn json_text(value: &serde_json::Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}
