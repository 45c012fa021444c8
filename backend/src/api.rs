//! Data Transfer Objects for the matrix-visualization widget.
//!
//! These types mirror the network-data shape the external widget consumes:
//! column/row metadata nodes with clustering placeholder fields, the numeric
//! matrix, and the per-dimension category color maps. The placeholder fields
//! (`clust`, `ini`, `rank`, `rankvar`) exist only to satisfy the widget's
//! input contract; dendrogram computation happens inside the widget.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One column of the matrix, i.e. one time bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNode {
    /// Display name, `"<index>m"`.
    pub name: String,
    pub col_index: usize,
    /// Reverse-index placeholder consumed by the widget's clustering view.
    pub clust: usize,
    pub ini: usize,
    pub rank: u64,
    pub rankvar: u64,
}

/// One row of the matrix, i.e. one key-range bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowNode {
    /// Synthetic name, `"Bucket: bucket-<n>"` with a globally incrementing
    /// counter across all heatmaps of the response.
    pub name: String,
    /// Database label.
    #[serde(rename = "cat-0")]
    pub cat_0: String,
    /// Table label.
    #[serde(rename = "cat-1")]
    pub cat_1: String,
    /// Derived data-type label: `"index <name>"` or `"Data"`.
    #[serde(rename = "cat-2")]
    pub cat_2: String,
    pub clust: usize,
    pub ini: usize,
}

/// Row classification axis used for color-coded grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryDimension {
    Database,
    Table,
    DataType,
}

impl CategoryDimension {
    pub const ALL: [CategoryDimension; 3] = [
        CategoryDimension::Database,
        CategoryDimension::Table,
        CategoryDimension::DataType,
    ];

    /// 1-based dimension number, used by the color assignment formula.
    pub fn number(self) -> usize {
        match self {
            CategoryDimension::Database => 1,
            CategoryDimension::Table => 2,
            CategoryDimension::DataType => 3,
        }
    }
}

impl RowNode {
    /// The row's value along the given category dimension.
    pub fn category(&self, dimension: CategoryDimension) -> &str {
        match dimension {
            CategoryDimension::Database => &self.cat_0,
            CategoryDimension::Table => &self.cat_1,
            CategoryDimension::DataType => &self.cat_2,
        }
    }
}

/// Category value → hex color, per row dimension. Values whose color
/// assignment fell off the palette are absent, which the widget treats as
/// "no assigned color".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCategoryColors {
    #[serde(rename = "cat-0")]
    pub cat_0: HashMap<String, String>,
    #[serde(rename = "cat-1")]
    pub cat_1: HashMap<String, String>,
    #[serde(rename = "cat-2")]
    pub cat_2: HashMap<String, String>,
}

/// Color groupings for both axes. Columns carry no categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatColors {
    pub row: RowCategoryColors,
    pub col: HashMap<String, String>,
}

/// Network-data object handed to the external widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub col_nodes: Vec<ColumnNode>,
    pub row_nodes: Vec<RowNode>,
    pub mat: Vec<Vec<u64>>,
    pub cat_colors: CatColors,
    pub links: Vec<serde_json::Value>,
    pub views: Vec<serde_json::Value>,
}
