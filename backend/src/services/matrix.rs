//! Matrix construction from the raw heatmap payload.
//!
//! This is the heart of the pipeline: one pass over the response produces
//! the widget's column nodes, row nodes, numeric matrix, and category color
//! groupings.

use crate::api::{CatColors, CategoryDimension, ColumnNode, RowCategoryColors, RowNode};
use crate::models::RawHeatmapResponse;
use crate::services::colors::assign_category_colors;
use crate::services::error::{TransformError, TransformResult};

/// Everything the matrix builder derives from one response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatmapMatrix {
    pub col_nodes: Vec<ColumnNode>,
    pub row_nodes: Vec<RowNode>,
    pub mat: Vec<Vec<u64>>,
    pub cat_colors: CatColors,
}

/// Build the widget model from a raw response.
///
/// The number of time buckets is taken from the first row of the first
/// heatmap; every other row must match it. Rows are emitted in outer
/// heatmap order, inner range order, with a globally incrementing bucket
/// counter. [`crate::services::flatten_ranges`] walks the same order, which
/// keeps tooltips aligned with matrix positions. An empty response is a
/// valid input and produces an all-empty model.
///
/// Every cell is offset by one so the renderer's log-scale color mapping
/// never sees a zero.
pub fn build_matrix(response: &RawHeatmapResponse) -> TransformResult<HeatmapMatrix> {
    let bucket_count = response
        .heatmaps
        .first()
        .and_then(|h| h.values.first())
        .map(Vec::len)
        .unwrap_or(0);

    let col_nodes: Vec<ColumnNode> = (0..bucket_count)
        .map(|idx| ColumnNode {
            name: format!("{idx}m"),
            col_index: idx,
            clust: bucket_count - idx,
            ini: bucket_count,
            rank: 0,
            rankvar: 0,
        })
        .collect();

    let mut row_nodes = Vec::new();
    let mut mat = Vec::new();
    let mut bucket_counter = 0usize;

    for (heatmap_idx, heatmap) in response.heatmaps.iter().enumerate() {
        if heatmap.ranges.len() != heatmap.values.len() {
            return Err(TransformError::RowCountMismatch {
                heatmap: heatmap_idx,
                ranges: heatmap.ranges.len(),
                values: heatmap.values.len(),
            });
        }

        let database = heatmap.labels.first().cloned().unwrap_or_default();
        let table = heatmap.labels.get(1).cloned().unwrap_or_default();
        let data_type = match heatmap.labels.get(2) {
            Some(label) if !label.is_empty() => format!("index {label}"),
            _ => "Data".to_string(),
        };

        for (row_idx, series) in heatmap.values.iter().enumerate() {
            if series.len() != bucket_count {
                return Err(TransformError::RaggedRow {
                    heatmap: heatmap_idx,
                    row: row_idx,
                    expected: bucket_count,
                    found: series.len(),
                });
            }

            row_nodes.push(RowNode {
                name: format!("Bucket: bucket-{bucket_counter}"),
                cat_0: database.clone(),
                cat_1: table.clone(),
                cat_2: data_type.clone(),
                clust: 0,
                ini: 0,
            });
            mat.push(series.iter().map(|v| v.saturating_add(1)).collect());
            bucket_counter += 1;
        }
    }

    let total_rows = row_nodes.len();
    for (idx, node) in row_nodes.iter_mut().enumerate() {
        node.clust = total_rows - idx;
        node.ini = total_rows - idx;
    }

    let cat_colors = CatColors {
        row: RowCategoryColors {
            cat_0: assigned_colors(&row_nodes, CategoryDimension::Database),
            cat_1: assigned_colors(&row_nodes, CategoryDimension::Table),
            cat_2: assigned_colors(&row_nodes, CategoryDimension::DataType),
        },
        col: Default::default(),
    };

    Ok(HeatmapMatrix {
        col_nodes,
        row_nodes,
        mat,
        cat_colors,
    })
}

/// Color map for one dimension with colorless values dropped, matching how
/// the widget payload serializes.
fn assigned_colors(
    row_nodes: &[RowNode],
    dimension: CategoryDimension,
) -> std::collections::HashMap<String, String> {
    assign_category_colors(row_nodes, dimension)
        .into_iter()
        .filter_map(|(value, color)| color.map(|c| (value, c.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Heatmap, KeyRange};
    use crate::services::colors::CATEGORY_PALETTE;
    use serde_json::json;

    fn range(start: &str, end: &str) -> KeyRange {
        KeyRange {
            start: json!(start),
            end: json!(end),
        }
    }

    fn single_heatmap_response() -> RawHeatmapResponse {
        RawHeatmapResponse {
            heatmaps: vec![Heatmap {
                labels: vec!["db1".into(), "t1".into()],
                ranges: vec![range("a", "b")],
                values: vec![vec![5, 10]],
            }],
        }
    }

    #[test]
    fn test_single_heatmap_two_buckets() {
        let matrix = build_matrix(&single_heatmap_response()).unwrap();

        assert_eq!(matrix.col_nodes.len(), 2);
        assert_eq!(matrix.col_nodes[0].name, "0m");
        assert_eq!(matrix.col_nodes[1].name, "1m");
        assert_eq!(matrix.col_nodes[0].clust, 2);
        assert_eq!(matrix.col_nodes[1].clust, 1);
        assert_eq!(matrix.col_nodes[0].ini, 2);
        assert_eq!(matrix.col_nodes[1].rank, 0);

        assert_eq!(matrix.row_nodes.len(), 1);
        let row = &matrix.row_nodes[0];
        assert_eq!(row.name, "Bucket: bucket-0");
        assert_eq!(row.cat_0, "db1");
        assert_eq!(row.cat_1, "t1");
        assert_eq!(row.cat_2, "Data");
        assert_eq!(row.clust, 1);
        assert_eq!(row.ini, 1);

        assert_eq!(matrix.mat, vec![vec![6, 11]]);
    }

    #[test]
    fn test_bucket_counter_spans_heatmaps() {
        let response = RawHeatmapResponse {
            heatmaps: vec![
                Heatmap {
                    labels: vec!["db1".into(), "t1".into()],
                    ranges: vec![range("a", "b")],
                    values: vec![vec![1, 2]],
                },
                Heatmap {
                    labels: vec!["db1".into(), "t2".into(), "idx1".into()],
                    ranges: vec![range("b", "c"), range("c", "d")],
                    values: vec![vec![3, 4], vec![5, 6]],
                },
            ],
        };

        let matrix = build_matrix(&response).unwrap();
        let names: Vec<&str> = matrix.row_nodes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Bucket: bucket-0", "Bucket: bucket-1", "Bucket: bucket-2"]
        );
        assert_eq!(matrix.row_nodes[1].cat_2, "index idx1");
        assert_eq!(matrix.row_nodes[0].clust, 3);
        assert_eq!(matrix.row_nodes[2].clust, 1);
        assert_eq!(matrix.mat[2], vec![6, 7]);
    }

    #[test]
    fn test_empty_response_builds_empty_model() {
        let matrix = build_matrix(&RawHeatmapResponse::default()).unwrap();
        assert!(matrix.col_nodes.is_empty());
        assert!(matrix.row_nodes.is_empty());
        assert!(matrix.mat.is_empty());
        assert!(matrix.cat_colors.row.cat_0.is_empty());
        assert!(matrix.cat_colors.row.cat_1.is_empty());
        assert!(matrix.cat_colors.row.cat_2.is_empty());
    }

    #[test]
    fn test_empty_third_label_derives_data() {
        let mut response = single_heatmap_response();
        response.heatmaps[0].labels = vec!["db1".into(), "t1".into(), String::new()];
        let matrix = build_matrix(&response).unwrap();
        assert_eq!(matrix.row_nodes[0].cat_2, "Data");
    }

    #[test]
    fn test_missing_labels_degrade_to_empty_categories() {
        let mut response = single_heatmap_response();
        response.heatmaps[0].labels.clear();
        let matrix = build_matrix(&response).unwrap();
        assert_eq!(matrix.row_nodes[0].cat_0, "");
        assert_eq!(matrix.row_nodes[0].cat_1, "");
        assert_eq!(matrix.row_nodes[0].cat_2, "Data");
    }

    #[test]
    fn test_row_count_mismatch_is_typed() {
        let mut response = single_heatmap_response();
        response.heatmaps[0].ranges.push(range("b", "c"));
        let err = build_matrix(&response).unwrap_err();
        assert_eq!(
            err,
            TransformError::RowCountMismatch {
                heatmap: 0,
                ranges: 2,
                values: 1
            }
        );
    }

    #[test]
    fn test_ragged_row_is_typed() {
        let response = RawHeatmapResponse {
            heatmaps: vec![
                Heatmap {
                    labels: vec!["db1".into(), "t1".into()],
                    ranges: vec![range("a", "b")],
                    values: vec![vec![1, 2]],
                },
                Heatmap {
                    labels: vec!["db1".into(), "t2".into()],
                    ranges: vec![range("b", "c")],
                    values: vec![vec![3]],
                },
            ],
        };
        let err = build_matrix(&response).unwrap_err();
        assert_eq!(
            err,
            TransformError::RaggedRow {
                heatmap: 1,
                row: 0,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_builder_is_pure() {
        let response = single_heatmap_response();
        assert_eq!(
            build_matrix(&response).unwrap(),
            build_matrix(&response).unwrap()
        );
    }

    #[test]
    fn test_category_colors_cover_observed_values() {
        let matrix = build_matrix(&single_heatmap_response()).unwrap();
        assert_eq!(
            matrix.cat_colors.row.cat_0.get("db1"),
            Some(&CATEGORY_PALETTE[1].to_string())
        );
        assert_eq!(
            matrix.cat_colors.row.cat_1.get("t1"),
            Some(&CATEGORY_PALETTE[2].to_string())
        );
        assert_eq!(
            matrix.cat_colors.row.cat_2.get("Data"),
            Some(&CATEGORY_PALETTE[3].to_string())
        );
    }
}
