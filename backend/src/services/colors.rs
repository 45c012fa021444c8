//! Deterministic category color assignment.

use std::collections::HashMap;

use crate::api::{CategoryDimension, RowNode};

/// Fixed palette shared with the widget's stylesheet. Order matters: the
/// assignment formula indexes into it.
pub const CATEGORY_PALETTE: [&str; 35] = [
    "#393b79", "#aec7e8", "#ff7f0e", "#ffbb78", "#98df8a", "#bcbd22", "#404040",
    "#ff9896", "#c5b0d5", "#8c564b", "#1f77b4", "#5254a3", "#FFDB58", "#c49c94",
    "#e377c2", "#7f7f7f", "#2ca02c", "#9467bd", "#dbdb8d", "#17becf", "#637939",
    "#6b6ecf", "#9c9ede", "#d62728", "#8ca252", "#8c6d31", "#bd9e39", "#e7cb94",
    "#843c39", "#ad494a", "#d6616b", "#7b4173", "#a55194", "#ce6dbd", "#de9ed6",
];

/// Assign a palette color to each distinct value of one category dimension.
///
/// Distinct values are collected in first-seen order; the value at set
/// position `idx` gets `palette[(idx + 1) * dim]`, falling back to
/// `palette[4 + idx]` when that index is out of bounds. A value whose
/// fallback index is also out of bounds gets `None`. The formula is kept
/// for output compatibility with existing deployments: distinct values can
/// collide on the same color, and that is accepted.
pub fn assign_category_colors(
    row_nodes: &[RowNode],
    dimension: CategoryDimension,
) -> HashMap<String, Option<&'static str>> {
    let dim = dimension.number();

    let mut distinct: Vec<&str> = Vec::new();
    for node in row_nodes {
        let value = node.category(dimension);
        if !distinct.contains(&value) {
            distinct.push(value);
        }
    }

    let mut colors = HashMap::with_capacity(distinct.len());
    for (idx, value) in distinct.into_iter().enumerate() {
        let color = CATEGORY_PALETTE
            .get((idx + 1) * dim)
            .or_else(|| CATEGORY_PALETTE.get(4 + idx))
            .copied();
        colors.insert(value.to_string(), color);
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(db: &str, table: &str, data_type: &str) -> RowNode {
        RowNode {
            name: String::new(),
            cat_0: db.to_string(),
            cat_1: table.to_string(),
            cat_2: data_type.to_string(),
            clust: 0,
            ini: 0,
        }
    }

    #[test]
    fn test_formula_uses_dimension_scaled_index() {
        let nodes = vec![node("db1", "t1", "Data"), node("db2", "t1", "Data")];

        let colors = assign_category_colors(&nodes, CategoryDimension::Database);
        assert_eq!(colors["db1"], Some(CATEGORY_PALETTE[1]));
        assert_eq!(colors["db2"], Some(CATEGORY_PALETTE[2]));

        let colors = assign_category_colors(&nodes, CategoryDimension::Table);
        assert_eq!(colors["t1"], Some(CATEGORY_PALETTE[2]));

        let colors = assign_category_colors(&nodes, CategoryDimension::DataType);
        assert_eq!(colors["Data"], Some(CATEGORY_PALETTE[3]));
    }

    #[test]
    fn test_out_of_palette_falls_back() {
        // 13 distinct data types: idx 11 maps to (11 + 1) * 3 = 36, past the
        // 35-entry palette, so it takes palette[4 + 11].
        let nodes: Vec<RowNode> = (0..13)
            .map(|i| node("db", "t", &format!("index k{i}")))
            .collect();

        let colors = assign_category_colors(&nodes, CategoryDimension::DataType);
        assert_eq!(colors["index k10"], Some(CATEGORY_PALETTE[33]));
        assert_eq!(colors["index k11"], Some(CATEGORY_PALETTE[15]));
        assert_eq!(colors["index k12"], Some(CATEGORY_PALETTE[16]));
    }

    #[test]
    fn test_fallback_exhaustion_yields_none() {
        // Distinct value 35 (idx 34): primary 35 and fallback 38 both miss.
        let nodes: Vec<RowNode> = (0..35).map(|i| node(&format!("db{i}"), "t", "Data")).collect();

        let colors = assign_category_colors(&nodes, CategoryDimension::Database);
        assert_eq!(colors["db34"], None);
        assert_eq!(colors.len(), 35);
    }

    #[test]
    fn test_assignment_is_deterministic() {
        let nodes = vec![
            node("dbB", "t1", "Data"),
            node("dbA", "t2", "Data"),
            node("dbB", "t3", "Data"),
        ];
        let first = assign_category_colors(&nodes, CategoryDimension::Database);
        let second = assign_category_colors(&nodes, CategoryDimension::Database);
        assert_eq!(first, second);
        // First-seen order decides the index, not lexical order.
        assert_eq!(first["dbB"], Some(CATEGORY_PALETTE[1]));
        assert_eq!(first["dbA"], Some(CATEGORY_PALETTE[2]));
    }

    #[test]
    fn test_empty_rows_yield_empty_map() {
        assert!(assign_category_colors(&[], CategoryDimension::Table).is_empty());
    }
}
