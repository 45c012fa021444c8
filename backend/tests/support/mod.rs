//! Shared fixtures: a synthetic heatmap/region generator for tests and
//! local development. Values are deterministic, never sampled from a live
//! cluster.

#![allow(dead_code)]

use std::collections::BTreeMap;

use serde_json::json;

use keyviz::collector::TableMeta;
use keyviz::models::keys::record_prefix;
use keyviz::models::{Heatmap, KeyRange, RawHeatmapResponse, RegionInfo};

/// A labeled heatmap with `rows` key ranges and `buckets` time buckets.
/// Cell values follow a simple deterministic ramp.
pub fn synthetic_heatmap(index: usize, rows: usize, buckets: usize) -> Heatmap {
    let ranges = (0..rows)
        .map(|r| KeyRange {
            start: json!(format!("k{index}-{r}")),
            end: json!(format!("k{index}-{}", r + 1)),
        })
        .collect();
    let values = (0..rows)
        .map(|r| (0..buckets).map(|b| (index * 100 + r * 10 + b) as u64).collect())
        .collect();

    Heatmap {
        labels: vec![format!("db{index}"), format!("table{index}")],
        ranges,
        values,
    }
}

/// A response with one heatmap per entry of `rows_per_heatmap`, all sharing
/// `buckets` time buckets.
pub fn synthetic_response(rows_per_heatmap: &[usize], buckets: usize) -> RawHeatmapResponse {
    RawHeatmapResponse {
        heatmaps: rows_per_heatmap
            .iter()
            .enumerate()
            .map(|(i, &rows)| synthetic_heatmap(i, rows, buckets))
            .collect(),
    }
}

/// Regions tiling the record ranges of the given tables, closed by an
/// unbounded tail region.
pub fn synthetic_regions(table_ids: &[i64], written_bytes: u64) -> Vec<RegionInfo> {
    let mut regions: Vec<RegionInfo> = table_ids
        .iter()
        .enumerate()
        .map(|(i, &id)| RegionInfo {
            id: i as u64 + 1,
            start_key: record_prefix(id),
            end_key: record_prefix(id + 1),
            written_bytes,
            read_bytes: written_bytes / 2,
            written_keys: 0,
            read_keys: 0,
        })
        .collect();

    let tail_start = table_ids
        .iter()
        .max()
        .map(|&id| record_prefix(id + 1))
        .unwrap_or_default();
    regions.push(RegionInfo {
        id: regions.len() as u64 + 1,
        start_key: tail_start,
        end_key: String::new(),
        written_bytes: 0,
        read_bytes: 0,
        written_keys: 0,
        read_keys: 0,
    });
    regions
}

/// A catalog naming one table per id, no indexes.
pub fn synthetic_tables(table_ids: &[i64]) -> Vec<TableMeta> {
    table_ids
        .iter()
        .map(|&id| TableMeta {
            id,
            db: "shop".to_string(),
            name: format!("table{id}"),
            indices: BTreeMap::new(),
        })
        .collect()
}
