//! Table catalog and per-table heatmap grouping.

use std::collections::BTreeMap;

use crate::collector::histogram::build_heatmap;
use crate::models::{keys, Heatmap, MetricTag, RegionInfo};

/// Naming metadata for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMeta {
    pub id: i64,
    pub db: String,
    pub name: String,
    /// Index id → index name, iterated in id order.
    pub indices: BTreeMap<i64, String>,
}

/// All known tables, ordered by (database, table name) so heatmaps come out
/// in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCatalog {
    tables: Vec<TableMeta>,
}

impl TableCatalog {
    pub fn new(mut tables: Vec<TableMeta>) -> Self {
        tables.sort_by(|a, b| a.db.cmp(&b.db).then_with(|| a.name.cmp(&b.name)));
        Self { tables }
    }

    pub fn tables(&self) -> &[TableMeta] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Index of the region containing `key`, if any.
///
/// Regions are assumed sorted by start key. An empty end key on the last
/// region means it is unbounded and catches everything past its start.
fn search_region(key: &str, regions: &[RegionInfo]) -> Option<usize> {
    if regions.is_empty() {
        return None;
    }

    let i = regions.partition_point(|r| r.start_key.as_str() < key);
    if i < regions.len() {
        if regions[i].start_key == key {
            return Some(i);
        }
        if i > 0 && regions[i - 1].end_key.as_str() > key {
            return Some(i - 1);
        }
    }

    if regions[regions.len() - 1].end_key.is_empty() {
        return Some(regions.len() - 1);
    }

    None
}

/// Half-open index range of the regions overlapping `[start, end)`.
fn range_region_indices(start: &str, end: &str, regions: &[RegionInfo]) -> (usize, usize) {
    let (Some(start_index), Some(mut end_index)) =
        (search_region(start, regions), search_region(end, regions))
    else {
        return (0, 0);
    };

    let last = &regions[end_index];
    if last.end_key.is_empty() || (last.end_key.as_str() > end && last.start_key != end) {
        end_index += 1;
    }

    if start_index > end_index {
        return (0, 0);
    }
    (start_index, end_index)
}

/// Restrict every snapshot of the window to the regions overlapping
/// `[start, end)`.
fn slice_window(start: &str, end: &str, snapshots: &[Vec<RegionInfo>]) -> Vec<Vec<RegionInfo>> {
    snapshots
        .iter()
        .map(|regions| {
            let (start_index, end_index) = range_region_indices(start, end, regions);
            regions[start_index..end_index].to_vec()
        })
        .collect()
}

/// Build labeled heatmaps for every cataloged table: one for its record
/// range and one per index. Tables with no traffic in the window are
/// skipped so consumers never see an empty value grid.
pub fn table_heatmaps(
    catalog: &TableCatalog,
    snapshots: &[Vec<RegionInfo>],
    max_buckets: usize,
    tag: MetricTag,
) -> Vec<Heatmap> {
    let mut heatmaps = Vec::new();

    for table in catalog.tables() {
        let start = keys::record_prefix(table.id);
        let end = keys::record_prefix(table.id + 1);
        let mut heatmap = build_heatmap(&slice_window(&start, &end, snapshots), max_buckets, tag);
        if !heatmap.ranges.is_empty() {
            heatmap.labels = vec![table.db.clone(), table.name.clone(), String::new()];
            heatmaps.push(heatmap);
        }

        for (&index_id, index_name) in &table.indices {
            let start = keys::index_prefix(table.id, index_id);
            let end = keys::index_prefix(table.id, index_id + 1);
            let mut heatmap =
                build_heatmap(&slice_window(&start, &end, snapshots), max_buckets, tag);
            if !heatmap.ranges.is_empty() {
                heatmap.labels = vec![table.db.clone(), table.name.clone(), index_name.clone()];
                heatmaps.push(heatmap);
            }
        }
    }

    heatmaps
}
