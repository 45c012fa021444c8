//! Heatmap construction from time-ordered region snapshots.
//!
//! The key space is split on every region start key seen across the
//! window, each region's metric is spread evenly over the ranges it
//! covers, and the result is squashed down to a bucket budget.

use tracing::warn;

use crate::models::keys::decode_key;
use crate::models::{Heatmap, KeyRange, MetricTag, RegionInfo};

/// Raw string boundaries of one row before key decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeBounds {
    pub start: String,
    pub end: String,
}

/// Split the key space on the distinct start keys of every snapshot.
///
/// Ranges come out sorted and contiguous; the final range ends at the
/// first snapshot's last end key (empty = unbounded). Empty input yields
/// no ranges.
pub fn build_ranges(snapshots: &[Vec<RegionInfo>]) -> Vec<RangeBounds> {
    let keys: std::collections::BTreeSet<&str> = snapshots
        .iter()
        .flatten()
        .map(|r| r.start_key.as_str())
        .collect();
    let keys: Vec<&str> = keys.into_iter().collect();

    let Some(&last_key) = keys.last() else {
        return Vec::new();
    };

    let mut ranges: Vec<RangeBounds> = keys
        .windows(2)
        .map(|pair| RangeBounds {
            start: pair[0].to_string(),
            end: pair[1].to_string(),
        })
        .collect();

    let last_end = snapshots
        .first()
        .and_then(|regions| regions.last())
        .map(|r| r.end_key.clone())
        .unwrap_or_default();
    ranges.push(RangeBounds {
        start: last_key.to_string(),
        end: last_end,
    });
    ranges
}

/// Distribute one snapshot's region metrics into the value matrix column
/// `column`.
///
/// A region spanning several ranges contributes `value / span` to each.
/// Regions whose start key is not a range boundary are skipped with a
/// warning; that only happens when `ranges` was built from a different
/// window.
pub fn accumulate_values(
    ranges: &[RangeBounds],
    values: &mut [Vec<u64>],
    regions: &[RegionInfo],
    column: usize,
    tag: MetricTag,
) {
    let mut start_index = 0usize;
    for region in regions {
        while start_index < ranges.len() && ranges[start_index].start != region.start_key {
            start_index += 1;
        }
        if start_index == ranges.len() {
            warn!(region = region.id, "region start key outside range set");
            break;
        }

        let mut next_index = start_index;
        while next_index < ranges.len() {
            let matched = ranges[next_index].end == region.end_key;
            next_index += 1;
            if matched {
                break;
            }
        }

        let span = next_index - start_index;
        if span == 0 {
            continue;
        }
        let share = tag.value_of(region) / span as u64;
        for row in &mut values[start_index..next_index] {
            row[column] += share;
        }

        start_index = next_index;
    }
}

/// Merge adjacent ranges until at most `max_buckets` remain, summing their
/// value rows.
pub fn squash_ranges(
    ranges: Vec<RangeBounds>,
    values: Vec<Vec<u64>>,
    max_buckets: usize,
) -> (Vec<RangeBounds>, Vec<Vec<u64>>) {
    let n = ranges.len().min(max_buckets);
    if n == 0 {
        return (Vec::new(), Vec::new());
    }

    let step = (ranges.len() + 1) / n;
    let mut new_ranges = Vec::with_capacity(n);
    let mut new_values = Vec::with_capacity(n);

    for i in 0..n {
        let index = i * step;
        if index >= ranges.len() {
            break;
        }
        let mut bounds = ranges[index].clone();
        let mut row = values[index].clone();
        for j in 1..step {
            let Some(merged) = ranges.get(index + j) else {
                break;
            };
            bounds.end = merged.end.clone();
            for (k, v) in values[index + j].iter().enumerate() {
                row[k] += v;
            }
        }
        new_ranges.push(bounds);
        new_values.push(row);
    }

    (new_ranges, new_values)
}

/// Build one heatmap (without labels) from the snapshots of a window.
pub fn build_heatmap(snapshots: &[Vec<RegionInfo>], max_buckets: usize, tag: MetricTag) -> Heatmap {
    let ranges = build_ranges(snapshots);
    let mut values = vec![vec![0u64; snapshots.len()]; ranges.len()];
    for (column, regions) in snapshots.iter().enumerate() {
        accumulate_values(&ranges, &mut values, regions, column, tag);
    }

    let (ranges, values) = squash_ranges(ranges, values, max_buckets);
    let ranges = ranges
        .into_iter()
        .map(|b| KeyRange {
            start: serde_json::to_value(decode_key(&b.start)).unwrap_or_default(),
            end: serde_json::to_value(decode_key(&b.end)).unwrap_or_default(),
        })
        .collect();

    Heatmap {
        labels: Vec::new(),
        ranges,
        values,
    }
}
