//! Bounded ring of region snapshots.
//!
//! One slot per sampling tick; once full, the oldest snapshot is evicted.
//! The ring is the only state the collector keeps.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

use crate::models::{RegionInfo, RegionSnapshot};

/// Fixed-capacity ring buffer. One slot is kept spare to distinguish full
/// from empty.
#[derive(Debug)]
struct SnapshotRing {
    items: Vec<Option<RegionSnapshot>>,
    head: usize,
    tail: usize,
    size: usize,
    max_size: usize,
}

impl SnapshotRing {
    fn new(capacity: usize) -> Self {
        let size = capacity.max(1);
        let max_size = size + 1;
        Self {
            items: vec![None; max_size],
            head: 0,
            tail: 0,
            size,
            max_size,
        }
    }

    fn len(&self) -> usize {
        if self.head == self.tail {
            0
        } else if self.tail > self.head {
            self.tail - self.head
        } else {
            self.tail + self.max_size - self.head
        }
    }

    fn remaining(&self) -> usize {
        self.size - self.len()
    }

    fn push(&mut self, item: RegionSnapshot) {
        if self.remaining() == 0 {
            self.head = (self.head + 1) % self.max_size;
        }
        let tail = self.tail % self.max_size;
        self.items[tail] = Some(item);
        self.tail = (self.tail + 1) % self.max_size;
    }

    fn get(&self, index: usize) -> Option<&RegionSnapshot> {
        if index >= self.len() {
            return None;
        }
        self.items[(self.head + index) % self.max_size].as_ref()
    }
}

/// Thread-safe snapshot store shared by the sampler (writer) and request
/// handlers (readers).
#[derive(Debug)]
pub struct StatRing {
    inner: RwLock<SnapshotRing>,
}

impl StatRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(SnapshotRing::new(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record a snapshot taken now.
    pub fn append(&self, regions: Vec<RegionInfo>) {
        self.append_at(Utc::now(), regions);
    }

    /// Record a snapshot with an explicit timestamp.
    pub fn append_at(&self, time: DateTime<Utc>, regions: Vec<RegionInfo>) {
        self.inner.write().push(RegionSnapshot { time, regions });
    }

    /// Snapshots covering `[start_time, end_time)` at the given sampling
    /// interval, oldest first.
    ///
    /// The window is positioned by offset from the oldest stored snapshot
    /// and clamped into the stored range; a non-empty ring always yields at
    /// least one snapshot for a degenerate window.
    pub fn window(
        &self,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        interval: Duration,
    ) -> Vec<RegionSnapshot> {
        let ring = self.inner.read();
        let size = ring.len() as i64;
        if size == 0 {
            return Vec::new();
        }

        let first_time = match ring.get(0) {
            Some(first) => first.time,
            None => return Vec::new(),
        };

        let interval_secs = interval.num_seconds().max(1);
        let mut count = (end_time - start_time).num_seconds() / interval_secs;

        let mut offset = (start_time - first_time).num_seconds() / interval_secs;
        if offset >= size {
            offset = size - 1;
        } else if offset < 0 {
            offset = 0;
        }

        let left = size - offset;
        if count > left {
            count = left;
        } else if count == 0 {
            count = 1;
        }

        (0..count.max(0))
            .filter_map(|i| ring.get((offset + i) as usize).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, minute, 0).unwrap()
    }

    fn region(id: u64) -> RegionInfo {
        RegionInfo {
            id,
            start_key: String::new(),
            end_key: String::new(),
            written_bytes: 0,
            read_bytes: 0,
            written_keys: 0,
            read_keys: 0,
        }
    }

    fn seeded_ring(capacity: usize, minutes: u32) -> StatRing {
        let ring = StatRing::new(capacity);
        for m in 0..minutes {
            ring.append_at(at(m), vec![region(m as u64)]);
        }
        ring
    }

    #[test]
    fn test_push_past_capacity_evicts_oldest() {
        let ring = seeded_ring(3, 5);
        assert_eq!(ring.len(), 3);
        let window = ring.window(at(0), at(10), Duration::minutes(1));
        let ids: Vec<u64> = window.iter().map(|s| s.regions[0].id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn test_window_selects_offset_and_count() {
        let ring = seeded_ring(10, 6);
        let window = ring.window(at(2), at(4), Duration::minutes(1));
        let ids: Vec<u64> = window.iter().map(|s| s.regions[0].id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_window_clamps_start_before_first_sample() {
        let ring = seeded_ring(10, 3);
        let window = ring.window(at(0) - Duration::hours(1), at(2), Duration::minutes(1));
        assert_eq!(window.len(), 3);
        assert_eq!(window[0].regions[0].id, 0);
    }

    #[test]
    fn test_window_clamps_start_past_last_sample() {
        let ring = seeded_ring(10, 3);
        let window = ring.window(at(30), at(31), Duration::minutes(1));
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].regions[0].id, 2);
    }

    #[test]
    fn test_degenerate_window_returns_one_snapshot() {
        let ring = seeded_ring(10, 3);
        let window = ring.window(at(1), at(1), Duration::minutes(1));
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].regions[0].id, 1);
    }

    #[test]
    fn test_empty_ring_returns_no_snapshots() {
        let ring = StatRing::new(4);
        assert!(ring.window(at(0), at(5), Duration::minutes(1)).is_empty());
        assert!(ring.is_empty());
    }
}
