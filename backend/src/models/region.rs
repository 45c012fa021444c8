//! Region statistics reported by the upstream placement driver.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One contiguous key range with its traffic counters.
///
/// Keys are hex-encoded, lexicographically ordered strings; an empty
/// `end_key` means the range is unbounded on the right. Counters are
/// omitted by the upstream when zero, hence the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionInfo {
    pub id: u64,
    pub start_key: String,
    pub end_key: String,
    #[serde(default)]
    pub written_bytes: u64,
    #[serde(default)]
    pub read_bytes: u64,
    #[serde(default)]
    pub written_keys: u64,
    #[serde(default)]
    pub read_keys: u64,
}

/// All regions observed at one sampling tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionSnapshot {
    pub time: DateTime<Utc>,
    pub regions: Vec<RegionInfo>,
}

/// Metric selected by the `tag` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricTag {
    #[default]
    WrittenBytes,
    ReadBytes,
}

impl MetricTag {
    /// Parse a tag, case-insensitively. Unknown or empty tags fall back to
    /// `written_bytes`, matching the original collector's behavior.
    pub fn parse(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "read_bytes" => MetricTag::ReadBytes,
            _ => MetricTag::WrittenBytes,
        }
    }

    /// Extract the selected counter from a region.
    pub fn value_of(self, region: &RegionInfo) -> u64 {
        match self {
            MetricTag::WrittenBytes => region.written_bytes,
            MetricTag::ReadBytes => region.read_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(written: u64, read: u64) -> RegionInfo {
        RegionInfo {
            id: 1,
            start_key: String::new(),
            end_key: String::new(),
            written_bytes: written,
            read_bytes: read,
            written_keys: 0,
            read_keys: 0,
        }
    }

    #[test]
    fn test_parse_tag_known_values() {
        assert_eq!(MetricTag::parse("written_bytes"), MetricTag::WrittenBytes);
        assert_eq!(MetricTag::parse("READ_BYTES"), MetricTag::ReadBytes);
    }

    #[test]
    fn test_parse_tag_unknown_defaults_to_written() {
        assert_eq!(MetricTag::parse(""), MetricTag::WrittenBytes);
        assert_eq!(MetricTag::parse("garbage"), MetricTag::WrittenBytes);
    }

    #[test]
    fn test_value_of_selects_counter() {
        let r = region(10, 20);
        assert_eq!(MetricTag::WrittenBytes.value_of(&r), 10);
        assert_eq!(MetricTag::ReadBytes.value_of(&r), 20);
    }

    #[test]
    fn test_region_deserializes_with_missing_counters() {
        let r: RegionInfo =
            serde_json::from_str(r#"{"id":7,"start_key":"aa","end_key":"bb"}"#).unwrap();
        assert_eq!(r.id, 7);
        assert_eq!(r.written_bytes, 0);
        assert_eq!(r.read_keys, 0);
    }
}
