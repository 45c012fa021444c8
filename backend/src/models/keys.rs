//! Key codec for table record and index prefixes.
//!
//! Region keys are hex-encoded strings whose underlying payload follows a
//! simple layout: `t<table-id><kind><suffix>` where `<table-id>` is 16 hex
//! digits and `<kind>` is `_i<index-id>` for index keys or `_r` for record
//! keys. Hex encoding of the payload preserves lexicographic order, so the
//! rest of the system can treat keys as opaque ordered strings. Decoding is
//! best-effort: anything that does not match the layout keeps only its
//! original text in `desc`.

use serde::{Deserialize, Serialize};

const TABLE_ID_HEX_LEN: usize = 16;

/// Best-effort structured view of a region key, used for tooltips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedKey {
    /// The key as received (hex text), always present.
    pub desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<String>,
}

fn encode(payload: String) -> String {
    hex::encode(payload.as_bytes())
}

/// Prefix covering every key of `table_id` (indexes and records alike).
pub fn table_prefix(table_id: i64) -> String {
    encode(format!("t{:016x}", table_id))
}

/// Prefix covering the record keys of `table_id`.
pub fn record_prefix(table_id: i64) -> String {
    encode(format!("t{:016x}_r", table_id))
}

/// Prefix covering the keys of one index of `table_id`.
pub fn index_prefix(table_id: i64, index_id: i64) -> String {
    encode(format!("t{:016x}_i{:016x}", table_id, index_id))
}

fn parse_hex_id(digits: &str) -> Option<i64> {
    if digits.len() != TABLE_ID_HEX_LEN {
        return None;
    }
    i64::from_str_radix(digits, 16).ok()
}

/// Decode a region key back into its structured parts.
///
/// Undecodable keys (empty boundaries, foreign formats) are not an error;
/// they come back with only `desc` set.
pub fn decode_key(key: &str) -> DecodedKey {
    let mut decoded = DecodedKey {
        desc: key.to_string(),
        ..Default::default()
    };

    let payload = match hex::decode(key).ok().and_then(|b| String::from_utf8(b).ok()) {
        Some(p) => p,
        None => return decoded,
    };

    let Some(rest) = payload.strip_prefix('t') else {
        return decoded;
    };
    if rest.len() < TABLE_ID_HEX_LEN {
        return decoded;
    }
    let (id_digits, rest) = rest.split_at(TABLE_ID_HEX_LEN);
    let Some(table_id) = parse_hex_id(id_digits) else {
        return decoded;
    };
    decoded.table_id = Some(table_id);

    if let Some(suffix) = rest.strip_prefix("_r") {
        if !suffix.is_empty() {
            decoded.row = Some(suffix.to_string());
        }
    } else if let Some(suffix) = rest.strip_prefix("_i") {
        if suffix.len() >= TABLE_ID_HEX_LEN {
            let (idx_digits, remainder) = suffix.split_at(TABLE_ID_HEX_LEN);
            decoded.index_id = parse_hex_id(idx_digits);
            if !remainder.is_empty() {
                decoded.row = Some(remainder.to_string());
            }
        }
    }

    decoded
}
