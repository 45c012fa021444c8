//! Relative-duration parsing for the `start`/`end` query parameters.
//!
//! The wire format is the Go duration syntax the original API used:
//! an optional sign followed by one or more `<number><unit>` terms, e.g.
//! `-60m`, `90s`, `1h30m`. Supported units are `h`, `m`, `s` and `ms`.

use chrono::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DurationParseError {
    #[error("empty duration")]
    Empty,
    #[error("invalid duration term: {0}")]
    InvalidTerm(String),
}

/// Parse a relative duration such as `-60m` into a signed [`Duration`].
pub fn parse_relative_duration(input: &str) -> Result<Duration, DurationParseError> {
    let trimmed = input.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if body.is_empty() {
        return Err(DurationParseError::Empty);
    }

    let mut total_ms: i64 = 0;
    let mut rest = body;
    while !rest.is_empty() {
        let digits_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if digits_end == 0 {
            return Err(DurationParseError::InvalidTerm(rest.to_string()));
        }
        let (digits, tail) = rest.split_at(digits_end);
        let value: i64 = digits
            .parse()
            .map_err(|_| DurationParseError::InvalidTerm(rest.to_string()))?;

        let (unit_ms, tail) = if let Some(t) = tail.strip_prefix("ms") {
            (1, t)
        } else if let Some(t) = tail.strip_prefix('h') {
            (3_600_000, t)
        } else if let Some(t) = tail.strip_prefix('m') {
            (60_000, t)
        } else if let Some(t) = tail.strip_prefix('s') {
            (1_000, t)
        } else {
            return Err(DurationParseError::InvalidTerm(rest.to_string()));
        };

        total_ms += value * unit_ms;
        rest = tail;
    }

    if negative {
        total_ms = -total_ms;
    }
    Ok(Duration::milliseconds(total_ms))
}
