//! Calendar date value type.
//!
//! # Responsibility
//! - Validate and carry `YYYY-MM-DD` date strings.
//!
//! # Invariants
//! - A constructed `CalendarDate` always holds a well-formed date string.
//! - Dates have no time component; "today" is always supplied by the caller.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid date regex"));

/// Calendar date in `YYYY-MM-DD` form, the storage and wire shape for all
/// task and ledger dates.
///
/// Kept as a validated newtype so repositories can bind it directly as SQL
/// text without re-checking the format.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(String);

/// Rejection reason for malformed date input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// Input does not match `YYYY-MM-DD`.
    Format(String),
    /// Month or day component is out of range.
    OutOfRange(String),
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format(value) => write!(f, "date `{value}` is not in YYYY-MM-DD form"),
            Self::OutOfRange(value) => write!(f, "date `{value}` has an out-of-range component"),
        }
    }
}

impl Error for DateParseError {}

impl CalendarDate {
    /// Parses and validates a `YYYY-MM-DD` string.
    pub fn parse(value: &str) -> Result<Self, DateParseError> {
        let trimmed = value.trim();
        let captures = DATE_RE
            .captures(trimmed)
            .ok_or_else(|| DateParseError::Format(value.to_string()))?;

        let month: u32 = captures[2]
            .parse()
            .map_err(|_| DateParseError::Format(value.to_string()))?;
        let day: u32 = captures[3]
            .parse()
            .map_err(|_| DateParseError::Format(value.to_string()))?;

        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(DateParseError::OutOfRange(value.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the canonical `YYYY-MM-DD` text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CalendarDate {
    type Err = DateParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = DateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CalendarDate> for String {
    fn from(value: CalendarDate) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::{CalendarDate, DateParseError};

    #[test]
    fn parse_accepts_well_formed_date() {
        let date = CalendarDate::parse("2024-01-01").expect("well-formed date should parse");
        assert_eq!(date.as_str(), "2024-01-01");
        assert_eq!(date.to_string(), "2024-01-01");
    }

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let date = CalendarDate::parse(" 2024-06-15 ").expect("padded date should parse");
        assert_eq!(date.as_str(), "2024-06-15");
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for input in ["2024/01/01", "01-01-2024", "2024-1-1", "not a date", ""] {
            let err = CalendarDate::parse(input).expect_err("malformed date must be rejected");
            assert!(matches!(err, DateParseError::Format(_)), "input: {input}");
        }
    }

    #[test]
    fn parse_rejects_out_of_range_components() {
        for input in ["2024-13-01", "2024-00-10", "2024-02-32", "2024-05-00"] {
            let err = CalendarDate::parse(input).expect_err("out-of-range date must be rejected");
            assert!(matches!(err, DateParseError::OutOfRange(_)), "input: {input}");
        }
    }

    #[test]
    fn dates_order_lexicographically_by_calendar_order() {
        let earlier = CalendarDate::parse("2024-01-31").unwrap();
        let later = CalendarDate::parse("2024-02-01").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn serde_round_trips_as_plain_string() {
        let date = CalendarDate::parse("2024-03-09").unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2024-03-09\"");

        let back: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);

        serde_json::from_str::<CalendarDate>("\"2024-99-01\"")
            .expect_err("invalid date must fail deserialization");
    }
}
