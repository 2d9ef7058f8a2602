//! Date/Time Cells
//!
//! Source files carry dates as free-form text. Answers echo the text
//! exactly as it appears in the file, while ordering uses the parsed
//! value whenever the text matches one of the known layouts.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Date-time layouts tried in order
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts, read as midnight
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// A chronologically orderable cell that remembers its source text
#[derive(Debug, Clone)]
pub struct Timestamp {
    raw: String,
    parsed: Option<NaiveDateTime>,
}

impl Timestamp {
    /// Parse a cell, keeping the trimmed text for display
    pub fn parse(text: &str) -> Self {
        let raw = text.trim().to_string();
        let parsed = parse_datetime(&raw);
        Self { raw, parsed }
    }

    /// Text as it appeared in the source
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the cell is blank or a missing-value token
    pub fn is_missing(&self) -> bool {
        crate::is_missing(&self.raw)
    }

    /// Parsed value, if the text matched a known layout
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        self.parsed
    }
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

impl From<&str> for Timestamp {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// Unparseable cells sort before every parsed one so the order stays total.
impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.parsed, other.parsed) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.raw.cmp(&other.raw)),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => self.raw.cmp(&other.raw),
        }
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timestamp {}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Self::parse(&text))
    }
}
