//! Day-granularity grouping key.
//!
//! # Responsibility
//! - Truncate dates to the calendar day in the device's local time zone.
//! - Convert to and from the canonical `YYYY-MM-DD` form.
//!
//! # Invariants
//! - Ordering of keys is chronological, which matches ISO string ordering.
//! - Parsing accepts exactly `YYYY-MM-DD`; no other spelling maps to a key.
//! - Only years `0000..=9999` form keys, so every key round-trips through
//!   its string form.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";
const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;

/// Calendar day used to group tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Key of a calendar date, or `None` when its year has no four-digit form.
    pub fn of(date: NaiveDate) -> Option<Self> {
        (MIN_YEAR..=MAX_YEAR)
            .contains(&date.year())
            .then_some(Self(date))
    }

    /// Key of the local calendar day containing `instant`.
    pub fn of_instant<Tz: TimeZone>(instant: &DateTime<Tz>) -> Option<Self> {
        Self::of(instant.with_timezone(&Local).date_naive())
    }

    /// Key of the current local day.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

/// Rejected date key text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateKeyParseError {
    input: String,
}

impl DateKeyParseError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl Display for DateKeyParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid date key `{}`; expected YYYY-MM-DD", self.input)
    }
}

impl Error for DateKeyParseError {}

impl FromStr for DateKey {
    type Err = DateKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DateKeyParseError {
            input: s.to_string(),
        };
        if !has_iso_date_shape(s) {
            return Err(err());
        }
        NaiveDate::parse_from_str(s, DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|_| err())
    }
}

// chrono accepts unpadded fields, so the fixed-width shape is checked first.
fn has_iso_date_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

impl Serialize for DateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D>(deserializer: D) -> Result<DateKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
