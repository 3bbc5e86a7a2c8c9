//! Bucket keys for the daily, weekly and monthly series.
//!
//! Each key is a small value type with a chronological [`Ord`]; the string
//! form only appears when a report is serialized.

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar day, rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(pub NaiveDate);

impl Day {
    /// Parses a zero-padded `YYYY-MM-DD` cell. Returns `None` for empty or
    /// malformed text, including unpadded forms such as `2024-1-5`.
    pub fn parse(raw: &str) -> Option<Day> {
        let raw = raw.trim();
        let bytes = raw.as_bytes();
        let well_formed = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !well_formed {
            return None;
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().map(Day)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// A numbered week within a year, rendered as `YYYY-W{n}` (no zero padding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Week {
    pub year: i32,
    pub week: u32,
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{}", self.year, self.week)
    }
}

/// A calendar month, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn of(day: Day) -> Month {
        Month {
            year: day.0.year(),
            month: day.0.month(),
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

macro_rules! serialize_as_display {
    ($($ty:ty),*) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }
        )*
    };
}

serialize_as_display!(Day, Week, Month);

/// How days are assigned to week buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekNumbering {
    /// Sunday-start weeks counted from January 1st of the calendar year:
    /// `ceil((day_of_year0 + weekday(jan1) + 1) / 7)` with Sunday = 0.
    /// Disagrees with ISO-8601 around year boundaries and can reach week 54.
    #[default]
    Legacy,
    /// ISO-8601 week-year and week number (Monday start).
    Iso8601,
}

impl WeekNumbering {
    pub fn week_of(self, day: Day) -> Week {
        let date = day.0;
        match self {
            WeekNumbering::Legacy => {
                let ordinal0 = date.ordinal0() as i64;
                let jan1_weekday =
                    (date.weekday().num_days_from_sunday() as i64 - ordinal0).rem_euclid(7);
                // ceil(n / 7) for positive n
                let week = (ordinal0 + jan1_weekday + 1 + 6) / 7;
                Week {
                    year: date.year(),
                    week: week as u32,
                }
            }
            WeekNumbering::Iso8601 => {
                let iso = date.iso_week();
                Week {
                    year: iso.year(),
                    week: iso.week(),
                }
            }
        }
    }
}

impl FromStr for WeekNumbering {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(WeekNumbering::Legacy),
            "iso" | "iso8601" => Ok(WeekNumbering::Iso8601),
            other => Err(anyhow::anyhow!(
                "unknown week numbering '{other}' (expected 'legacy' or 'iso8601')"
            )),
        }
    }
}

impl fmt::Display for WeekNumbering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekNumbering::Legacy => f.write_str("legacy"),
            WeekNumbering::Iso8601 => f.write_str("iso8601"),
        }
    }
}
