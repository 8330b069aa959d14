//! Clock times and weekday model.
//!
//! Class times in the timetable dataset are written as `H:MM` or `HH:MM`
//! without an AM/PM marker. Classes run from 8:00 through 7:45 in the
//! evening, so hours `1..=7` are read as afternoon/evening hours.
//!
//! # Time Model
//! All times are minutes since midnight. Intervals are half-open
//! `[start, end)`: a class ending at 9:30 does not overlap one starting
//! at 9:30.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minutes since midnight.
pub type Minutes = u16;

/// Value returned by [`parse_time`] for strings that are not `H:MM`/`HH:MM`.
pub const MIDNIGHT: Minutes = 0;

/// Parses a clock string into minutes since midnight.
///
/// Returns `None` for anything that is not `H:MM` or `HH:MM` with a
/// two-digit minute field below 60 and an hour below 24.
///
/// Hours `1..=7` are shifted by twelve hours; `0` and `8..=12` are kept.
pub fn try_parse_time(text: &str) -> Option<Minutes> {
    let text = text.trim();
    let (hours, minutes) = text.split_once(':')?;

    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return None;
    }
    if !hours.bytes().all(|b| b.is_ascii_digit()) || !minutes.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let mut hours: Minutes = hours.parse().ok()?;
    let minutes: Minutes = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    if (1..=7).contains(&hours) {
        hours += 12;
    }

    Some(hours * 60 + minutes)
}

/// Parses a clock string, falling back to [`MIDNIGHT`] when malformed.
///
/// Callers comparing intervals should prefer [`try_parse_time`] so that a
/// malformed value cannot produce a spurious midnight overlap.
pub fn parse_time(text: &str) -> Minutes {
    try_parse_time(text).unwrap_or(MIDNIGHT)
}

/// Half-open interval overlap test: `start_a < end_b && start_b < end_a`.
#[inline]
pub fn overlaps(start_a: Minutes, end_a: Minutes, start_b: Minutes, end_b: Minutes) -> bool {
    start_a < end_b && start_b < end_a
}

/// Formats minutes since midnight as `HH:MM` (24-hour clock).
pub fn format_minutes(minutes: Minutes) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// A parsed clock interval `[start, end)` within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClockRange {
    /// Start (minutes since midnight, inclusive).
    pub start: Minutes,
    /// End (minutes since midnight, exclusive).
    pub end: Minutes,
}

impl ClockRange {
    /// Creates a range from minute offsets.
    pub fn new(start: Minutes, end: Minutes) -> Self {
        Self { start, end }
    }

    /// Parses a range from two clock strings.
    ///
    /// Returns `None` if either side is malformed or the range is empty.
    pub fn parse(start: &str, end: &str) -> Option<Self> {
        let start = try_parse_time(start)?;
        let end = try_parse_time(end)?;
        (end > start).then_some(Self { start, end })
    }

    /// Length of the range in minutes.
    #[inline]
    pub fn duration(&self) -> Minutes {
        self.end.saturating_sub(self.start)
    }

    /// Whether a minute offset falls within the range.
    #[inline]
    pub fn contains(&self, minute: Minutes) -> bool {
        minute >= self.start && minute < self.end
    }

    /// Whether two ranges overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }
}

impl fmt::Display for ClockRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_minutes(self.start), format_minutes(self.end))
    }
}

/// Teaching day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All teaching days, Monday first.
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Full English name.
    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }

    /// Matches a dataset day key: full name or three-letter abbreviation,
    /// case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|day| {
            let full = day.as_str().to_ascii_lowercase();
            lower == full || (lower.len() == 3 && full.starts_with(&lower))
        })
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
