//! Conflict record model.
//!
//! A conflict is a same-day time overlap between classes of two different
//! subjects. Records are derived from an assignment or timetable and never
//! stored.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::time::Weekday;

/// One side of a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConflictingClass {
    /// Subject name.
    pub subject: String,
    /// Start time as written.
    pub start: String,
    /// End time as written.
    pub end: String,
}

/// A same-day overlap between two subjects.
///
/// The two sides are ordered by subject name, so a record built from
/// `(a, b)` equals the one built from `(b, a)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConflictRecord {
    /// Day of the overlap.
    pub day: Weekday,
    /// Side whose subject name sorts first.
    pub first: ConflictingClass,
    /// Side whose subject name sorts second.
    pub second: ConflictingClass,
}

impl ConflictRecord {
    /// Creates a record with normalized side order.
    pub fn new(day: Weekday, a: ConflictingClass, b: ConflictingClass) -> Self {
        if (&b.subject, &b.start, &b.end) < (&a.subject, &a.start, &a.end) {
            Self { day, first: b, second: a }
        } else {
            Self { day, first: a, second: b }
        }
    }

    /// Whether a subject is one of the two sides.
    pub fn involves(&self, subject: &str) -> bool {
        self.first.subject == subject || self.second.subject == subject
    }

    /// The normalized subject pair.
    pub fn subject_pair(&self) -> (&str, &str) {
        (&self.first.subject, &self.second.subject)
    }

    /// The subject on the other side, if `subject` is involved.
    pub fn other(&self, subject: &str) -> Option<&str> {
        if self.first.subject == subject {
            Some(&self.second.subject)
        } else if self.second.subject == subject {
            Some(&self.first.subject)
        } else {
            None
        }
    }
}

impl fmt::Display for ConflictRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({}-{}) overlaps {} ({}-{})",
            self.day,
            self.first.subject,
            self.first.start,
            self.first.end,
            self.second.subject,
            self.second.start,
            self.second.end
        )
    }
}
