//! Section offering (location) model.
//!
//! A location is one (degree, semester, section) offering of a subject
//! together with the weekly slots the subject meets at that section.
//! Several locations may offer the same subject; a student takes at most
//! one of them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::slot::TimeSlot;
use super::time::{Minutes, Weekday};

/// Identifies one class section: (degree, semester, section).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionKey {
    /// Degree programme (e.g. "BSCS").
    pub degree: String,
    /// Semester label (e.g. "3").
    pub semester: String,
    /// Section label (e.g. "A").
    pub section: String,
}

impl SectionKey {
    /// Creates a section key.
    pub fn new(
        degree: impl Into<String>,
        semester: impl Into<String>,
        section: impl Into<String>,
    ) -> Self {
        Self {
            degree: degree.into(),
            semester: semester.into(),
            section: section.into(),
        }
    }

    /// Seat-override key for a subject at this section:
    /// `subject|degree|semester|section`.
    pub fn override_key(&self, subject: &str) -> String {
        format!("{subject}|{}|{}|{}", self.degree, self.semester, self.section)
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.degree, self.semester, self.section)
    }
}

/// A subject's offering at one section, with its weekly slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// The offering section.
    pub key: SectionKey,
    /// Weekly meetings at this section, in dataset order.
    pub slots: Vec<TimeSlot>,
}

impl Location {
    /// Creates a location with no slots.
    pub fn new(key: SectionKey) -> Self {
        Self {
            key,
            slots: Vec::new(),
        }
    }

    /// Adds a slot.
    pub fn with_slot(mut self, slot: TimeSlot) -> Self {
        self.slots.push(slot);
        self
    }

    /// Adds a slot unless an identical one is already present.
    pub fn merge_slot(&mut self, slot: TimeSlot) {
        if !self.slots.contains(&slot) {
            self.slots.push(slot);
        }
    }

    /// Number of weekly meetings.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Slots held on a given day.
    pub fn slots_on(&self, day: Weekday) -> impl Iterator<Item = &TimeSlot> {
        self.slots.iter().filter(move |s| s.day == day)
    }

    /// Whether any slot names an instructor.
    pub fn has_instructor(&self) -> bool {
        self.slots.iter().any(TimeSlot::has_instructor)
    }

    /// Distinct instructor names, first-seen order.
    pub fn instructors(&self) -> Vec<&str> {
        distinct(self.slots.iter().filter(|s| s.has_instructor()).map(|s| s.instructor.trim()))
    }

    /// Distinct room names, first-seen order.
    pub fn rooms(&self) -> Vec<&str> {
        distinct(
            self.slots
                .iter()
                .map(|s| s.room.trim())
                .filter(|r| !r.is_empty()),
        )
    }

    /// One-line instructor/room summary, e.g. `"Dr. Khan @ R-101, R-102"`.
    pub fn summary(&self) -> String {
        let instructors = self.instructors();
        let rooms = self.rooms();
        let who = if instructors.is_empty() {
            "TBA".to_string()
        } else {
            instructors.join(", ")
        };
        if rooms.is_empty() {
            who
        } else {
            format!("{who} @ {}", rooms.join(", "))
        }
    }

    /// Earliest parsed start time across all slots.
    pub fn earliest_start(&self) -> Option<Minutes> {
        self.slots.iter().filter_map(|s| s.range()).map(|r| r.start).min()
    }
}

fn distinct<'a>(items: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
