//! Resolved timetable (output) model.
//!
//! Per-weekday lists of class entries, each list ordered by start time.
//! This is the artifact handed back to the caller for display and
//! persistence.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::location::SectionKey;
use super::slot::TimeSlot;
use super::time::{parse_time, Minutes, Weekday};

/// One class in the resolved timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEntry {
    /// Subject name.
    pub subject: String,
    /// Start time as written in the dataset.
    pub start: String,
    /// End time as written in the dataset.
    pub end: String,
    /// Room, empty when unknown.
    pub room: String,
    /// Instructor, empty when unknown.
    pub instructor: String,
    /// Degree program of the chosen section.
    pub degree: String,
    /// Semester of the chosen section.
    pub semester: String,
    /// Section letter of the chosen section.
    pub section: String,
}

impl TimetableEntry {
    /// Stamps a slot with its subject and section.
    pub fn from_slot(subject: &str, key: &SectionKey, slot: &TimeSlot) -> Self {
        Self {
            subject: subject.to_string(),
            start: slot.start.clone(),
            end: slot.end.clone(),
            room: slot.room.clone(),
            instructor: slot.instructor.clone(),
            degree: key.degree.clone(),
            semester: key.semester.clone(),
            section: key.section.clone(),
        }
    }

    /// Start in minutes (midnight when malformed).
    #[inline]
    pub fn start_minute(&self) -> Minutes {
        parse_time(&self.start)
    }

    /// End in minutes (midnight when malformed).
    #[inline]
    pub fn end_minute(&self) -> Minutes {
        parse_time(&self.end)
    }

    /// Section the class belongs to.
    pub fn section_key(&self) -> SectionKey {
        SectionKey::new(&self.degree, &self.semester, &self.section)
    }
}

/// Weekly timetable: day → classes sorted by start time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedTimetable {
    days: BTreeMap<Weekday, Vec<TimetableEntry>>,
}

impl ResolvedTimetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry to a day without re-sorting.
    ///
    /// Call [`ResolvedTimetable::sort_days`] once all entries are added.
    pub fn push(&mut self, day: Weekday, entry: TimetableEntry) {
        self.days.entry(day).or_default().push(entry);
    }

    /// Stable-sorts every day by start time.
    pub fn sort_days(&mut self) {
        for entries in self.days.values_mut() {
            entries.sort_by_key(TimetableEntry::start_minute);
        }
    }

    /// Classes on one day (empty if none).
    pub fn day(&self, day: Weekday) -> &[TimetableEntry] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-empty days in weekday order.
    pub fn days(&self) -> impl Iterator<Item = (Weekday, &[TimetableEntry])> {
        self.days
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(day, entries)| (*day, entries.as_slice()))
    }

    /// Total number of classes.
    pub fn entry_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Whether the timetable holds no classes.
    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    /// Distinct subject names, first-seen in weekday order.
    pub fn subjects(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for entries in self.days.values() {
            for e in entries {
                if !out.contains(&e.subject.as_str()) {
                    out.push(&e.subject);
                }
            }
        }
        out
    }
}
