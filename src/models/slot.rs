//! Class slot model.
//!
//! A time slot is one weekly meeting of a subject: a weekday, a clock
//! interval, a room, and an instructor. Slots are copied verbatim from
//! the timetable dataset and never mutated.

use serde::{Deserialize, Serialize};

use super::time::{parse_time, try_parse_time, ClockRange, Minutes, Weekday};

/// One scheduled meeting of a subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Teaching day.
    pub day: Weekday,
    /// Start time as written in the dataset (`H:MM`/`HH:MM`).
    pub start: String,
    /// End time as written in the dataset.
    pub end: String,
    /// Room name (may be empty).
    #[serde(default)]
    pub room: String,
    /// Instructor name (may be empty when unassigned).
    #[serde(default)]
    pub instructor: String,
}

impl TimeSlot {
    /// Creates a slot without room or instructor.
    pub fn new(day: Weekday, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            day,
            start: start.into(),
            end: end.into(),
            room: String::new(),
            instructor: String::new(),
        }
    }

    /// Sets the room.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    /// Sets the instructor.
    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = instructor.into();
        self
    }

    /// Start in minutes, midnight when malformed (used for ordering).
    #[inline]
    pub fn start_minute(&self) -> Minutes {
        parse_time(&self.start)
    }

    /// End in minutes, midnight when malformed.
    #[inline]
    pub fn end_minute(&self) -> Minutes {
        parse_time(&self.end)
    }

    /// Parsed interval, or `None` if either bound is malformed or the
    /// interval is empty. Slots without a range never take part in
    /// overlap tests.
    pub fn range(&self) -> Option<ClockRange> {
        ClockRange::parse(&self.start, &self.end)
    }

    /// Whether both time strings parse.
    pub fn has_valid_times(&self) -> bool {
        try_parse_time(&self.start).is_some() && try_parse_time(&self.end).is_some()
    }

    /// Whether an instructor is named for this slot.
    pub fn has_instructor(&self) -> bool {
        let name = self.instructor.trim();
        !name.is_empty() && !name.eq_ignore_ascii_case("tba")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_range() {
        let slot = TimeSlot::new(Weekday::Monday, "8:00", "9:30");
        assert_eq!(slot.range(), Some(ClockRange::new(480, 570)));
        assert_eq!(slot.start_minute(), 480);
        assert!(slot.has_valid_times());
    }

    #[test]
    fn test_malformed_slot_has_no_range() {
        let slot = TimeSlot::new(Weekday::Monday, "tbd", "9:30");
        assert!(slot.range().is_none());
        assert_eq!(slot.start_minute(), 0);
        assert!(!slot.has_valid_times());
    }

    #[test]
    fn test_has_instructor() {
        let slot = TimeSlot::new(Weekday::Friday, "2:00", "3:30");
        assert!(!slot.has_instructor());
        assert!(!slot.clone().with_instructor("  ").has_instructor());
        assert!(!slot.clone().with_instructor("TBA").has_instructor());
        assert!(slot.with_instructor("Dr. Khan").has_instructor());
    }
}
