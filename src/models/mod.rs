//! Timetable domain models.
//!
//! Provides the core data types for describing section offerings and
//! resolved weekly timetables.
//!
//! # Domain Mappings
//!
//! | u-timetable | Meaning |
//! |-------------|---------|
//! | TimeSlot | One weekly class meeting (day, start, end, room, instructor) |
//! | Location | A subject's offering at one (degree, semester, section) |
//! | Subject | A desired subject and all of its offerings |
//! | Assignment | Subject → chosen location |
//! | ResolvedTimetable | Day → classes ordered by start time |

mod assignment;
mod conflict;
mod dataset;
mod location;
mod preferences;
mod slot;
mod subject;
pub mod time;
mod timetable;

pub use assignment::{Assignment, Placement};
pub use conflict::{ConflictRecord, ConflictingClass};
pub use dataset::{DatasetProvider, DatasetSlot, SectionTimetable, TimetableDataset};
pub use location::{Location, SectionKey};
pub use preferences::{is_excluded, Preferences, SeatOverrides, SeatPolicy, SeatStatus};
pub use slot::TimeSlot;
pub use subject::Subject;
pub use time::{ClockRange, Minutes, Weekday};
pub use timetable::{ResolvedTimetable, TimetableEntry};
