//! Static timetable dataset.
//!
//! The dataset is a nested mapping
//! `degree → semester → section → weekday → [slot]`, each slot carrying
//! `course`, `start`, `end`, `teacher`, and `room`. Walk order follows
//! the document order, so "first seen in the dataset" is well defined.
//!
//! # Day Keys
//! Weekday keys match full English names or three-letter abbreviations,
//! case-insensitively. Unrecognized day keys are skipped and recorded in
//! [`TimetableDataset::skipped_day_keys`] for diagnostics.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::location::SectionKey;
use super::slot::TimeSlot;
use super::time::Weekday;
use crate::error::{TimetableError, TimetableResult};

/// One slot as written in the dataset document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSlot {
    /// Subject name.
    pub course: String,
    /// Start time string.
    pub start: String,
    /// End time string.
    pub end: String,
    /// Instructor name.
    #[serde(default)]
    pub teacher: String,
    /// Room name.
    #[serde(default)]
    pub room: String,
}

impl DatasetSlot {
    /// Creates a slot.
    pub fn new(course: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            course: course.into(),
            start: start.into(),
            end: end.into(),
            teacher: String::new(),
            room: String::new(),
        }
    }

    /// Sets the instructor.
    pub fn with_teacher(mut self, teacher: impl Into<String>) -> Self {
        self.teacher = teacher.into();
        self
    }

    /// Sets the room.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    /// Converts to a class slot on the given day.
    pub fn to_time_slot(&self, day: Weekday) -> TimeSlot {
        TimeSlot::new(day, self.start.clone(), self.end.clone())
            .with_room(self.room.clone())
            .with_instructor(self.teacher.clone())
    }
}

/// The weekly timetable of one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionTimetable {
    /// Section identity.
    pub key: SectionKey,
    /// Day buckets in document order.
    pub days: Vec<(Weekday, Vec<DatasetSlot>)>,
}

impl SectionTimetable {
    /// Creates an empty section timetable.
    pub fn new(key: SectionKey) -> Self {
        Self {
            key,
            days: Vec::new(),
        }
    }

    /// Appends a slot to a day bucket (creating the bucket if needed).
    pub fn with_slot(mut self, day: Weekday, slot: DatasetSlot) -> Self {
        match self.days.iter_mut().find(|(d, _)| *d == day) {
            Some((_, slots)) => slots.push(slot),
            None => self.days.push((day, vec![slot])),
        }
        self
    }

    /// Iterates `(day, slot)` pairs in document order.
    pub fn slots(&self) -> impl Iterator<Item = (Weekday, &DatasetSlot)> {
        self.days
            .iter()
            .flat_map(|(day, slots)| slots.iter().map(move |s| (*day, s)))
    }
}

/// Read-only timetable dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimetableDataset {
    /// Section timetables in document order.
    pub sections: Vec<SectionTimetable>,
    /// Day keys that were not recognized while parsing
    /// (`degree/semester/section/key`).
    #[serde(default)]
    pub skipped_day_keys: Vec<String>,
}

impl TimetableDataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a section timetable.
    pub fn with_section(mut self, section: SectionTimetable) -> Self {
        self.sections.push(section);
        self
    }

    /// Parses the nested JSON dataset document.
    ///
    /// # Errors
    /// Returns [`TimetableError::Json`] for invalid JSON or malformed slot
    /// objects, and [`TimetableError::Dataset`] when a level of the
    /// nesting is not the expected object/array.
    pub fn from_json_str(text: &str) -> TimetableResult<Self> {
        let root: Value = serde_json::from_str(text)?;
        Self::from_json_value(&root)
    }

    /// Builds a dataset from an already-parsed JSON value.
    pub fn from_json_value(root: &Value) -> TimetableResult<Self> {
        let mut dataset = TimetableDataset::new();

        for (degree, semesters) in as_object(root, "dataset root")? {
            for (semester, sections) in as_object(semesters, degree)? {
                for (section, days) in as_object(sections, &format!("{degree}/{semester}"))? {
                    let path = format!("{degree}/{semester}/{section}");
                    let mut table =
                        SectionTimetable::new(SectionKey::new(degree, semester, section));

                    for (day_key, slots) in as_object(days, &path)? {
                        let Some(day) = Weekday::from_name(day_key) else {
                            dataset.skipped_day_keys.push(format!("{path}/{day_key}"));
                            continue;
                        };
                        let Value::Array(items) = slots else {
                            return Err(TimetableError::dataset(format!(
                                "expected slot array at {path}/{day_key}"
                            )));
                        };
                        for item in items {
                            let slot: DatasetSlot = serde_json::from_value(item.clone())?;
                            table = table.with_slot(day, slot);
                        }
                    }

                    dataset.sections.push(table);
                }
            }
        }

        Ok(dataset)
    }

    /// Total number of slots across all sections.
    pub fn slot_count(&self) -> usize {
        self.sections.iter().map(|s| s.slots().count()).sum()
    }

    /// Whether any section offers a subject with this name.
    pub fn offers(&self, subject: &str) -> bool {
        self.sections
            .iter()
            .any(|s| s.slots().any(|(_, slot)| slot.course.trim() == subject))
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> TimetableResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| TimetableError::dataset(format!("expected object at {path}")))
}

/// Supplies the dataset for one resolution request.
pub trait DatasetProvider {
    /// Loads the dataset. Treated as static for the duration of one call.
    fn load(&self) -> TimetableResult<TimetableDataset>;
}

impl DatasetProvider for TimetableDataset {
    fn load(&self) -> TimetableResult<TimetableDataset> {
        Ok(self.clone())
    }
}

impl<F> DatasetProvider for F
where
    F: Fn() -> TimetableResult<TimetableDataset>,
{
    fn load(&self) -> TimetableResult<TimetableDataset> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "BSCS": {
            "3": {
                "A": {
                    "Monday": [
                        {"course": "Calculus", "start": "8:00", "end": "9:30", "teacher": "Dr. Khan", "room": "R-1"},
                        {"course": "Physics", "start": "9:30", "end": "11:00", "teacher": "Ms. Ali", "room": "R-2"}
                    ],
                    "wed": [
                        {"course": "Calculus", "start": "8:00", "end": "9:30"}
                    ],
                    "Sunday": []
                },
                "B": {
                    "Tuesday": [
                        {"course": "Calculus", "start": "11:00", "end": "12:30", "teacher": "Dr. Noor", "room": "R-3"}
                    ]
                }
            }
        }
    }"#;

    #[test]
    fn test_parse_document_order() {
        let ds = TimetableDataset::from_json_str(SAMPLE).unwrap();
        assert_eq!(ds.sections.len(), 2);
        assert_eq!(ds.sections[0].key, SectionKey::new("BSCS", "3", "A"));
        assert_eq!(ds.sections[1].key, SectionKey::new("BSCS", "3", "B"));
        assert_eq!(ds.slot_count(), 4);

        let days: Vec<Weekday> = ds.sections[0].days.iter().map(|(d, _)| *d).collect();
        assert_eq!(days, vec![Weekday::Monday, Weekday::Wednesday]);
    }

    #[test]
    fn test_unknown_day_keys_recorded() {
        let ds = TimetableDataset::from_json_str(SAMPLE).unwrap();
        assert_eq!(ds.skipped_day_keys, vec!["BSCS/3/A/Sunday".to_string()]);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let ds = TimetableDataset::from_json_str(SAMPLE).unwrap();
        let (_, wed) = &ds.sections[0].days[1];
        assert_eq!(wed[0].teacher, "");
        assert_eq!(wed[0].room, "");
    }

    #[test]
    fn test_shape_errors() {
        assert!(matches!(
            TimetableDataset::from_json_str("[]"),
            Err(TimetableError::Dataset { .. })
        ));
        assert!(matches!(
            TimetableDataset::from_json_str(r#"{"BSCS": {"3": {"A": {"Monday": {}}}}}"#),
            Err(TimetableError::Dataset { .. })
        ));
        assert!(matches!(
            TimetableDataset::from_json_str(r#"{"BSCS": {"3": {"A": {"Monday": [{"start": "8:00"}]}}}}"#),
            Err(TimetableError::Json(_))
        ));
        assert!(matches!(
            TimetableDataset::from_json_str("{"),
            Err(TimetableError::Json(_))
        ));
    }

    #[test]
    fn test_offers() {
        let ds = TimetableDataset::from_json_str(SAMPLE).unwrap();
        assert!(ds.offers("Physics"));
        assert!(!ds.offers("Chemistry"));
    }

    #[test]
    fn test_providers() {
        let ds = TimetableDataset::from_json_str(SAMPLE).unwrap();
        assert_eq!(ds.load().unwrap(), ds);

        let closure = || TimetableDataset::from_json_str(SAMPLE);
        assert_eq!(closure.load().unwrap().sections.len(), 2);

        let failing = || -> TimetableResult<TimetableDataset> {
            Err(TimetableError::dataset("offline"))
        };
        assert!(failing.load().is_err());
    }
}
