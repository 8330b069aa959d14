//! Section catalog builder.
//!
//! Walks the timetable dataset once and collects, for each requested
//! subject, every (degree, semester, section) location offering it.
//! Slots of the same subject at the same section merge into one location.
//!
//! # Seat Filtering
//! A location is set aside only when explicitly marked full for that
//! subject. Unknown availability is a ranking concern, not a filter.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{Location, Preferences, SectionKey, Subject, TimetableDataset};

/// Subjects with their offerings, in request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    subjects: Vec<Subject>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subject, replacing any entry with the same name.
    pub fn insert(&mut self, subject: Subject) {
        match self.subjects.iter_mut().find(|s| s.name == subject.name) {
            Some(existing) => *existing = subject,
            None => self.subjects.push(subject),
        }
    }

    /// Looks up a subject by name.
    pub fn get(&self, name: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.name == name)
    }

    /// Eligible locations for a subject (empty when unknown).
    pub fn locations(&self, name: &str) -> &[Location] {
        self.get(name).map(|s| s.locations.as_slice()).unwrap_or(&[])
    }

    /// All subjects in request order.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Number of subjects.
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

/// Builds the catalog for the requested subjects.
///
/// Every requested name gets an entry, possibly with no locations.
/// Duplicate names keep their first position. Course names in the
/// dataset are compared after trimming surrounding whitespace.
///
/// # Complexity
/// O(S) over all dataset slots, plus O(k) per merged slot for the
/// identical-slot check within a location.
pub fn build_catalog<I, S>(
    dataset: &TimetableDataset,
    subject_names: I,
    preferences: &Preferences,
) -> Catalog
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut order: Vec<String> = Vec::new();
    for name in subject_names {
        let name = name.as_ref().trim();
        if !order.iter().any(|n| n == name) {
            order.push(name.to_string());
        }
    }

    // subject → locations in first-seen order
    let mut found: HashMap<&str, Vec<Location>> =
        order.iter().map(|n| (n.as_str(), Vec::new())).collect();

    for table in &dataset.sections {
        for (day, slot) in table.slots() {
            let Some(locations) = found.get_mut(slot.course.trim()) else {
                continue;
            };
            let location = match locations.iter_mut().position(|l| l.key == table.key) {
                Some(idx) => &mut locations[idx],
                None => {
                    locations.push(Location::new(table.key.clone()));
                    let last = locations.len() - 1;
                    &mut locations[last]
                }
            };
            location.merge_slot(slot.to_time_slot(day));
        }
    }

    let mut catalog = Catalog::new();
    for name in &order {
        let locations = found.remove(name.as_str()).unwrap_or_default();
        let subject = Subject::from_locations(name.clone(), locations, preferences);
        debug!(
            target: "timetable::catalog",
            subject = %subject.name,
            eligible = subject.locations.len(),
            full = subject.full_locations.len(),
            "catalogued subject"
        );
        catalog.insert(subject);
    }
    catalog
}

/// Sections offering a subject, eligible first then full, as keys.
pub fn offering_sections(subject: &Subject) -> Vec<&SectionKey> {
    subject
        .locations
        .iter()
        .chain(&subject.full_locations)
        .map(|l| &l.key)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DatasetSlot, SeatOverrides, SectionTimetable, Weekday};

    fn sample_dataset() -> TimetableDataset {
        TimetableDataset::new()
            .with_section(
                SectionTimetable::new(SectionKey::new("BSCS", "3", "A"))
                    .with_slot(
                        Weekday::Monday,
                        DatasetSlot::new("Calculus", "8:00", "9:30").with_teacher("Dr. Khan"),
                    )
                    .with_slot(Weekday::Monday, DatasetSlot::new("Physics", "9:30", "11:00"))
                    .with_slot(
                        Weekday::Wednesday,
                        DatasetSlot::new("Calculus", "8:00", "9:30").with_teacher("Dr. Khan"),
                    ),
            )
            .with_section(
                SectionTimetable::new(SectionKey::new("BSCS", "3", "B"))
                    .with_slot(Weekday::Tuesday, DatasetSlot::new("Calculus ", "11:00", "12:30"))
                    // duplicate row in the source data
                    .with_slot(Weekday::Tuesday, DatasetSlot::new("Calculus", "11:00", "12:30")),
            )
            .with_section(
                SectionTimetable::new(SectionKey::new("BSEE", "1", "A"))
                    .with_slot(Weekday::Friday, DatasetSlot::new("Chemistry", "8:00", "9:30")),
            )
    }

    #[test]
    fn test_groups_slots_by_section() {
        let catalog = build_catalog(&sample_dataset(), ["Calculus"], &Preferences::new());
        let locs = catalog.locations("Calculus");

        assert_eq!(locs.len(), 2);
        assert_eq!(locs[0].key, SectionKey::new("BSCS", "3", "A"));
        assert_eq!(locs[0].slot_count(), 2);
        assert_eq!(locs[1].key, SectionKey::new("BSCS", "3", "B"));
        // identical duplicate slot merged away
        assert_eq!(locs[1].slot_count(), 1);
    }

    #[test]
    fn test_every_requested_subject_present() {
        let catalog = build_catalog(
            &sample_dataset(),
            ["Physics", "Astronomy", "Physics"],
            &Preferences::new(),
        );
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.subjects()[0].name, "Physics");
        assert!(catalog.get("Astronomy").unwrap().is_unoffered());
        assert!(catalog.locations("Unknown").is_empty());
    }

    #[test]
    fn test_full_sections_set_aside() {
        let prefs = Preferences::new().with_seat_overrides(SeatOverrides::new().with(
            "Calculus",
            &SectionKey::new("BSCS", "3", "A"),
            false,
        ));
        let catalog = build_catalog(&sample_dataset(), ["Calculus"], &prefs);
        let subject = catalog.get("Calculus").unwrap();

        assert_eq!(subject.locations.len(), 1);
        assert_eq!(subject.locations[0].key.section, "B");
        assert_eq!(subject.full_locations.len(), 1);
        assert_eq!(offering_sections(subject).len(), 2);
    }

    #[test]
    fn test_instructor_carried_into_location() {
        let catalog = build_catalog(&sample_dataset(), ["Calculus"], &Preferences::new());
        assert_eq!(catalog.locations("Calculus")[0].instructors(), vec!["Dr. Khan"]);
    }
}
