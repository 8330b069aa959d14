//! Schedule assembly and conflict suggestions.
//!
//! Turns an [`Assignment`] into a day-by-day [`ResolvedTimetable`] and,
//! for subjects left in conflict, proposes alternative sections.

pub mod kpi;

pub use kpi::TimetableKpi;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::conflicts::{conflict_days, conflict_subjects};
use crate::models::{
    Assignment, ConflictRecord, Location, ResolvedTimetable, SectionKey, TimetableEntry,
};

/// Most alternatives listed per conflicting subject.
pub const MAX_ALTERNATIVES: usize = 3;

/// Expands every placement into its day buckets.
///
/// Each slot is stamped with the subject and the chosen section. Days
/// are sorted by start time; equal starts keep placement order.
pub fn assemble(assignment: &Assignment) -> ResolvedTimetable {
    let mut timetable = ResolvedTimetable::new();
    for placement in &assignment.placements {
        let key = &placement.location.key;
        for slot in &placement.location.slots {
            timetable.push(slot.day, TimetableEntry::from_slot(&placement.subject, key, slot));
        }
    }
    timetable.sort_days();
    timetable
}

/// An alternative section for a conflicting subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    /// Section offering the subject.
    pub section: SectionKey,
    /// Conflict days against the rest of the current assignment if this
    /// section were chosen instead.
    pub conflicts_if_chosen: u32,
    /// Instructor and room summary.
    pub summary: String,
}

/// Alternatives for one subject implicated in a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Subject name.
    pub subject: String,
    /// Section currently assigned, if any.
    pub current: Option<SectionKey>,
    /// Up to [`MAX_ALTERNATIVES`] other sections, fewest conflicts first.
    pub alternatives: Vec<Alternative>,
    /// No other section offers the subject.
    pub no_alternatives: bool,
}

/// Builds one suggestion per subject named in `records`, in name order.
///
/// Alternatives exclude the assigned section and are ordered by the
/// conflicts they would cause, then catalog order. A subject whose
/// every offering is full draws alternatives from the full offerings.
pub fn build_suggestions(
    records: &[ConflictRecord],
    catalog: &Catalog,
    assignment: &Assignment,
) -> Vec<Suggestion> {
    conflict_subjects(records)
        .into_iter()
        .map(|subject| {
            let current = assignment.section_for(&subject).cloned();
            let offerings: &[Location] = match catalog.get(&subject) {
                Some(s) if s.locations.is_empty() => &s.full_locations,
                Some(s) => &s.locations,
                None => &[],
            };

            let mut alternatives: Vec<Alternative> = offerings
                .iter()
                .filter(|l| Some(&l.key) != current.as_ref())
                .map(|l| Alternative {
                    section: l.key.clone(),
                    conflicts_if_chosen: conflicts_against_others(&subject, l, assignment),
                    summary: l.summary(),
                })
                .collect();
            alternatives.sort_by_key(|a| a.conflicts_if_chosen);
            alternatives.truncate(MAX_ALTERNATIVES);

            Suggestion {
                no_alternatives: alternatives.is_empty(),
                subject,
                current,
                alternatives,
            }
        })
        .collect()
}

fn conflicts_against_others(subject: &str, location: &Location, assignment: &Assignment) -> u32 {
    assignment
        .placements
        .iter()
        .filter(|p| p.subject != subject)
        .map(|p| conflict_days(location, &p.location))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflicts::conflicts_for_assignment;
    use crate::models::{Placement, Preferences, Subject, TimeSlot, Weekday};

    fn loc(section: &str, slots: &[(Weekday, &str, &str)]) -> Location {
        slots.iter().fold(
            Location::new(SectionKey::new("BSCS", "3", section)),
            |l, (day, start, end)| l.with_slot(TimeSlot::new(*day, *start, *end)),
        )
    }

    #[test]
    fn test_assemble_sorted_and_stamped() {
        use Weekday::*;
        let mut assignment = Assignment::new();
        assignment.place(Placement::new(
            "Physics",
            loc("B", &[(Monday, "2:00", "3:30"), (Wednesday, "9:00", "10:30")]),
        ));
        assignment.place(Placement::new("Calculus", loc("A", &[(Monday, "8:00", "9:30")])));

        let timetable = assemble(&assignment);
        let monday = timetable.day(Monday);
        assert_eq!(monday.len(), 2);
        assert_eq!(monday[0].subject, "Calculus");
        assert_eq!(monday[1].subject, "Physics");
        assert_eq!(monday[1].section, "B");
        assert_eq!(timetable.entry_count(), 3);
    }

    #[test]
    fn test_assemble_stable_on_equal_start() {
        use Weekday::*;
        let mut assignment = Assignment::new();
        assignment.place(Placement::new("Physics", loc("B", &[(Monday, "8:00", "9:30")])));
        assignment.place(Placement::new("Calculus", loc("A", &[(Monday, "8:00", "9:00")])));

        let timetable = assemble(&assignment);
        let names: Vec<&str> = timetable.day(Monday).iter().map(|e| e.subject.as_str()).collect();
        assert_eq!(names, vec!["Physics", "Calculus"]);
    }

    #[test]
    fn test_suggestions_rank_alternatives() {
        use Weekday::*;
        let prefs = Preferences::new();
        let mut catalog = Catalog::new();
        catalog.insert(Subject::from_locations(
            "Calculus",
            vec![
                loc("A", &[(Monday, "8:00", "9:30")]),
                loc("B", &[(Monday, "9:00", "10:00")]),
                loc("C", &[(Tuesday, "8:00", "9:30")]),
            ],
            &prefs,
        ));
        catalog.insert(Subject::from_locations(
            "Physics",
            vec![loc("D", &[(Monday, "8:00", "9:30")])],
            &prefs,
        ));

        let mut assignment = Assignment::new();
        assignment.place(Placement::new("Calculus", loc("A", &[(Monday, "8:00", "9:30")])));
        assignment.place(Placement::new("Physics", loc("D", &[(Monday, "8:00", "9:30")])));
        let records = conflicts_for_assignment(&assignment);

        let suggestions = build_suggestions(&records, &catalog, &assignment);
        assert_eq!(suggestions.len(), 2);

        let calculus = &suggestions[0];
        assert_eq!(calculus.subject, "Calculus");
        assert_eq!(calculus.current.as_ref().map(|k| k.section.as_str()), Some("A"));
        let sections: Vec<&str> =
            calculus.alternatives.iter().map(|a| a.section.section.as_str()).collect();
        assert_eq!(sections, vec!["C", "B"]);
        assert_eq!(calculus.alternatives[0].conflicts_if_chosen, 0);

        let physics = &suggestions[1];
        assert!(physics.no_alternatives);
        assert!(physics.alternatives.is_empty());
    }

    #[test]
    fn test_no_conflicts_no_suggestions() {
        let suggestions = build_suggestions(&[], &Catalog::new(), &Assignment::new());
        assert!(suggestions.is_empty());
    }
}
