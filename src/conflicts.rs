//! Conflict detection.
//!
//! Finds same-day time overlaps between classes of different subjects.
//!
//! # Reporting
//! One [`ConflictRecord`] is produced per day per subject pair, even when
//! several slot pairs of the same two subjects collide that day. The
//! record carries the first colliding slot pair found that day.
//! Slots whose times do not parse, or whose end is not after their start,
//! never collide.
//!
//! # Complexity
//! O(n²) per day over that day's slots; daily counts are small.

use std::collections::{BTreeSet, HashSet};

use crate::models::{
    Assignment, ClockRange, ConflictRecord, ConflictingClass, Location, ResolvedTimetable,
    TimeSlot, TimetableEntry, Weekday,
};

/// Whether two slots overlap on the same day.
pub fn has_conflict(a: &TimeSlot, b: &TimeSlot) -> bool {
    if a.day != b.day {
        return false;
    }
    match (a.range(), b.range()) {
        (Some(ra), Some(rb)) => ra.overlaps(&rb),
        _ => false,
    }
}

/// Conflicts between two subjects placed at two locations.
///
/// Returns at most one record per day.
pub fn location_conflicts(
    subject_a: &str,
    location_a: &Location,
    subject_b: &str,
    location_b: &Location,
) -> Vec<ConflictRecord> {
    if subject_a == subject_b {
        return Vec::new();
    }
    let mut records = Vec::new();
    for day in Weekday::ALL {
        let hit = location_a.slots_on(day).find_map(|sa| {
            location_b
                .slots_on(day)
                .find(|sb| has_conflict(sa, sb))
                .map(|sb| (sa, sb))
        });
        if let Some((sa, sb)) = hit {
            records.push(ConflictRecord::new(
                day,
                class_of(subject_a, &sa.start, &sa.end),
                class_of(subject_b, &sb.start, &sb.end),
            ));
        }
    }
    records
}

/// Number of days on which two locations collide.
pub fn conflict_days(location_a: &Location, location_b: &Location) -> u32 {
    Weekday::ALL
        .into_iter()
        .filter(|&day| {
            location_a
                .slots_on(day)
                .any(|sa| location_b.slots_on(day).any(|sb| has_conflict(sa, sb)))
        })
        .count() as u32
}

/// All conflicts in a resolved timetable.
///
/// Records are ordered by day, then by the position of the first
/// colliding entry within the day.
pub fn detect_conflicts(timetable: &ResolvedTimetable) -> Vec<ConflictRecord> {
    let mut records = Vec::new();
    for (day, entries) in timetable.days() {
        let mut seen: HashSet<(String, String)> = HashSet::new();
        for (i, a) in entries.iter().enumerate() {
            for b in &entries[i + 1..] {
                if a.subject == b.subject || !entries_overlap(a, b) {
                    continue;
                }
                let record = ConflictRecord::new(
                    day,
                    class_of(&a.subject, &a.start, &a.end),
                    class_of(&b.subject, &b.start, &b.end),
                );
                let pair = (record.first.subject.clone(), record.second.subject.clone());
                if seen.insert(pair) {
                    records.push(record);
                }
            }
        }
    }
    records
}

/// All conflicts implied by an assignment.
///
/// Equivalent to assembling the timetable and calling
/// [`detect_conflicts`], without building it.
pub fn conflicts_for_assignment(assignment: &Assignment) -> Vec<ConflictRecord> {
    let placements = &assignment.placements;
    let mut records = Vec::new();
    for (i, a) in placements.iter().enumerate() {
        for b in &placements[i + 1..] {
            records.extend(location_conflicts(
                &a.subject,
                &a.location,
                &b.subject,
                &b.location,
            ));
        }
    }
    records.sort_by_key(|r| r.day);
    records
}

/// Distinct subject names appearing in any record, sorted.
pub fn conflict_subjects(records: &[ConflictRecord]) -> Vec<String> {
    let names: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| [r.first.subject.as_str(), r.second.subject.as_str()])
        .collect();
    names.into_iter().map(str::to_string).collect()
}

/// Number of distinct subjects appearing in any record.
pub fn count_distinct_subjects_in_conflict(records: &[ConflictRecord]) -> usize {
    conflict_subjects(records).len()
}

fn entries_overlap(a: &TimetableEntry, b: &TimetableEntry) -> bool {
    let ra = ClockRange::parse(&a.start, &a.end);
    let rb = ClockRange::parse(&b.start, &b.end);
    matches!((ra, rb), (Some(ra), Some(rb)) if ra.overlaps(&rb))
}

fn class_of(subject: &str, start: &str, end: &str) -> ConflictingClass {
    ConflictingClass {
        subject: subject.to_string(),
        start: start.to_string(),
        end: end.to_string(),
    }
}
