//! Timetable quality metrics (KPIs).
//!
//! Computes student-facing indicators from a resolved timetable.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Class count | Number of timetable entries |
//! | Days used | Weekdays with at least one class |
//! | Contact minutes | Sum of class durations over the week |
//! | Idle gap minutes | Sum of free time between consecutive classes on a day |
//! | Earliest start / latest end | Extremes over the whole week |
//!
//! Entries whose times do not parse into a non-empty range are counted
//! as classes but contribute no minutes.

use serde::Serialize;

use crate::models::time::{format_minutes, ClockRange, Minutes};
use crate::models::{ResolvedTimetable, Weekday};

/// Weekly timetable indicators. Times are minutes since midnight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimetableKpi {
    /// Number of classes.
    pub class_count: usize,
    /// Weekdays with at least one class.
    pub days_used: usize,
    /// Total weekly contact minutes.
    pub contact_minutes: u32,
    /// Total idle minutes between classes within a day.
    pub idle_gap_minutes: u32,
    /// Earliest class start in the week.
    pub earliest_start: Option<Minutes>,
    /// Latest class end in the week.
    pub latest_end: Option<Minutes>,
    /// Day with the most contact minutes (earliest weekday on ties).
    pub busiest_day: Option<Weekday>,
}

impl TimetableKpi {
    /// Computes KPIs for a timetable.
    pub fn calculate(timetable: &ResolvedTimetable) -> Self {
        let mut class_count = 0;
        let mut days_used = 0;
        let mut contact_minutes = 0u32;
        let mut idle_gap_minutes = 0u32;
        let mut earliest_start: Option<Minutes> = None;
        let mut latest_end: Option<Minutes> = None;
        let mut busiest: Option<(Weekday, u32)> = None;

        for (day, entries) in timetable.days() {
            class_count += entries.len();
            days_used += 1;

            let mut ranges: Vec<ClockRange> = entries
                .iter()
                .filter_map(|e| ClockRange::parse(&e.start, &e.end))
                .collect();
            ranges.sort_by_key(|r| (r.start, r.end));

            let day_minutes: u32 = ranges.iter().map(|r| u32::from(r.duration())).sum();
            contact_minutes += day_minutes;

            // Gaps only; overlapping classes extend the covered end.
            let mut covered_until: Option<Minutes> = None;
            for r in &ranges {
                if let Some(until) = covered_until {
                    if r.start > until {
                        idle_gap_minutes += u32::from(r.start - until);
                    }
                }
                covered_until = Some(covered_until.map_or(r.end, |u| u.max(r.end)));
            }

            if let Some(first) = ranges.first() {
                earliest_start = Some(earliest_start.map_or(first.start, |e| e.min(first.start)));
            }
            if let Some(end) = covered_until {
                latest_end = Some(latest_end.map_or(end, |l| l.max(end)));
            }
            if busiest.map_or(true, |(_, m)| day_minutes > m) {
                busiest = Some((day, day_minutes));
            }
        }

        Self {
            class_count,
            days_used,
            contact_minutes,
            idle_gap_minutes,
            earliest_start,
            latest_end,
            busiest_day: busiest.map(|(day, _)| day),
        }
    }

    /// Earliest start as `HH:MM`.
    pub fn earliest_start_label(&self) -> Option<String> {
        self.earliest_start.map(format_minutes)
    }

    /// Latest end as `HH:MM`.
    pub fn latest_end_label(&self) -> Option<String> {
        self.latest_end.map(format_minutes)
    }

    /// Whether the week stays within the given limits.
    pub fn meets_thresholds(&self, max_days: usize, max_idle_gap_minutes: u32) -> bool {
        self.days_used <= max_days && self.idle_gap_minutes <= max_idle_gap_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SectionKey, TimeSlot, TimetableEntry};

    fn entry(subject: &str, start: &str, end: &str) -> TimetableEntry {
        TimetableEntry::from_slot(
            subject,
            &SectionKey::new("BSCS", "3", "A"),
            &TimeSlot::new(Weekday::Monday, start, end),
        )
    }

    #[test]
    fn test_kpi_basic() {
        let mut t = ResolvedTimetable::new();
        t.push(Weekday::Monday, entry("Calculus", "8:00", "9:30"));
        t.push(Weekday::Monday, entry("Physics", "11:00", "12:30"));
        t.push(Weekday::Wednesday, entry("Chemistry", "2:00", "3:00"));
        t.sort_days();

        let kpi = TimetableKpi::calculate(&t);
        assert_eq!(kpi.class_count, 3);
        assert_eq!(kpi.days_used, 2);
        assert_eq!(kpi.contact_minutes, 90 + 90 + 60);
        assert_eq!(kpi.idle_gap_minutes, 90);
        assert_eq!(kpi.earliest_start_label().as_deref(), Some("08:00"));
        assert_eq!(kpi.latest_end_label().as_deref(), Some("15:00"));
        assert_eq!(kpi.busiest_day, Some(Weekday::Monday));
        assert!(kpi.meets_thresholds(5, 120));
        assert!(!kpi.meets_thresholds(1, 120));
    }

    #[test]
    fn test_kpi_overlap_has_no_gap() {
        let mut t = ResolvedTimetable::new();
        t.push(Weekday::Monday, entry("Calculus", "8:00", "10:00"));
        t.push(Weekday::Monday, entry("Physics", "9:00", "9:30"));
        t.push(Weekday::Monday, entry("English", "10:30", "11:00"));
        t.sort_days();

        let kpi = TimetableKpi::calculate(&t);
        assert_eq!(kpi.idle_gap_minutes, 30);
        assert_eq!(kpi.latest_end, Some(11 * 60));
    }

    #[test]
    fn test_kpi_empty_and_malformed() {
        let kpi = TimetableKpi::calculate(&ResolvedTimetable::new());
        assert_eq!(kpi.class_count, 0);
        assert!(kpi.earliest_start.is_none());
        assert!(kpi.busiest_day.is_none());

        let mut t = ResolvedTimetable::new();
        t.push(Weekday::Friday, entry("Calculus", "TBA", "9:30"));
        let kpi = TimetableKpi::calculate(&t);
        assert_eq!(kpi.class_count, 1);
        assert_eq!(kpi.contact_minutes, 0);
        assert!(kpi.latest_end.is_none());
    }
}
