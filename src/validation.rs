//! Input diagnostics for resolution requests.
//!
//! Checks the requested subjects and the slots they draw on before
//! search. Nothing here rejects a request: every finding is reported as
//! a warning on the result and resolution proceeds. Detects:
//! - Duplicate subject names
//! - Requested subjects no section offers
//! - Time strings that cannot be parsed
//! - Slots whose end is not after their start
//! - Weekday keys the dataset parser did not recognize

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::time::try_parse_time;
use crate::models::{TimeSlot, TimetableDataset};
use crate::resolver::SubjectRequest;

/// A non-fatal finding about the request or dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Issue category.
    pub kind: ValidationIssueKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationIssueKind {
    /// A start or end time does not parse; the slot never conflicts.
    UnparseableTime,
    /// A slot ends at or before its start.
    EmptyInterval,
    /// The same subject was requested more than once.
    DuplicateSubject,
    /// A dataset day key is not a recognized weekday.
    UnknownWeekday,
    /// No section offers a requested subject.
    UnknownSubject,
}

impl ValidationIssue {
    fn new(kind: ValidationIssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a request against the dataset.
///
/// Slot checks cover only slots of requested subjects: dataset slots
/// whose course is requested, and caller-supplied locations.
///
/// # Returns
/// Every detected issue, in discovery order. Empty when all checks pass.
pub fn validate_request(
    requests: &[SubjectRequest],
    dataset: &TimetableDataset,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    // Duplicate names
    let mut names: HashSet<&str> = HashSet::new();
    for request in requests {
        let name = request.name.trim();
        if !names.insert(name) {
            issues.push(ValidationIssue::new(
                ValidationIssueKind::DuplicateSubject,
                format!("Subject '{name}' requested more than once"),
            ));
        }
    }

    // Offered subjects
    for request in requests {
        let name = request.name.trim();
        if request.locations.is_none() && !dataset.offers(name) {
            issues.push(ValidationIssue::new(
                ValidationIssueKind::UnknownSubject,
                format!("No section offers '{name}'"),
            ));
        }
    }

    // Dataset slots of requested subjects
    let dataset_names: HashSet<&str> = requests
        .iter()
        .filter(|r| r.locations.is_none())
        .map(|r| r.name.trim())
        .collect();
    for table in &dataset.sections {
        for (day, slot) in table.slots() {
            let course = slot.course.trim();
            if dataset_names.contains(course) {
                let context = format!("{course} at {} on {}", table.key, day.as_str());
                check_times(&slot.start, &slot.end, &context, &mut issues);
            }
        }
    }

    // Caller-supplied slots
    for request in requests {
        for location in request.locations.iter().flatten() {
            for slot in &location.slots {
                let context = slot_context(request.name.trim(), &location.key.to_string(), slot);
                check_times(&slot.start, &slot.end, &context, &mut issues);
            }
        }
    }

    for key in &dataset.skipped_day_keys {
        issues.push(ValidationIssue::new(
            ValidationIssueKind::UnknownWeekday,
            format!("Unrecognized weekday key '{key}' skipped"),
        ));
    }

    issues
}

fn slot_context(subject: &str, section: &str, slot: &TimeSlot) -> String {
    format!("{subject} at {section} on {}", slot.day.as_str())
}

fn check_times(start: &str, end: &str, context: &str, issues: &mut Vec<ValidationIssue>) {
    match (try_parse_time(start), try_parse_time(end)) {
        (Some(s), Some(e)) if e <= s => issues.push(ValidationIssue::new(
            ValidationIssueKind::EmptyInterval,
            format!("{context}: {start}-{end} does not end after it starts"),
        )),
        (Some(_), Some(_)) => {}
        _ => issues.push(ValidationIssue::new(
            ValidationIssueKind::UnparseableTime,
            format!("{context}: cannot parse time range '{start}-{end}'"),
        )),
    }
}
