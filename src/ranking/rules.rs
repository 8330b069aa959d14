//! Built-in ranking rules.
//!
//! # Categories
//!
//! - **Affinity**: PARENT (exact and partial parent-section match)
//! - **Seats**: SEATS (confirmed, full, unknown under the active policy)
//! - **Tie-break**: INSTRUCTOR, MORNING, FOOTPRINT
//!
//! # Score Convention
//! All rules return lower scores for more preferred locations.

use super::{RankScore, RankingContext, RankingRule};
use crate::models::{Location, SeatStatus};

/// Bonus for an exact (degree, semester, section) parent match.
pub const EXACT_PARENT_BONUS: f64 = 100.0;
/// Bonus for sharing the parent's degree.
pub const SAME_DEGREE_BONUS: f64 = 20.0;
/// Bonus for sharing the parent's semester.
pub const SAME_SEMESTER_BONUS: f64 = 10.0;
/// Bonus for sharing the parent's section label.
pub const SAME_SECTION_BONUS: f64 = 5.0;
/// Bonus for explicitly confirmed seats.
pub const SEATS_CONFIRMED_BONUS: f64 = 15.0;
/// Penalty for an explicitly full location.
pub const SEATS_FULL_PENALTY: f64 = 1000.0;

/// Parent-section affinity.
///
/// An exact match earns the largest bonus. Otherwise shared degree,
/// semester, and section label each add an independent smaller bonus.
#[derive(Debug, Clone, Copy)]
pub struct ParentSectionAffinity;

impl RankingRule for ParentSectionAffinity {
    fn name(&self) -> &'static str {
        "PARENT"
    }

    fn evaluate(&self, location: &Location, context: &RankingContext<'_>) -> RankScore {
        let Some(parent) = &context.preferences.parent_section else {
            return 0.0;
        };
        let key = &location.key;
        if key == parent {
            return -EXACT_PARENT_BONUS;
        }

        let mut bonus = 0.0;
        if key.degree == parent.degree {
            bonus += SAME_DEGREE_BONUS;
        }
        if key.semester == parent.semester {
            bonus += SAME_SEMESTER_BONUS;
        }
        if key.section == parent.section {
            bonus += SAME_SECTION_BONUS;
        }
        -bonus
    }

    fn description(&self) -> &'static str {
        "Parent Section Affinity"
    }
}

/// Seat availability.
///
/// Confirmed seats earn a bonus, full sections a large penalty, and
/// unknown availability the active policy's penalty.
#[derive(Debug, Clone, Copy)]
pub struct SeatAvailability;

impl RankingRule for SeatAvailability {
    fn name(&self) -> &'static str {
        "SEATS"
    }

    fn evaluate(&self, location: &Location, context: &RankingContext<'_>) -> RankScore {
        match context.preferences.seat_status(context.subject, location) {
            SeatStatus::Available => -SEATS_CONFIRMED_BONUS,
            SeatStatus::Full => SEATS_FULL_PENALTY,
            SeatStatus::Unknown => context.preferences.seat_policy.unknown_penalty(),
        }
    }

    fn description(&self) -> &'static str {
        "Seat Availability"
    }
}

/// Prefers locations with a named instructor.
#[derive(Debug, Clone, Copy)]
pub struct InstructorAssigned;

impl RankingRule for InstructorAssigned {
    fn name(&self) -> &'static str {
        "INSTRUCTOR"
    }

    fn evaluate(&self, location: &Location, _context: &RankingContext<'_>) -> RankScore {
        if location.has_instructor() {
            -1.0
        } else {
            0.0
        }
    }

    fn description(&self) -> &'static str {
        "Instructor Assigned"
    }
}

/// Prefers locations whose classes start inside the preferred window.
///
/// Scores the negated fraction of slots starting in the window, so a
/// location with every class in the window earns `-1.0`.
#[derive(Debug, Clone, Copy)]
pub struct PreferredStartTime;

impl RankingRule for PreferredStartTime {
    fn name(&self) -> &'static str {
        "MORNING"
    }

    fn evaluate(&self, location: &Location, context: &RankingContext<'_>) -> RankScore {
        if location.slots.is_empty() {
            return 0.0;
        }
        let inside = location
            .slots
            .iter()
            .filter_map(|s| s.range())
            .filter(|r| context.preferred_start.contains(r.start))
            .count();
        -(inside as f64 / location.slot_count() as f64)
    }

    fn description(&self) -> &'static str {
        "Preferred Start Time"
    }
}

/// Prefers lighter weekly footprints (fewer slots).
#[derive(Debug, Clone, Copy)]
pub struct LighterFootprint;

impl RankingRule for LighterFootprint {
    fn name(&self) -> &'static str {
        "FOOTPRINT"
    }

    fn evaluate(&self, location: &Location, _context: &RankingContext<'_>) -> RankScore {
        location.slot_count() as f64
    }

    fn description(&self) -> &'static str {
        "Lighter Weekly Footprint"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Preferences, SeatOverrides, SeatPolicy, SectionKey, TimeSlot, Weekday};

    fn loc(degree: &str, semester: &str, section: &str) -> Location {
        Location::new(SectionKey::new(degree, semester, section))
    }

    #[test]
    fn test_parent_exact_beats_partial() {
        let prefs = Preferences::new().with_parent_section(SectionKey::new("BSCS", "3", "A"));
        let ctx = RankingContext::new("Calculus", &prefs);

        let exact = ParentSectionAffinity.evaluate(&loc("BSCS", "3", "A"), &ctx);
        let partial = ParentSectionAffinity.evaluate(&loc("BSCS", "3", "B"), &ctx);
        let section_only = ParentSectionAffinity.evaluate(&loc("BSEE", "5", "A"), &ctx);
        let none = ParentSectionAffinity.evaluate(&loc("BSEE", "5", "C"), &ctx);

        assert_eq!(exact, -EXACT_PARENT_BONUS);
        assert_eq!(partial, -(SAME_DEGREE_BONUS + SAME_SEMESTER_BONUS));
        assert_eq!(section_only, -SAME_SECTION_BONUS);
        assert_eq!(none, 0.0);
        assert!(exact < partial && partial < section_only && section_only < none);
    }

    #[test]
    fn test_parent_absent_is_neutral() {
        let prefs = Preferences::new();
        let ctx = RankingContext::new("Calculus", &prefs);
        assert_eq!(ParentSectionAffinity.evaluate(&loc("BSCS", "3", "A"), &ctx), 0.0);
    }

    #[test]
    fn test_seat_availability() {
        let a = SectionKey::new("BSCS", "3", "A");
        let b = SectionKey::new("BSCS", "3", "B");
        let prefs = Preferences::new()
            .with_seat_policy(SeatPolicy::Strict)
            .with_seat_overrides(
                SeatOverrides::new()
                    .with("Calculus", &a, true)
                    .with("Calculus", &b, false),
            );
        let ctx = RankingContext::new("Calculus", &prefs);

        let confirmed = SeatAvailability.evaluate(&Location::new(a), &ctx);
        let full = SeatAvailability.evaluate(&Location::new(b), &ctx);
        let unknown = SeatAvailability.evaluate(&loc("BSCS", "3", "C"), &ctx);

        assert!(confirmed < unknown && unknown < full);
        assert_eq!(unknown, SeatPolicy::Strict.unknown_penalty());
    }

    #[test]
    fn test_instructor_and_morning() {
        let prefs = Preferences::new();
        let ctx = RankingContext::new("Calculus", &prefs);

        let morning = loc("BSCS", "3", "A")
            .with_slot(TimeSlot::new(Weekday::Monday, "8:00", "9:30").with_instructor("Dr. Khan"));
        let afternoon = loc("BSCS", "3", "B")
            .with_slot(TimeSlot::new(Weekday::Monday, "2:00", "3:30"));

        assert!(InstructorAssigned.evaluate(&morning, &ctx) < InstructorAssigned.evaluate(&afternoon, &ctx));
        assert_eq!(PreferredStartTime.evaluate(&morning, &ctx), -1.0);
        assert_eq!(PreferredStartTime.evaluate(&afternoon, &ctx), 0.0);
    }

    #[test]
    fn test_footprint() {
        let prefs = Preferences::new();
        let ctx = RankingContext::new("Calculus", &prefs);
        let light = loc("BSCS", "3", "A").with_slot(TimeSlot::new(Weekday::Monday, "8:00", "9:30"));
        let heavy = light.clone().with_slot(TimeSlot::new(Weekday::Tuesday, "8:00", "9:30"));
        assert!(LighterFootprint.evaluate(&light, &ctx) < LighterFootprint.evaluate(&heavy, &ctx));
    }
}
