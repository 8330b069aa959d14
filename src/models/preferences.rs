//! Placement preferences and seat policy.
//!
//! A student names an optional parent section and a general seat policy.
//! Individual (subject, section) pairs may be explicitly marked as having
//! seats available or being full.
//!
//! # Exclusion Rule
//! Only an explicit "full" marking excludes a location. The general
//! policy tier never excludes anything; it only shifts ranking
//! penalties for sections whose availability is unknown.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::location::{Location, SectionKey};

/// General treatment of sections with unknown seat availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatPolicy {
    /// Unknown availability is treated as available.
    Flexible,
    /// Unknown availability is mildly deprioritized.
    #[default]
    Moderate,
    /// Unknown availability is strongly deprioritized (never excluded).
    Strict,
}

impl SeatPolicy {
    /// Ranking penalty applied to locations with unknown availability.
    pub fn unknown_penalty(self) -> f64 {
        match self {
            SeatPolicy::Flexible => 0.0,
            SeatPolicy::Moderate => 2.0,
            SeatPolicy::Strict => 8.0,
        }
    }
}

/// Explicit availability of one (subject, section) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatStatus {
    /// Seats confirmed.
    Available,
    /// Explicitly marked full.
    Full,
    /// No explicit marking; the general policy applies.
    Unknown,
}

/// Per-(subject, section) seat markings.
///
/// Keys are `subject|degree|semester|section`; `true` means available,
/// `false` means full.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatOverrides {
    entries: HashMap<String, bool>,
}

impl SeatOverrides {
    /// Creates an empty override map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a (subject, section) pair.
    pub fn with(mut self, subject: &str, key: &SectionKey, available: bool) -> Self {
        self.set(subject, key, available);
        self
    }

    /// Marks a (subject, section) pair in place.
    pub fn set(&mut self, subject: &str, key: &SectionKey, available: bool) {
        self.entries.insert(key.override_key(subject), available);
    }

    /// Looks up the marking for a (subject, section) pair.
    pub fn status(&self, subject: &str, key: &SectionKey) -> SeatStatus {
        match self.entries.get(&key.override_key(subject)) {
            Some(true) => SeatStatus::Available,
            Some(false) => SeatStatus::Full,
            None => SeatStatus::Unknown,
        }
    }

    /// Number of explicit markings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no markings exist.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<HashMap<String, bool>> for SeatOverrides {
    fn from(entries: HashMap<String, bool>) -> Self {
        Self { entries }
    }
}

/// A student's placement preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Preferred home section.
    #[serde(default)]
    pub parent_section: Option<SectionKey>,
    /// Treatment of unknown availability.
    #[serde(default)]
    pub seat_policy: SeatPolicy,
    /// Explicit availability markings.
    #[serde(default)]
    pub seat_overrides: SeatOverrides,
}

impl Preferences {
    /// Creates preferences with no parent section and the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the parent section.
    pub fn with_parent_section(mut self, key: SectionKey) -> Self {
        self.parent_section = Some(key);
        self
    }

    /// Sets the general seat policy.
    pub fn with_seat_policy(mut self, policy: SeatPolicy) -> Self {
        self.seat_policy = policy;
        self
    }

    /// Sets the explicit overrides.
    pub fn with_seat_overrides(mut self, overrides: SeatOverrides) -> Self {
        self.seat_overrides = overrides;
        self
    }

    /// Seat status of a subject at a location.
    pub fn seat_status(&self, subject: &str, location: &Location) -> SeatStatus {
        self.seat_overrides.status(subject, &location.key)
    }
}

/// Whether a location is hard-excluded for a subject.
///
/// True only when the pair is explicitly marked full.
pub fn is_excluded(subject: &str, location: &Location, preferences: &Preferences) -> bool {
    preferences.seat_status(subject, location) == SeatStatus::Full
}
