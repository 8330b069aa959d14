//! Subject model.
//!
//! A subject is identified by its name and carries every location that
//! offers it, split into eligible locations and those explicitly marked
//! full for this subject.

use serde::{Deserialize, Serialize};

use super::location::Location;
use super::preferences::{is_excluded, Preferences};

/// A desired subject and its offerings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Subject name (unique).
    pub name: String,
    /// Eligible locations, first-seen order.
    pub locations: Vec<Location>,
    /// Locations explicitly marked full, first-seen order.
    pub full_locations: Vec<Location>,
}

impl Subject {
    /// Creates a subject with no locations.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locations: Vec::new(),
            full_locations: Vec::new(),
        }
    }

    /// Builds a subject from caller-supplied locations, partitioning out
    /// those marked full. Duplicate sections keep their first occurrence.
    pub fn from_locations(
        name: impl Into<String>,
        locations: Vec<Location>,
        preferences: &Preferences,
    ) -> Self {
        let mut subject = Subject::new(name);
        for location in locations {
            subject.add_location(location, preferences);
        }
        subject
    }

    /// Adds one location, routing it by seat status. Ignores a section
    /// already present.
    pub fn add_location(&mut self, location: Location, preferences: &Preferences) {
        if self.offers_section(&location) {
            return;
        }
        if is_excluded(&self.name, &location, preferences) {
            self.full_locations.push(location);
        } else {
            self.locations.push(location);
        }
    }

    /// Whether no location of any kind offers this subject.
    pub fn is_unoffered(&self) -> bool {
        self.locations.is_empty() && self.full_locations.is_empty()
    }

    /// Whether every offering is explicitly full.
    pub fn is_seat_limited(&self) -> bool {
        self.locations.is_empty() && !self.full_locations.is_empty()
    }

    /// Total number of offerings, eligible or full.
    pub fn offering_count(&self) -> usize {
        self.locations.len() + self.full_locations.len()
    }

    fn offers_section(&self, location: &Location) -> bool {
        self.locations
            .iter()
            .chain(&self.full_locations)
            .any(|l| l.key == location.key)
    }
}
