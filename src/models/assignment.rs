//! Assignment (solution) model.
//!
//! An assignment maps each placed subject to exactly one location.
//! Subjects absent from the assignment had no location to offer.

use serde::{Deserialize, Serialize};

use super::location::{Location, SectionKey};

/// One subject placed at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Subject name.
    pub subject: String,
    /// Chosen location.
    pub location: Location,
    /// Placed at a location marked full because every offering was full.
    pub seat_fallback: bool,
}

impl Placement {
    /// Creates a regular placement.
    pub fn new(subject: impl Into<String>, location: Location) -> Self {
        Self {
            subject: subject.into(),
            location,
            seat_fallback: false,
        }
    }

    /// Flags the placement as a seat fallback.
    pub fn with_seat_fallback(mut self, seat_fallback: bool) -> Self {
        self.seat_fallback = seat_fallback;
        self
    }
}

/// Subject → location mapping, kept in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Placements, one per subject.
    pub placements: Vec<Placement>,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a subject, replacing any previous placement for it.
    pub fn place(&mut self, placement: Placement) {
        match self
            .placements
            .iter_mut()
            .find(|p| p.subject == placement.subject)
        {
            Some(existing) => *existing = placement,
            None => self.placements.push(placement),
        }
    }

    /// Placement for a subject.
    pub fn get(&self, subject: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.subject == subject)
    }

    /// Section chosen for a subject.
    pub fn section_for(&self, subject: &str) -> Option<&SectionKey> {
        self.get(subject).map(|p| &p.location.key)
    }

    /// Placed subject names, in order.
    pub fn subjects(&self) -> Vec<&str> {
        self.placements.iter().map(|p| p.subject.as_str()).collect()
    }

    /// Subjects placed only through the seat fallback.
    pub fn seat_fallback_subjects(&self) -> Vec<&str> {
        self.placements
            .iter()
            .filter(|p| p.seat_fallback)
            .map(|p| p.subject.as_str())
            .collect()
    }

    /// Number of placed subjects.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}
