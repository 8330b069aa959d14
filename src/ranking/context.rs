//! Ranking context for rule evaluation.

use crate::models::{ClockRange, Preferences};

/// Start window (8:00–11:00) that earns the time-of-day bonus by default.
pub const DEFAULT_PREFERRED_START: ClockRange = ClockRange {
    start: 8 * 60,
    end: 11 * 60,
};

/// Per-subject state passed to ranking rules.
#[derive(Debug, Clone, Copy)]
pub struct RankingContext<'a> {
    /// Subject whose candidates are being ranked.
    pub subject: &'a str,
    /// Student preferences (parent section, seat policy, overrides).
    pub preferences: &'a Preferences,
    /// Class start window earning the time-of-day bonus.
    pub preferred_start: ClockRange,
}

impl<'a> RankingContext<'a> {
    /// Creates a context with the default start window.
    pub fn new(subject: &'a str, preferences: &'a Preferences) -> Self {
        Self {
            subject,
            preferences,
            preferred_start: DEFAULT_PREFERRED_START,
        }
    }

    /// Sets the preferred start window.
    pub fn with_preferred_start(mut self, window: ClockRange) -> Self {
        self.preferred_start = window;
        self
    }
}
