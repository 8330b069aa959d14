//! Location ranking rules and rule engine.
//!
//! Orders each subject's candidate locations before search. Ranking is a
//! secondary signal: the search objective is always "fewest conflicts",
//! and the rank score only breaks ties between equally-conflicted
//! assignments and decides which candidates are tried first.
//!
//! # Usage
//!
//! ```
//! use u_timetable::ranking::{RankingContext, RankingEngine};
//! use u_timetable::ranking::rules;
//!
//! let engine = RankingEngine::new()
//!     .with_rule(rules::ParentSectionAffinity)
//!     .with_tie_breaker(rules::LighterFootprint);
//! ```
//!
//! # Score Convention
//! **Lower score = more preferred**: bonuses are negative, penalties
//! positive.

mod context;
mod engine;
pub mod rules;

pub use context::{RankingContext, DEFAULT_PREFERRED_START};
pub use engine::RankingEngine;

use crate::models::Location;
use std::fmt::Debug;

/// Score returned by a ranking rule. Lower = more preferred.
pub type RankScore = f64;

/// A rule that scores one candidate location for one subject.
pub trait RankingRule: Send + Sync + Debug {
    /// Rule name (e.g., "PARENT").
    fn name(&self) -> &'static str;

    /// Scores a location; lower = more preferred.
    fn evaluate(&self, location: &Location, context: &RankingContext<'_>) -> RankScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
