//! Rule engine for candidate ranking.
//!
//! Sums weighted rule scores into one preference score per location.
//! Tie-breaker rules (weight 0) are consulted in order only when the
//! weighted scores are equal; remaining ties keep input order.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, RankScore, RankingContext, RankingRule};
use crate::models::Location;

#[derive(Clone)]
struct WeightedRule {
    rule: Arc<dyn RankingRule>,
    weight: f64,
}

/// A composable ranking engine for candidate locations.
///
/// # Example
/// ```
/// use u_timetable::models::{Location, Preferences, SectionKey};
/// use u_timetable::ranking::{RankingContext, RankingEngine};
///
/// let prefs = Preferences::new().with_parent_section(SectionKey::new("BSCS", "3", "B"));
/// let locations = vec![
///     Location::new(SectionKey::new("BSCS", "3", "A")),
///     Location::new(SectionKey::new("BSCS", "3", "B")),
/// ];
/// let order = RankingEngine::standard().sort_indices(&locations, &RankingContext::new("Calculus", &prefs));
/// assert_eq!(order, vec![1, 0]);
/// ```
#[derive(Clone)]
pub struct RankingEngine {
    rules: Vec<WeightedRule>,
    epsilon: f64,
}

impl RankingEngine {
    /// Creates an empty engine (all locations tie; input order kept).
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            epsilon: 1e-9,
        }
    }

    /// The default rule set: parent affinity, seats, instructor, and
    /// start-time bonuses, broken by lighter footprint.
    pub fn standard() -> Self {
        Self::new()
            .with_rule(rules::ParentSectionAffinity)
            .with_rule(rules::SeatAvailability)
            .with_rule(rules::InstructorAssigned)
            .with_rule(rules::PreferredStartTime)
            .with_tie_breaker(rules::LighterFootprint)
    }

    /// Adds a rule with weight 1.0.
    pub fn with_rule<R: RankingRule + 'static>(self, rule: R) -> Self {
        self.with_weighted_rule(rule, 1.0)
    }

    /// Adds a weighted rule.
    pub fn with_weighted_rule<R: RankingRule + 'static>(mut self, rule: R, weight: f64) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight,
        });
        self
    }

    /// Adds a tie-breaking rule (weight 0.0).
    pub fn with_tie_breaker<R: RankingRule + 'static>(self, rule: R) -> Self {
        self.with_weighted_rule(rule, 0.0)
    }

    /// Weighted preference score of one location.
    pub fn score(&self, location: &Location, context: &RankingContext<'_>) -> RankScore {
        self.rules
            .iter()
            .filter(|wr| wr.weight != 0.0)
            .map(|wr| wr.rule.evaluate(location, context) * wr.weight)
            .sum()
    }

    /// Per-rule weighted scores (tie-breakers report their raw score).
    pub fn evaluate(&self, location: &Location, context: &RankingContext<'_>) -> Vec<RankScore> {
        self.rules
            .iter()
            .map(|wr| {
                let raw = wr.rule.evaluate(location, context);
                if wr.weight == 0.0 {
                    raw
                } else {
                    raw * wr.weight
                }
            })
            .collect()
    }

    /// Sorts locations from most to least preferred.
    ///
    /// Returns indices into `locations`. The sort is stable, so fully
    /// tied locations keep their first-seen order.
    pub fn sort_indices(&self, locations: &[Location], context: &RankingContext<'_>) -> Vec<usize> {
        let scores: Vec<RankScore> = locations.iter().map(|l| self.score(l, context)).collect();
        let mut indices: Vec<usize> = (0..locations.len()).collect();
        indices.sort_by(|&a, &b| {
            self.compare(scores[a], scores[b])
                .then_with(|| self.compare_tie_breakers(&locations[a], &locations[b], context))
        });
        indices
    }

    /// Index of the most preferred location.
    pub fn select_best(&self, locations: &[Location], context: &RankingContext<'_>) -> Option<usize> {
        self.sort_indices(locations, context).first().copied()
    }

    fn compare(&self, a: f64, b: f64) -> Ordering {
        if (a - b).abs() <= self.epsilon {
            Ordering::Equal
        } else {
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
    }

    fn compare_tie_breakers(
        &self,
        a: &Location,
        b: &Location,
        context: &RankingContext<'_>,
    ) -> Ordering {
        for wr in self.rules.iter().filter(|wr| wr.weight == 0.0) {
            let ordering = self.compare(wr.rule.evaluate(a, context), wr.rule.evaluate(b, context));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for RankingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankingEngine")
            .field(
                "rules",
                &self
                    .rules
                    .iter()
                    .map(|r| format!("{}(w={})", r.rule.name(), r.weight))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
