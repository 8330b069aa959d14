//! Assignment search engine.
//!
//! Chooses one candidate location per subject so that the combined
//! weekly timetable has as few (subject pair, day) overlaps as possible,
//! breaking ties by total preference score.
//!
//! # Strategies
//!
//! - **Exhaustive**: odometer enumeration over each subject's top
//!   `candidate_width` candidates, stopping at the first conflict-free
//!   combination. Bounded by `max_combinations`.
//! - **Backtracking**: most-constrained-first assignment with forward
//!   checking; on failure, a greedy pass plus min-conflicts improvement.
//! - **Evolutionary**: seeded genetic algorithm with an annealing polish.
//!   Never selected automatically.
//!
//! `Auto` picks Exhaustive when every domain fits within
//! `candidate_width` and the full search space fits under
//! `max_combinations`, otherwise Backtracking.
//!
//! # References
//! - Haralick & Elliott (1980), "Increasing Tree Search Efficiency for
//!   Constraint Satisfaction Problems"
//! - Minton et al. (1992), "Minimizing conflicts: a heuristic repair method"

mod backtracking;
mod enumeration;
mod evolution;
mod greedy;
mod problem;
pub mod progress;

pub use problem::{Candidate, Score, SearchProblem, SubjectDomain};
pub use progress::{CancelToken, ProgressEvent, ProgressSink};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{TimetableError, TimetableResult};
use crate::models::ClockRange;
use crate::ranking::DEFAULT_PREFERRED_START;
use progress::SearchMonitor;

/// Search strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    /// Exhaustive for small spaces, backtracking otherwise.
    #[default]
    Auto,
    /// Bounded enumeration.
    Exhaustive,
    /// Forward-checking backtracking with greedy fallback.
    Backtracking,
    /// Seeded genetic algorithm with annealing.
    Evolutionary,
}

/// Search engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Strategy selection.
    pub strategy: SearchStrategy,
    /// Largest capped space enumerated exhaustively; also the evaluation
    /// budget of an explicit Exhaustive run.
    pub max_combinations: u64,
    /// Candidates per subject considered by enumeration.
    pub candidate_width: usize,
    /// Node budget for backtracking.
    pub max_backtrack_steps: u64,
    /// Evaluations between progress events.
    pub yield_every: u64,
    /// RNG seed for the evolutionary strategy.
    pub seed: u64,
    /// Evolutionary population size.
    pub population_size: usize,
    /// Evolutionary generation count.
    pub generations: usize,
    /// Class start window earning the time-of-day bonus.
    pub preferred_start: ClockRange,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::Auto,
            max_combinations: 25_000,
            candidate_width: 8,
            max_backtrack_steps: 200_000,
            yield_every: 500,
            seed: 42,
            population_size: 40,
            generations: 120,
            preferred_start: DEFAULT_PREFERRED_START,
        }
    }
}

impl SearchConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the strategy.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the exhaustive ceiling.
    pub fn with_max_combinations(mut self, max: u64) -> Self {
        self.max_combinations = max;
        self
    }

    /// Sets the enumeration candidate width.
    pub fn with_candidate_width(mut self, width: usize) -> Self {
        self.candidate_width = width;
        self
    }

    /// Sets the backtracking node budget.
    pub fn with_max_backtrack_steps(mut self, steps: u64) -> Self {
        self.max_backtrack_steps = steps;
        self
    }

    /// Sets the yield interval.
    pub fn with_yield_every(mut self, every: u64) -> Self {
        self.yield_every = every;
        self
    }

    /// Sets the evolutionary seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the preferred start window.
    pub fn with_preferred_start(mut self, window: ClockRange) -> Self {
        self.preferred_start = window;
        self
    }

    /// Checks value ranges.
    ///
    /// # Errors
    /// [`TimetableError::InvalidConfig`] for a zero width, yield interval,
    /// combination ceiling, or population size.
    pub fn validate(&self) -> TimetableResult<()> {
        if self.candidate_width == 0 {
            return Err(TimetableError::invalid_config("candidate_width", "must be at least 1"));
        }
        if self.yield_every == 0 {
            return Err(TimetableError::invalid_config("yield_every", "must be at least 1"));
        }
        if self.max_combinations == 0 {
            return Err(TimetableError::invalid_config("max_combinations", "must be at least 1"));
        }
        if self.population_size < 2 {
            return Err(TimetableError::invalid_config("population_size", "must be at least 2"));
        }
        Ok(())
    }

    /// Concrete strategy for a problem (never `Auto`).
    pub fn resolve_strategy(&self, problem: &SearchProblem) -> SearchStrategy {
        match self.strategy {
            SearchStrategy::Auto => {
                if !problem.is_truncated(self.candidate_width)
                    && problem.space_size(self.candidate_width) <= self.max_combinations
                {
                    SearchStrategy::Exhaustive
                } else {
                    SearchStrategy::Backtracking
                }
            }
            other => other,
        }
    }
}

/// Result of one search run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Candidate index per subject, parallel to the problem's domains.
    pub choice: Vec<usize>,
    /// Score of `choice`.
    pub score: Score,
    /// Strategy that ran.
    pub strategy: SearchStrategy,
    /// Candidate evaluations performed.
    pub evaluations: u64,
    /// The search finished its space (or found a conflict-free answer)
    /// rather than stopping on a budget.
    pub complete: bool,
    /// Stopped early at the caller's request.
    pub cancelled: bool,
}

impl SearchOutcome {
    fn empty(strategy: SearchStrategy) -> Self {
        Self {
            choice: Vec::new(),
            score: Score::ZERO,
            strategy,
            evaluations: 0,
            complete: true,
            cancelled: false,
        }
    }
}

/// Runs the configured strategy on a problem.
///
/// Always returns a complete assignment for a non-empty problem, even
/// when cancelled.
pub fn search<'a>(
    problem: &SearchProblem,
    config: &SearchConfig,
    sink: Option<&'a mut dyn ProgressSink>,
    cancel: Option<&'a CancelToken>,
) -> SearchOutcome {
    let strategy = config.resolve_strategy(problem);
    if problem.is_empty() {
        return SearchOutcome::empty(strategy);
    }

    info!(
        target: "timetable::search",
        ?strategy,
        subjects = problem.subject_count(),
        space = problem.space_size(config.candidate_width),
        "starting assignment search"
    );

    let mut monitor = SearchMonitor::new(strategy, sink, cancel, config.yield_every);
    let outcome = match strategy {
        SearchStrategy::Auto | SearchStrategy::Exhaustive => {
            enumeration::enumerate(problem, config, &mut monitor)
        }
        SearchStrategy::Backtracking => backtracking::solve(problem, config, &mut monitor),
        SearchStrategy::Evolutionary => evolution::evolve(problem, config, &mut monitor),
    };
    monitor.finish(outcome.score);

    debug!(
        target: "timetable::search",
        conflicts = outcome.score.conflicts,
        preference = outcome.score.preference,
        evaluations = outcome.evaluations,
        complete = outcome.complete,
        cancelled = outcome.cancelled,
        "assignment search finished"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::problem::tests::{loc, sample_problem};
    use super::*;
    use crate::models::Weekday;

    #[test]
    fn test_default_config_valid() {
        assert!(SearchConfig::default().validate().is_ok());
        assert!(SearchConfig::new().with_candidate_width(0).validate().is_err());
        assert!(SearchConfig::new().with_yield_every(0).validate().is_err());
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"strategy": "backtracking", "seed": 7}"#).unwrap();
        assert_eq!(config.strategy, SearchStrategy::Backtracking);
        assert_eq!(config.seed, 7);
        assert_eq!(config.candidate_width, 8);
    }

    #[test]
    fn test_auto_strategy_by_size() {
        let p = sample_problem();
        assert_eq!(SearchConfig::new().resolve_strategy(&p), SearchStrategy::Exhaustive);
        assert_eq!(
            SearchConfig::new().with_max_combinations(3).resolve_strategy(&p),
            SearchStrategy::Backtracking
        );
        // Width 1 would hide the second Calculus and Physics candidates.
        assert_eq!(
            SearchConfig::new().with_candidate_width(1).resolve_strategy(&p),
            SearchStrategy::Backtracking
        );
    }

    #[test]
    fn test_auto_reaches_candidates_past_width() {
        use Weekday::*;
        let mut calculus: Vec<Candidate> = (0..8)
            .map(|i| Candidate::new(loc(&format!("S{i}"), &[(Monday, "8:00", "9:30")]), 0.0))
            .collect();
        calculus.push(Candidate::new(loc("S8", &[(Tuesday, "8:00", "9:30")]), 0.0));
        calculus.push(Candidate::new(loc("S9", &[(Tuesday, "8:00", "9:30")]), 0.0));
        let p = SearchProblem::new(vec![
            SubjectDomain::new("Calculus", calculus),
            SubjectDomain::new(
                "Physics",
                vec![Candidate::new(loc("P", &[(Monday, "8:00", "9:30")]), 0.0)],
            ),
        ]);

        let outcome = search(&p, &SearchConfig::default(), None, None);
        assert_eq!(outcome.strategy, SearchStrategy::Backtracking);
        assert_eq!(outcome.score.conflicts, 0);
        assert_eq!(outcome.choice, vec![8, 0]);

        let capped = SearchConfig::new().with_strategy(SearchStrategy::Exhaustive);
        let outcome = search(&p, &capped, None, None);
        assert_eq!(outcome.score.conflicts, 1);
        assert!(!outcome.complete);
    }

    #[test]
    fn test_all_strategies_agree_on_small_problem() {
        let p = sample_problem();
        for strategy in [
            SearchStrategy::Auto,
            SearchStrategy::Exhaustive,
            SearchStrategy::Backtracking,
            SearchStrategy::Evolutionary,
        ] {
            let config = SearchConfig::new().with_strategy(strategy);
            let outcome = search(&p, &config, None, None);
            assert_eq!(outcome.score.conflicts, 0, "{strategy:?}");
            assert_eq!(outcome.choice, vec![0, 1, 0], "{strategy:?}");
        }
    }

    #[test]
    fn test_empty_problem() {
        let p = SearchProblem::new(Vec::new());
        let outcome = search(&p, &SearchConfig::default(), None, None);
        assert!(outcome.choice.is_empty());
        assert!(outcome.complete);
    }

    #[test]
    fn test_progress_final_event() {
        let p = sample_problem();
        let mut events = Vec::new();
        let mut sink = |e: &ProgressEvent| events.push(e.clone());
        {
            let sink: &mut dyn ProgressSink = &mut sink;
            search(&p, &SearchConfig::default(), Some(sink), None);
        }
        let last = events.last().unwrap();
        assert_eq!(last.explored, 1.0);
        assert_eq!(last.best.unwrap().conflicts, 0);
    }

    #[test]
    fn test_unavoidable_conflict_reported() {
        use Weekday::*;
        let p = SearchProblem::new(vec![
            SubjectDomain::new(
                "Calculus",
                vec![Candidate::new(loc("A", &[(Monday, "8:00", "9:30")]), 0.0)],
            ),
            SubjectDomain::new(
                "Physics",
                vec![Candidate::new(loc("B", &[(Monday, "8:00", "9:30")]), 0.0)],
            ),
        ]);
        for strategy in [SearchStrategy::Exhaustive, SearchStrategy::Backtracking] {
            let outcome = search(&p, &SearchConfig::new().with_strategy(strategy), None, None);
            assert_eq!(outcome.score.conflicts, 1);
            assert_eq!(outcome.choice, vec![0, 0]);
        }
    }
}
