//! Bounded exhaustive enumeration.
//!
//! Walks every combination of each subject's top `candidate_width`
//! candidates in odometer order (last subject varies fastest), keeping
//! the best [`Score`]. Stops at the first conflict-free combination,
//! at the `max_combinations` evaluation budget, or on cancellation.
//! A walk over capped domains is never reported complete.

use super::problem::{Score, SearchProblem};
use super::progress::SearchMonitor;
use super::{SearchConfig, SearchOutcome, SearchStrategy};

pub(crate) fn enumerate(
    problem: &SearchProblem,
    config: &SearchConfig,
    monitor: &mut SearchMonitor<'_>,
) -> SearchOutcome {
    let widths: Vec<usize> = (0..problem.subject_count())
        .map(|i| problem.candidate_count(i).min(config.candidate_width).max(1))
        .collect();
    let space = problem.space_size(config.candidate_width);
    let truncated = problem.is_truncated(config.candidate_width);
    let budget = config.max_combinations.max(1);

    let mut odometer = vec![0usize; widths.len()];
    let mut best_choice = odometer.clone();
    let mut best: Option<Score> = None;
    let mut evaluated = 0u64;
    let mut complete = false;

    loop {
        let score = problem.score(&odometer);
        evaluated += 1;
        if best.map_or(true, |b| score.is_better_than(&b)) {
            best = Some(score);
            best_choice.clone_from(&odometer);
        }

        if score.is_conflict_free() {
            complete = true;
            break;
        }
        if monitor
            .tick(best, evaluated as f64 / space as f64)
            .is_break()
        {
            break;
        }
        if !advance(&mut odometer, &widths) {
            complete = !truncated;
            break;
        }
        if evaluated >= budget {
            break;
        }
    }

    SearchOutcome {
        score: best.unwrap_or_else(|| problem.score(&best_choice)),
        choice: best_choice,
        strategy: SearchStrategy::Exhaustive,
        evaluations: evaluated,
        complete,
        cancelled: monitor.was_cancelled(),
    }
}

/// Advances the odometer; returns `false` after the last combination.
fn advance(odometer: &mut [usize], widths: &[usize]) -> bool {
    for pos in (0..odometer.len()).rev() {
        odometer[pos] += 1;
        if odometer[pos] < widths[pos] {
            return true;
        }
        odometer[pos] = 0;
    }
    false
}
