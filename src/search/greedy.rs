//! Greedy construction and min-conflicts improvement.
//!
//! Used when backtracking cannot find a conflict-free assignment within
//! its budget, and to seed the evolutionary population.

use super::problem::{Score, SearchProblem};
use super::progress::SearchMonitor;

/// Upper bound on improvement sweeps over all subjects.
const MAX_IMPROVEMENT_PASSES: usize = 64;

/// Builds a complete assignment one subject at a time.
///
/// Subjects with fewer candidates go first. Each takes the candidate
/// adding the fewest conflicts against those already placed, then the
/// lowest preference score, then the lowest index.
pub(crate) fn construct(problem: &SearchProblem) -> Vec<usize> {
    let n = problem.subject_count();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| problem.candidate_count(i));

    let mut partial: Vec<Option<usize>> = vec![None; n];
    for &i in &order {
        let mut best: Option<(usize, Score)> = None;
        for a in 0..problem.candidate_count(i) {
            let score = Score {
                conflicts: problem.added_conflicts(&partial, i, a),
                preference: problem.preference(i, a),
            };
            if best.map_or(true, |(_, b)| score.is_better_than(&b)) {
                best = Some((a, score));
            }
        }
        partial[i] = Some(best.map_or(0, |(a, _)| a));
    }

    partial.into_iter().map(|c| c.unwrap_or(0)).collect()
}

/// Repeatedly moves single subjects to strictly better candidates until
/// no move helps or the pass limit is reached.
///
/// Returns `false` if cancelled at a yield point.
pub(crate) fn improve(
    problem: &SearchProblem,
    choice: &mut [usize],
    monitor: &mut SearchMonitor<'_>,
) -> bool {
    let mut current = problem.score(choice);

    for _ in 0..MAX_IMPROVEMENT_PASSES {
        let mut improved = false;
        for i in 0..choice.len() {
            let held = choice[i];
            let held_conflicts = conflicts_against(problem, choice, i, held);
            for a in 0..problem.candidate_count(i) {
                if a == choice[i] {
                    continue;
                }
                let candidate = Score {
                    conflicts: current.conflicts - held_conflicts
                        + conflicts_against(problem, choice, i, a),
                    preference: current.preference - problem.preference(i, held)
                        + problem.preference(i, a),
                };
                if candidate.is_better_than(&current) {
                    choice[i] = a;
                    current = candidate;
                    improved = true;
                    break;
                }
                if monitor.tick(Some(current), 0.0).is_break() {
                    return false;
                }
            }
        }
        if !improved {
            break;
        }
    }
    true
}

/// Conflicts of candidate `a` for subject `i` against every other
/// subject's current choice.
fn conflicts_against(problem: &SearchProblem, choice: &[usize], i: usize, a: usize) -> u32 {
    choice
        .iter()
        .enumerate()
        .map(|(j, &b)| problem.pair_conflicts(i, a, j, b))
        .sum()
}
