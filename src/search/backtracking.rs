//! Forward-checking backtracking search.
//!
//! Looks for a conflict-free assignment. Subjects are assigned
//! most-constrained first (fewest live candidates, then lowest index),
//! candidates in rank order. Each assignment prunes every candidate of
//! the unassigned subjects that would overlap it; a subject left with no
//! live candidate triggers a backtrack. Pruning is recorded on a trail
//! and undone on backtrack.
//!
//! When no conflict-free assignment exists, or the node budget runs
//! out, the result falls back to greedy construction plus
//! min-conflicts improvement.
//!
//! # Reference
//! Haralick & Elliott (1980), "Increasing Tree Search Efficiency for
//! Constraint Satisfaction Problems"

use tracing::debug;

use super::greedy;
use super::problem::SearchProblem;
use super::progress::SearchMonitor;
use super::{SearchConfig, SearchOutcome, SearchStrategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Halt {
    Budget,
    Cancelled,
}

struct ForwardChecker<'p, 'm, 'a> {
    problem: &'p SearchProblem,
    monitor: &'m mut SearchMonitor<'a>,
    alive: Vec<Vec<bool>>,
    alive_count: Vec<usize>,
    assigned: Vec<Option<usize>>,
    /// Pruned (subject, candidate) pairs, in pruning order.
    trail: Vec<(usize, usize)>,
    steps: u64,
    max_steps: u64,
    halt: Option<Halt>,
}

impl<'p, 'm, 'a> ForwardChecker<'p, 'm, 'a> {
    fn new(problem: &'p SearchProblem, monitor: &'m mut SearchMonitor<'a>, max_steps: u64) -> Self {
        let n = problem.subject_count();
        Self {
            problem,
            monitor,
            alive: (0..n).map(|i| vec![true; problem.candidate_count(i)]).collect(),
            alive_count: (0..n).map(|i| problem.candidate_count(i)).collect(),
            assigned: vec![None; n],
            trail: Vec::new(),
            steps: 0,
            max_steps: max_steps.max(1),
            halt: None,
        }
    }

    /// Unassigned subject with the fewest live candidates.
    fn select_subject(&self) -> Option<usize> {
        (0..self.assigned.len())
            .filter(|&i| self.assigned[i].is_none())
            .min_by_key(|&i| (self.alive_count[i], i))
    }

    fn search(&mut self) -> bool {
        let Some(subject) = self.select_subject() else {
            return true;
        };

        for candidate in 0..self.problem.candidate_count(subject) {
            if !self.alive[subject][candidate] {
                continue;
            }
            self.steps += 1;
            if self.steps > self.max_steps {
                self.halt = Some(Halt::Budget);
                return false;
            }
            let explored = self.steps as f64 / self.max_steps as f64;
            if self.monitor.tick(None, explored).is_break() {
                self.halt = Some(Halt::Cancelled);
                return false;
            }

            let mark = self.trail.len();
            self.assigned[subject] = Some(candidate);
            if self.prune(subject, candidate) && self.search() {
                return true;
            }
            if self.halt.is_some() {
                return false;
            }
            self.restore(mark);
            self.assigned[subject] = None;
        }
        false
    }

    /// Removes candidates of unassigned subjects that overlap the new
    /// assignment. Returns `false` on a domain wipe-out.
    fn prune(&mut self, subject: usize, candidate: usize) -> bool {
        for other in 0..self.assigned.len() {
            if self.assigned[other].is_some() {
                continue;
            }
            for b in 0..self.problem.candidate_count(other) {
                if self.alive[other][b]
                    && self.problem.pair_conflicts(subject, candidate, other, b) > 0
                {
                    self.alive[other][b] = false;
                    self.alive_count[other] -= 1;
                    self.trail.push((other, b));
                }
            }
            if self.alive_count[other] == 0 {
                return false;
            }
        }
        true
    }

    fn restore(&mut self, mark: usize) {
        while self.trail.len() > mark {
            if let Some((subject, candidate)) = self.trail.pop() {
                self.alive[subject][candidate] = true;
                self.alive_count[subject] += 1;
            }
        }
    }
}

pub(crate) fn solve(
    problem: &SearchProblem,
    config: &SearchConfig,
    monitor: &mut SearchMonitor<'_>,
) -> SearchOutcome {
    let (found, halt, steps, assigned) = {
        let mut checker = ForwardChecker::new(problem, monitor, config.max_backtrack_steps);
        let found = checker.search();
        (found, checker.halt, checker.steps, checker.assigned)
    };

    if found {
        let choice: Vec<usize> = assigned.into_iter().flatten().collect();
        return SearchOutcome {
            score: problem.score(&choice),
            choice,
            strategy: SearchStrategy::Backtracking,
            evaluations: monitor.evaluations(),
            complete: true,
            cancelled: false,
        };
    }

    debug!(
        target: "timetable::search",
        steps,
        ?halt,
        "no conflict-free assignment from backtracking, using greedy repair"
    );

    let mut choice = greedy::construct(problem);
    let mut cancelled = halt == Some(Halt::Cancelled);
    if !cancelled {
        cancelled = !greedy::improve(problem, &mut choice, monitor);
    }

    SearchOutcome {
        score: problem.score(&choice),
        choice,
        strategy: SearchStrategy::Backtracking,
        evaluations: monitor.evaluations(),
        // An exhausted tree proves no conflict-free assignment exists.
        complete: halt.is_none(),
        cancelled,
    }
}
