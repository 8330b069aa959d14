//! Search problem: ranked candidate domains plus a precomputed
//! pairwise conflict matrix.
//!
//! # Encoding
//! A complete assignment is a vector `choice` with one candidate index
//! per subject. Candidates are flattened into global ids so that the
//! conflict count of any candidate pair is one table lookup.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::conflicts::conflict_days;
use crate::models::Location;

/// One ranked candidate location for a subject.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// The offering.
    pub location: Location,
    /// Preference score (lower = more preferred).
    pub preference: f64,
    /// Whether the location is explicitly full (seat fallback only).
    pub seat_fallback: bool,
}

impl Candidate {
    /// Creates a regular candidate.
    pub fn new(location: Location, preference: f64) -> Self {
        Self {
            location,
            preference,
            seat_fallback: false,
        }
    }

    /// Flags the candidate as a seat fallback.
    pub fn with_seat_fallback(mut self, seat_fallback: bool) -> Self {
        self.seat_fallback = seat_fallback;
        self
    }
}

/// A subject and its candidates, most preferred first.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectDomain {
    /// Subject name.
    pub subject: String,
    /// Ranked candidates (never empty inside a [`SearchProblem`]).
    pub candidates: Vec<Candidate>,
}

impl SubjectDomain {
    /// Creates a domain.
    pub fn new(subject: impl Into<String>, candidates: Vec<Candidate>) -> Self {
        Self {
            subject: subject.into(),
            candidates,
        }
    }
}

/// Quality of a complete assignment.
///
/// Compared lexicographically: fewer conflicts first, then lower total
/// preference score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Number of (subject pair, day) overlaps.
    pub conflicts: u32,
    /// Sum of the chosen candidates' preference scores.
    pub preference: f64,
}

impl Score {
    /// Score of the empty assignment.
    pub const ZERO: Score = Score {
        conflicts: 0,
        preference: 0.0,
    };

    /// Whether this score is strictly better than `other`.
    pub fn is_better_than(&self, other: &Score) -> bool {
        self.compare(other) == Ordering::Less
    }

    /// Lexicographic comparison; preference ties within 1e-9.
    pub fn compare(&self, other: &Score) -> Ordering {
        self.conflicts.cmp(&other.conflicts).then_with(|| {
            if (self.preference - other.preference).abs() <= 1e-9 {
                Ordering::Equal
            } else {
                self.preference.total_cmp(&other.preference)
            }
        })
    }

    /// Scalar energy for annealing: conflicts dominate preference.
    pub fn energy(&self) -> f64 {
        self.conflicts as f64 * 10_000.0 + self.preference
    }

    /// Whether the assignment is conflict-free.
    pub fn is_conflict_free(&self) -> bool {
        self.conflicts == 0
    }
}

/// Ranked domains with a precomputed conflict matrix.
#[derive(Debug, Clone)]
pub struct SearchProblem {
    domains: Vec<SubjectDomain>,
    offsets: Vec<usize>,
    total: usize,
    weights: Vec<u32>,
}

impl SearchProblem {
    /// Builds the problem, computing conflict days for every candidate
    /// pair belonging to different subjects.
    ///
    /// Domains with no candidates are dropped; callers report those
    /// subjects as unschedulable before building the problem.
    pub fn new(domains: Vec<SubjectDomain>) -> Self {
        let domains: Vec<SubjectDomain> = domains
            .into_iter()
            .filter(|d| !d.candidates.is_empty())
            .collect();

        let mut offsets = Vec::with_capacity(domains.len());
        let mut total = 0;
        for d in &domains {
            offsets.push(total);
            total += d.candidates.len();
        }

        let mut weights = vec![0u32; total * total];
        for (i, di) in domains.iter().enumerate() {
            for (j, dj) in domains.iter().enumerate().skip(i + 1) {
                for (a, ca) in di.candidates.iter().enumerate() {
                    for (b, cb) in dj.candidates.iter().enumerate() {
                        let w = conflict_days(&ca.location, &cb.location);
                        if w > 0 {
                            let ga = offsets[i] + a;
                            let gb = offsets[j] + b;
                            weights[ga * total + gb] = w;
                            weights[gb * total + ga] = w;
                        }
                    }
                }
            }
        }

        Self {
            domains,
            offsets,
            total,
            weights,
        }
    }

    /// Number of subjects.
    #[inline]
    pub fn subject_count(&self) -> usize {
        self.domains.len()
    }

    /// Whether there is nothing to assign.
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// All domains.
    pub fn domains(&self) -> &[SubjectDomain] {
        &self.domains
    }

    /// One subject's domain.
    pub fn domain(&self, subject: usize) -> &SubjectDomain {
        &self.domains[subject]
    }

    /// Number of candidates for a subject.
    #[inline]
    pub fn candidate_count(&self, subject: usize) -> usize {
        self.domains[subject].candidates.len()
    }

    /// Preference score of one candidate.
    #[inline]
    pub fn preference(&self, subject: usize, candidate: usize) -> f64 {
        self.domains[subject].candidates[candidate].preference
    }

    /// Conflict days between candidate `a` of subject `i` and candidate
    /// `b` of subject `j`. Zero when `i == j`.
    #[inline]
    pub fn pair_conflicts(&self, i: usize, a: usize, j: usize, b: usize) -> u32 {
        if i == j {
            return 0;
        }
        self.weights[(self.offsets[i] + a) * self.total + self.offsets[j] + b]
    }

    /// Conflicts candidate `a` of subject `i` adds against the assigned
    /// subjects of a partial assignment.
    pub fn added_conflicts(&self, partial: &[Option<usize>], i: usize, a: usize) -> u32 {
        partial
            .iter()
            .enumerate()
            .filter_map(|(j, c)| c.map(|b| (j, b)))
            .map(|(j, b)| self.pair_conflicts(i, a, j, b))
            .sum()
    }

    /// Total conflicts of a complete assignment.
    pub fn conflicts_of(&self, choice: &[usize]) -> u32 {
        let mut total = 0;
        for i in 0..choice.len() {
            for j in i + 1..choice.len() {
                total += self.pair_conflicts(i, choice[i], j, choice[j]);
            }
        }
        total
    }

    /// Total preference of a complete assignment.
    pub fn preference_of(&self, choice: &[usize]) -> f64 {
        choice
            .iter()
            .enumerate()
            .map(|(i, &a)| self.preference(i, a))
            .sum()
    }

    /// Score of a complete assignment.
    pub fn score(&self, choice: &[usize]) -> Score {
        Score {
            conflicts: self.conflicts_of(choice),
            preference: self.preference_of(choice),
        }
    }

    /// Size of the full search space (saturating), with each domain
    /// capped at `width` candidates.
    pub fn space_size(&self, width: usize) -> u64 {
        self.domains
            .iter()
            .map(|d| d.candidates.len().min(width).max(1) as u64)
            .fold(1u64, |acc, n| acc.saturating_mul(n))
    }

    /// Whether capping domains at `width` drops any candidate.
    pub fn is_truncated(&self, width: usize) -> bool {
        self.domains.iter().any(|d| d.candidates.len() > width)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{SectionKey, TimeSlot, Weekday};

    pub(crate) fn loc(section: &str, slots: &[(Weekday, &str, &str)]) -> Location {
        slots.iter().fold(
            Location::new(SectionKey::new("BSCS", "3", section)),
            |l, (day, start, end)| l.with_slot(TimeSlot::new(*day, *start, *end)),
        )
    }

    /// Three subjects; only the second candidate of "Physics" clears
    /// "Calculus" candidate 0.
    pub(crate) fn sample_problem() -> SearchProblem {
        use Weekday::*;
        SearchProblem::new(vec![
            SubjectDomain::new(
                "Calculus",
                vec![
                    Candidate::new(loc("A", &[(Monday, "8:00", "9:30")]), -10.0),
                    Candidate::new(loc("B", &[(Tuesday, "8:00", "9:30")]), 0.0),
                ],
            ),
            SubjectDomain::new(
                "Physics",
                vec![
                    Candidate::new(loc("A", &[(Monday, "9:00", "10:30")]), -10.0),
                    Candidate::new(loc("C", &[(Monday, "11:00", "12:30")]), 0.0),
                ],
            ),
            SubjectDomain::new(
                "Chemistry",
                vec![Candidate::new(loc("D", &[(Wednesday, "8:00", "9:30")]), 0.0)],
            ),
        ])
    }

    #[test]
    fn test_pair_conflicts_symmetric() {
        let p = sample_problem();
        assert_eq!(p.pair_conflicts(0, 0, 1, 0), 1);
        assert_eq!(p.pair_conflicts(1, 0, 0, 0), 1);
        assert_eq!(p.pair_conflicts(0, 0, 1, 1), 0);
        assert_eq!(p.pair_conflicts(0, 0, 0, 1), 0);
    }

    #[test]
    fn test_score() {
        let p = sample_problem();
        assert_eq!(p.score(&[0, 0, 0]), Score { conflicts: 1, preference: -20.0 });
        assert_eq!(p.score(&[0, 1, 0]), Score { conflicts: 0, preference: -10.0 });
        assert!(p.score(&[0, 1, 0]).is_better_than(&p.score(&[0, 0, 0])));
        assert!(p.score(&[0, 1, 0]).is_better_than(&p.score(&[1, 1, 0])));
    }

    #[test]
    fn test_added_conflicts() {
        let p = sample_problem();
        let partial = vec![Some(0), None, None];
        assert_eq!(p.added_conflicts(&partial, 1, 0), 1);
        assert_eq!(p.added_conflicts(&partial, 1, 1), 0);
    }

    #[test]
    fn test_space_size_and_empty_domains() {
        let p = sample_problem();
        assert_eq!(p.space_size(8), 4);
        assert_eq!(p.space_size(1), 1);

        let empty = SearchProblem::new(vec![SubjectDomain::new("Nothing", vec![])]);
        assert!(empty.is_empty());
        assert_eq!(empty.space_size(8), 1);
        assert!(!p.is_truncated(2));
        assert!(p.is_truncated(1));
    }

    #[test]
    fn test_score_energy_orders_conflicts_first() {
        let a = Score { conflicts: 0, preference: 500.0 };
        let b = Score { conflicts: 1, preference: -500.0 };
        assert!(a.energy() < b.energy());
        assert!(a.is_better_than(&b));
    }
}
