//! Timetable resolution entry point.
//!
//! Ties the pipeline together: load the dataset, build the catalog,
//! rank each subject's candidate sections, search for the assignment
//! with the fewest overlaps, then assemble the weekly timetable and
//! report conflicts, unschedulable subjects, seat advisories, and
//! suggestions.
//!
//! # Example
//! ```
//! use u_timetable::models::{DatasetSlot, Preferences, SectionKey, SectionTimetable, TimetableDataset, Weekday};
//! use u_timetable::resolver::{resolve, SubjectRequest};
//!
//! let dataset = TimetableDataset::new().with_section(
//!     SectionTimetable::new(SectionKey::new("BSCS", "3", "A"))
//!         .with_slot(Weekday::Monday, DatasetSlot::new("Calculus", "8:00", "9:30")),
//! );
//! let result = resolve(&[SubjectRequest::new("Calculus")], &Preferences::new(), &dataset, None).unwrap();
//! assert!(result.success);
//! assert_eq!(result.timetable.entry_count(), 1);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::assembler::{assemble, build_suggestions, Suggestion, TimetableKpi};
use crate::catalog::{build_catalog, Catalog};
use crate::conflicts::{conflict_subjects, detect_conflicts};
use crate::error::TimetableResult;
use crate::models::{
    Assignment, ConflictRecord, DatasetProvider, Location, Placement, Preferences,
    ResolvedTimetable, Subject,
};
use crate::ranking::{RankingContext, RankingEngine};
use crate::search::{
    search, CancelToken, Candidate, ProgressSink, SearchConfig, SearchProblem, SearchStrategy,
    SubjectDomain,
};
use crate::validation::{validate_request, ValidationIssue};

/// A subject the student wants, optionally with its own offerings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRequest {
    /// Subject name as it appears in the dataset.
    pub name: String,
    /// Explicit offerings; when present the dataset is not consulted
    /// for this subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<Location>>,
}

impl SubjectRequest {
    /// Requests a subject from the dataset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locations: None,
        }
    }

    /// Supplies explicit offerings.
    pub fn with_locations(mut self, locations: Vec<Location>) -> Self {
        self.locations = Some(locations);
        self
    }
}

impl From<&str> for SubjectRequest {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Outcome of one resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResult {
    /// No conflicts and every subject placed.
    pub success: bool,
    /// Weekly timetable of the chosen sections.
    pub timetable: ResolvedTimetable,
    /// Subjects involved in any conflict, sorted.
    pub conflict_subjects: Vec<String>,
    /// One record per day per conflicting subject pair.
    pub conflict_details: Vec<ConflictRecord>,
    /// Subjects no section offers.
    pub unschedulable_subjects: Vec<String>,
    /// Subjects placed in a full section because every section was full.
    pub seat_advisories: Vec<String>,
    /// Alternative sections for conflicting subjects.
    pub suggestions: Vec<Suggestion>,
    /// Non-fatal input findings.
    pub warnings: Vec<ValidationIssue>,
    /// Chosen section per placed subject.
    pub assignment: Assignment,
    /// Search strategy that produced the assignment.
    pub strategy: SearchStrategy,
    /// Candidate evaluations performed by the search.
    pub evaluations: u64,
    /// The search stopped early on request.
    pub cancelled: bool,
}

impl ResolveResult {
    /// Result for a request with no subjects.
    pub fn empty() -> Self {
        Self {
            success: true,
            timetable: ResolvedTimetable::new(),
            conflict_subjects: Vec::new(),
            conflict_details: Vec::new(),
            unschedulable_subjects: Vec::new(),
            seat_advisories: Vec::new(),
            suggestions: Vec::new(),
            warnings: Vec::new(),
            assignment: Assignment::new(),
            strategy: SearchStrategy::Auto,
            evaluations: 0,
            cancelled: false,
        }
    }

    /// Number of conflict records.
    pub fn conflict_count(&self) -> usize {
        self.conflict_details.len()
    }

    /// Quality indicators of the resolved timetable.
    pub fn kpi(&self) -> TimetableKpi {
        TimetableKpi::calculate(&self.timetable)
    }
}

/// Configured resolver.
///
/// # Example
/// ```
/// use u_timetable::resolver::Resolver;
/// use u_timetable::search::{SearchConfig, SearchStrategy};
///
/// let resolver = Resolver::new()
///     .with_config(SearchConfig::new().with_strategy(SearchStrategy::Backtracking));
/// assert_eq!(resolver.config().strategy, SearchStrategy::Backtracking);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: SearchConfig,
    ranking: RankingEngine,
    cancel: Option<CancelToken>,
}

impl Resolver {
    /// Creates a resolver with default search settings and ranking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search configuration.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the ranking engine.
    pub fn with_ranking(mut self, ranking: RankingEngine) -> Self {
        self.ranking = ranking;
        self
    }

    /// Attaches a cancellation token checked at every yield point.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Search configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Resolves a set of subject requests.
    ///
    /// # Errors
    /// [`crate::TimetableError::InvalidConfig`] for an invalid search
    /// configuration, or whatever the dataset provider fails with. Data
    /// problems inside the dataset are reported as warnings instead.
    pub fn resolve<P>(
        &self,
        subjects: &[SubjectRequest],
        preferences: &Preferences,
        provider: &P,
        sink: Option<&mut dyn ProgressSink>,
    ) -> TimetableResult<ResolveResult>
    where
        P: DatasetProvider + ?Sized,
    {
        self.config.validate()?;
        if subjects.is_empty() {
            return Ok(ResolveResult::empty());
        }

        let dataset = provider.load()?;
        let warnings = validate_request(subjects, &dataset);
        for issue in &warnings {
            debug!(target: "timetable::resolver", kind = ?issue.kind, "{}", issue.message);
        }

        let mut catalog = build_catalog(&dataset, subjects.iter().map(|s| s.name.as_str()), preferences);
        for request in subjects {
            if let Some(locations) = &request.locations {
                catalog.insert(Subject::from_locations(
                    request.name.trim(),
                    locations.clone(),
                    preferences,
                ));
            }
        }

        let unschedulable: Vec<String> = catalog
            .subjects()
            .iter()
            .filter(|s| s.is_unoffered())
            .map(|s| s.name.clone())
            .collect();

        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            warn!(target: "timetable::resolver", "cancelled before search; nothing placed");
            return Ok(ResolveResult {
                success: false,
                unschedulable_subjects: catalog.subjects().iter().map(|s| s.name.clone()).collect(),
                warnings,
                cancelled: true,
                ..ResolveResult::empty()
            });
        }

        let problem = SearchProblem::new(self.domains(&catalog, preferences));
        let sink = sink.map(|s| -> &mut dyn ProgressSink { s });
        let outcome = search(&problem, &self.config, sink, self.cancel.as_ref());

        let mut assignment = Assignment::new();
        for (i, &choice) in outcome.choice.iter().enumerate() {
            let domain = problem.domain(i);
            let candidate = &domain.candidates[choice];
            assignment.place(
                Placement::new(domain.subject.clone(), candidate.location.clone())
                    .with_seat_fallback(candidate.seat_fallback),
            );
        }

        let timetable = assemble(&assignment);
        let conflict_details = detect_conflicts(&timetable);
        let suggestions = build_suggestions(&conflict_details, &catalog, &assignment);
        let seat_advisories: Vec<String> = assignment
            .seat_fallback_subjects()
            .into_iter()
            .map(str::to_string)
            .collect();
        let success = conflict_details.is_empty() && unschedulable.is_empty();

        info!(
            target: "timetable::resolver",
            subjects = catalog.len(),
            placed = assignment.len(),
            conflicts = conflict_details.len(),
            unschedulable = unschedulable.len(),
            seat_advisories = seat_advisories.len(),
            warnings = warnings.len(),
            strategy = ?outcome.strategy,
            success,
            "resolved timetable"
        );

        Ok(ResolveResult {
            success,
            timetable,
            conflict_subjects: conflict_subjects(&conflict_details),
            conflict_details,
            unschedulable_subjects: unschedulable,
            seat_advisories,
            suggestions,
            warnings,
            assignment,
            strategy: outcome.strategy,
            evaluations: outcome.evaluations,
            cancelled: outcome.cancelled,
        })
    }

    /// Ranked candidate domains, one per offered subject.
    ///
    /// Subjects with eligible sections rank those; subjects whose every
    /// section is full rank the full ones and flag them as seat fallback.
    fn domains(&self, catalog: &Catalog, preferences: &Preferences) -> Vec<SubjectDomain> {
        catalog
            .subjects()
            .iter()
            .filter(|s| !s.is_unoffered())
            .map(|subject| {
                let fallback = subject.is_seat_limited();
                let pool = if fallback {
                    &subject.full_locations
                } else {
                    &subject.locations
                };
                let context = RankingContext::new(&subject.name, preferences)
                    .with_preferred_start(self.config.preferred_start);
                let candidates = self
                    .ranking
                    .sort_indices(pool, &context)
                    .into_iter()
                    .map(|i| {
                        Candidate::new(pool[i].clone(), self.ranking.score(&pool[i], &context))
                            .with_seat_fallback(fallback)
                    })
                    .collect();
                if fallback {
                    debug!(
                        target: "timetable::resolver",
                        subject = %subject.name,
                        "every section full; ranking full sections"
                    );
                }
                SubjectDomain::new(subject.name.clone(), candidates)
            })
            .collect()
    }
}

/// Resolves with the default [`Resolver`].
///
/// # Errors
/// See [`Resolver::resolve`].
pub fn resolve<P>(
    subjects: &[SubjectRequest],
    preferences: &Preferences,
    provider: &P,
    sink: Option<&mut dyn ProgressSink>,
) -> TimetableResult<ResolveResult>
where
    P: DatasetProvider + ?Sized,
{
    Resolver::new().resolve(subjects, preferences, provider, sink)
}
