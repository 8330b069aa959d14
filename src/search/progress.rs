//! Cooperative progress reporting and cancellation.
//!
//! Search loops call [`SearchMonitor::tick`] once per candidate
//! evaluation. Every `yield_every` evaluations the monitor reports a
//! [`ProgressEvent`] to the caller's sink and checks the cancel token.
//! These yield points are the only place a search can stop early.

use serde::Serialize;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::problem::Score;
use super::SearchStrategy;

/// Incremental progress of one search run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressEvent {
    /// Strategy producing the event.
    pub strategy: SearchStrategy,
    /// Candidate evaluations so far.
    pub evaluations: u64,
    /// Best complete score found so far, if any.
    pub best: Option<Score>,
    /// Fraction of the search space (or budget) covered, `0.0..=1.0`.
    pub explored: f64,
}

/// Receives progress events at yield points.
pub trait ProgressSink {
    /// Called at each yield point.
    fn report(&mut self, event: &ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: FnMut(&ProgressEvent),
{
    fn report(&mut self, event: &ProgressEvent) {
        self(event)
    }
}

/// Shared flag asking a running search to stop and return its best
/// assignment so far.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates an unset token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Counts evaluations and drives yield points for one search run.
pub(crate) struct SearchMonitor<'a> {
    strategy: SearchStrategy,
    sink: Option<&'a mut dyn ProgressSink>,
    cancel: Option<&'a CancelToken>,
    yield_every: u64,
    evaluations: u64,
    cancelled: bool,
}

impl<'a> SearchMonitor<'a> {
    pub(crate) fn new(
        strategy: SearchStrategy,
        sink: Option<&'a mut dyn ProgressSink>,
        cancel: Option<&'a CancelToken>,
        yield_every: u64,
    ) -> Self {
        Self {
            strategy,
            sink,
            cancel,
            yield_every: yield_every.max(1),
            evaluations: 0,
            cancelled: false,
        }
    }

    /// Records one evaluation; at yield points reports progress and
    /// returns `Break` if cancellation was requested.
    pub(crate) fn tick(&mut self, best: Option<Score>, explored: f64) -> ControlFlow<()> {
        self.evaluations += 1;
        if self.evaluations % self.yield_every != 0 {
            return ControlFlow::Continue(());
        }
        self.emit(best, explored);
        if self.cancel.is_some_and(CancelToken::is_cancelled) {
            self.cancelled = true;
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }

    /// Reports a final event with full coverage.
    pub(crate) fn finish(&mut self, best: Score) {
        self.emit(Some(best), 1.0);
    }

    pub(crate) fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub(crate) fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    fn emit(&mut self, best: Option<Score>, explored: f64) {
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.report(&ProgressEvent {
                strategy: self.strategy,
                evaluations: self.evaluations,
                best,
                explored: explored.clamp(0.0, 1.0),
            });
        }
    }
}
