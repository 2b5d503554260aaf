//! Report session state
//!
//! Explicit state object for the single "current report" slot. The
//! caller holds one session per view, begins a request before calling
//! the provider and finishes it with the rendered result.
//!
//! Rules:
//! - at most one request is in flight; `begin` returns `None` while one
//!   is pending, which keeps the submit trigger disabled
//! - a request, once started, always runs to completion or failure;
//!   there is no cancellation
//! - switching the category tab while a request is pending marks that
//!   request stale via a generation counter; its late result is
//!   discarded instead of overwriting the newer view
//! - the current report slot is overwritten atomically on successful,
//!   non-stale completion; failure restores the idle state and leaves
//!   the previous report in place

use crate::render::RenderedReport;

/// Token handed out by [`ReportSession::begin`], consumed on completion
#[derive(Debug)]
pub struct RequestToken {
    generation: u64,
}

/// What happened to a finished request's result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The result was applied to the current report slot
    Applied,
    /// The request was stale (category switched or view reset); the
    /// result was discarded
    DiscardedStale,
}

/// Per-view report state
#[derive(Debug, Default)]
pub struct ReportSession {
    next_generation: u64,
    /// Generation of the in-flight request, if any
    active: Option<u64>,
    current: Option<RenderedReport>,
}

impl ReportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request; `None` while another request is in flight
    pub fn begin(&mut self) -> Option<RequestToken> {
        if self.active.is_some() {
            return None;
        }
        self.next_generation += 1;
        self.active = Some(self.next_generation);
        Some(RequestToken {
            generation: self.next_generation,
        })
    }

    /// Complete a request with its rendered result
    ///
    /// A token whose generation no longer matches the active request is
    /// stale; its result is discarded and the slot is untouched.
    pub fn finish(&mut self, token: RequestToken, report: RenderedReport) -> CompletionOutcome {
        if self.active == Some(token.generation) {
            self.active = None;
            self.current = Some(report);
            CompletionOutcome::Applied
        } else {
            CompletionOutcome::DiscardedStale
        }
    }

    /// Complete a request that failed
    ///
    /// Re-enables the trigger and leaves the previous report in place.
    pub fn fail(&mut self, token: RequestToken) {
        if self.active == Some(token.generation) {
            self.active = None;
        }
    }

    /// Switch the category tab
    ///
    /// Any in-flight request becomes stale and the trigger re-enables
    /// for the new tab; the displayed report stays until replaced.
    pub fn switch_category(&mut self) {
        self.active = None;
    }

    /// Reset the view: discards any in-flight request and the current
    /// report
    pub fn reset(&mut self) {
        self.active = None;
        self.current = None;
    }

    /// The currently displayed report, if any
    pub fn current(&self) -> Option<&RenderedReport> {
        self.current.as_ref()
    }

    /// Whether the trigger is enabled (no request in flight)
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }
}
