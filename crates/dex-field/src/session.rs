//! Search-and-select session
//!
//! The widget's transient state and every rule that mutates it. The session
//! is synchronous and clock-free: the controller feeds it input, timer
//! expiries and lookup completions, and performs the I/O it asks for.
//!
//! Stale-response suppression rests on `generation`: it is bumped whenever a
//! term is committed or the results are reset, and a lookup completion is
//! applied only if it carries the current value.

use crate::debounce::{DebounceTicket, Debounced, Debouncer};
use crate::host::HostField;
use crate::observer::FieldObserver;
use crate::phase::{is_allowed, Phase, Transition};
use dex_lookup::{LookupError, LookupOutcome, SearchTerm};
use dex_model::Pokemon;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Shown when the service has no record for the term
pub const NOT_FOUND_MESSAGE: &str = "No Pokemon found with that name";
/// Shown for any other lookup failure
pub const LOOKUP_FAILED_MESSAGE: &str = "Failed to fetch Pokemon data";
/// Shown when writing the selection fails
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save Pokemon data";
/// Shown when removing the value fails
pub const CLEAR_FAILED_MESSAGE: &str = "Failed to clear Pokemon data";

/// What the controller should do after raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEffect {
    /// Redeem the ticket after its delay
    Schedule(DebounceTicket),
    /// Results were cleared; nothing to schedule
    Cleared,
}

/// A lookup the controller must perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    /// Generation the result must carry back
    pub generation: u64,
    /// Normalized term
    pub term: SearchTerm,
}

/// Whether a lookup completion was used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Result belonged to the current term and was applied
    Applied,
    /// Result was superseded and dropped
    Stale,
}

/// Result of a select/clear action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Host field updated
    Committed,
    /// Write failed; the message is also in the session's error
    Failed(String),
}

impl CommitOutcome {
    /// Whether the host field was updated
    #[inline]
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed)
    }
}

/// Copy of the session's observable state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSnapshot {
    /// Current phase
    pub phase: Phase,
    /// Raw text in the search box
    pub search_term: String,
    /// Last committed term
    pub committed: Option<String>,
    /// Lookup candidates
    pub candidates: Vec<Pokemon>,
    /// True while the committed term's request is outstanding
    pub loading: bool,
    /// User-facing message
    pub error: Option<String>,
    /// Lookup generation
    pub generation: u64,
}

impl Default for FieldSnapshot {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            search_term: String::new(),
            committed: None,
            candidates: Vec::new(),
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

/// Transient widget state
pub struct SearchSession {
    debouncer: Debouncer,
    search_term: String,
    committed: Option<SearchTerm>,
    candidates: Vec<Pokemon>,
    loading: bool,
    error: Option<String>,
    phase: Phase,
    generation: u64,
    observer: Arc<dyn FieldObserver>,
}

impl std::fmt::Debug for SearchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("phase", &self.phase)
            .field("search_term", &self.search_term)
            .field("committed", &self.committed)
            .field("candidates", &self.candidates.len())
            .field("loading", &self.loading)
            .field("error", &self.error)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl SearchSession {
    /// Create a session with the given quiescence window
    #[must_use]
    pub fn new(debounce: Duration, observer: Arc<dyn FieldObserver>) -> Self {
        Self {
            debouncer: Debouncer::new(debounce),
            search_term: String::new(),
            committed: None,
            candidates: Vec::new(),
            loading: false,
            error: None,
            phase: Phase::Idle,
            generation: 0,
            observer,
        }
    }

    /// Raw text edit
    pub fn input(&mut self, raw: impl Into<String>) -> InputEffect {
        let raw = raw.into();
        let effect = match self.debouncer.push(&raw) {
            Debounced::Pending(ticket) => {
                self.set_phase(Phase::AwaitingQuiescence);
                InputEffect::Schedule(ticket)
            }
            Debounced::Clear => {
                self.reset_results();
                InputEffect::Cleared
            }
        };
        self.search_term = raw;
        effect
    }

    /// Quiescence window elapsed for `ticket`
    ///
    /// Returns the request to issue if the ticket is still current.
    pub fn quiesce(&mut self, ticket: DebounceTicket) -> Option<LookupRequest> {
        let raw = self.debouncer.fire(ticket)?;
        let term = SearchTerm::parse(&raw)?;

        self.generation += 1;
        self.committed = Some(term.clone());
        self.loading = true;
        self.error = None;
        self.set_phase(Phase::InFlight);

        Some(LookupRequest {
            generation: self.generation,
            term,
        })
    }

    /// A lookup finished
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<LookupOutcome, LookupError>,
    ) -> Completion {
        if generation != self.generation {
            self.observer.on_stale_result(generation, self.generation);
            return Completion::Stale;
        }

        self.loading = false;
        match result {
            Ok(outcome) => {
                self.candidates = outcome.into_candidates();
                self.error = self
                    .candidates
                    .is_empty()
                    .then(|| NOT_FOUND_MESSAGE.to_string());
            }
            Err(e) => {
                tracing::warn!("Lookup failed: {}", e);
                self.candidates.clear();
                self.error = Some(LOOKUP_FAILED_MESSAGE.to_string());
            }
        }

        // Typing may have resumed while the request was out.
        if self.phase == Phase::InFlight {
            self.set_phase(Phase::Settled);
        }
        Completion::Applied
    }

    /// Write `candidate` into the host field
    ///
    /// On success the search is reset; on failure only the error changes.
    pub fn select<H: HostField + ?Sized>(&mut self, host: &H, candidate: &Pokemon) -> CommitOutcome {
        match host.commit(candidate) {
            Ok(()) => {
                self.reset_transient();
                CommitOutcome::Committed
            }
            Err(e) => {
                tracing::warn!("Failed to save #{}: {}", candidate.id, e);
                self.error = Some(SAVE_FAILED_MESSAGE.to_string());
                CommitOutcome::Failed(SAVE_FAILED_MESSAGE.to_string())
            }
        }
    }

    /// Remove the host field's value and reset the search
    pub fn clear<H: HostField + ?Sized>(&mut self, host: &H) -> CommitOutcome {
        match host.remove() {
            Ok(()) => {
                self.reset_transient();
                CommitOutcome::Committed
            }
            Err(e) => {
                tracing::warn!("Failed to clear field: {}", e);
                self.error = Some(CLEAR_FAILED_MESSAGE.to_string());
                CommitOutcome::Failed(CLEAR_FAILED_MESSAGE.to_string())
            }
        }
    }

    /// Current phase
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current lookup generation
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Raw search text
    #[inline]
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Lookup candidates
    #[inline]
    #[must_use]
    pub fn candidates(&self) -> &[Pokemon] {
        &self.candidates
    }

    /// Whether the committed term's request is outstanding
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// User-facing message
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Copy of the observable state
    #[must_use]
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            phase: self.phase,
            search_term: self.search_term.clone(),
            committed: self.committed.as_ref().map(|t| t.as_str().to_string()),
            candidates: self.candidates.clone(),
            loading: self.loading,
            error: self.error.clone(),
            generation: self.generation,
        }
    }

    /// Blank input: drop results and any outstanding request
    fn reset_results(&mut self) {
        self.debouncer.cancel();
        self.generation += 1;
        self.committed = None;
        self.candidates.clear();
        self.loading = false;
        self.error = None;
        self.set_phase(Phase::Idle);
    }

    /// After a successful commit or clear
    fn reset_transient(&mut self) {
        self.reset_results();
        self.search_term.clear();
    }

    fn set_phase(&mut self, to: Phase) {
        let from = self.phase;
        if from == to {
            return;
        }
        debug_assert!(is_allowed(from, to), "illegal phase change {from:?} -> {to:?}");
        self.phase = to;
        self.observer.on_transition(&Transition {
            from,
            to,
            generation: self.generation,
        });
    }
}
