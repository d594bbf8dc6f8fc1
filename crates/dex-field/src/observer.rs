//! Observability hooks
//!
//! The session does no I/O of its own. Anything that wants to watch it
//! (logging, a debug overlay, tests) implements [`FieldObserver`].

use crate::phase::Transition;

/// Receives state-machine events
pub trait FieldObserver: Send + Sync {
    /// Called after every phase change
    fn on_transition(&self, transition: &Transition);

    /// Called when a lookup result is discarded because a newer term was committed
    fn on_stale_result(&self, _result_generation: u64, _current_generation: u64) {}
}

/// Forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl FieldObserver for TracingObserver {
    fn on_transition(&self, t: &Transition) {
        tracing::debug!("Field phase {:?} -> {:?} (gen {})", t.from, t.to, t.generation);
    }

    fn on_stale_result(&self, result_generation: u64, current_generation: u64) {
        tracing::debug!(
            "Discarding lookup result for gen {} (current gen {})",
            result_generation,
            current_generation
        );
    }
}

/// Ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl FieldObserver for NoopObserver {
    fn on_transition(&self, _transition: &Transition) {}
}
