//! Observer that records what it sees

use dex_field::{FieldObserver, Phase, Transition};
use parking_lot::Mutex;

/// Keeps every event for later assertions
#[derive(Debug, Default)]
pub struct RecordingObserver {
    transitions: Mutex<Vec<Transition>>,
    stale: Mutex<Vec<(u64, u64)>>,
}

impl RecordingObserver {
    /// Empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Every transition, in order
    pub fn transitions(&self) -> Vec<Transition> {
        self.transitions.lock().clone()
    }

    /// Target phase of each transition, in order
    pub fn phases(&self) -> Vec<Phase> {
        self.transitions.lock().iter().map(|t| t.to).collect()
    }

    /// `(result_generation, current_generation)` per discarded result
    pub fn stale_results(&self) -> Vec<(u64, u64)> {
        self.stale.lock().clone()
    }
}

impl FieldObserver for RecordingObserver {
    fn on_transition(&self, transition: &Transition) {
        self.transitions.lock().push(*transition);
    }

    fn on_stale_result(&self, result_generation: u64, current_generation: u64) {
        self.stale.lock().push((result_generation, current_generation));
    }
}
