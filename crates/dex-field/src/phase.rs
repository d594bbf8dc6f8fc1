//! Search phases and the transitions between them

use serde::Serialize;

/// Where the search workflow currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing typed, or results cleared
    Idle,
    /// Raw input received, waiting for the quiescence window
    AwaitingQuiescence,
    /// Request for the committed term outstanding
    InFlight,
    /// Result for the committed term applied
    Settled,
}

/// One observed phase change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// Phase before
    pub from: Phase,
    /// Phase after
    pub to: Phase,
    /// Lookup generation at the time of the change
    pub generation: u64,
}

/// Phases reachable from `from`
#[must_use]
pub fn allowed_transitions(from: Phase) -> Vec<Phase> {
    use Phase::*;
    match from {
        Idle => vec![AwaitingQuiescence],
        AwaitingQuiescence => vec![InFlight, Idle],
        InFlight => vec![Settled, AwaitingQuiescence, Idle],
        Settled => vec![AwaitingQuiescence, Idle],
    }
}

/// Whether `from -> to` is a legal change
#[must_use]
pub fn is_allowed(from: Phase, to: Phase) -> bool {
    allowed_transitions(from).contains(&to)
}
