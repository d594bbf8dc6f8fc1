//! Input debouncer
//!
//! Pure bookkeeping: the caller owns the clock. Each non-blank push
//! supersedes whatever was pending and hands back a ticket; only the latest
//! ticket can be redeemed for a committed value.

use std::time::Duration;

/// Handle for one scheduled emission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket {
    seq: u64,
    delay: Duration,
}

impl DebounceTicket {
    /// How long to wait before redeeming
    #[inline]
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Position in the input stream
    #[inline]
    #[must_use]
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What a raw value turned into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Debounced {
    /// Wait for quiescence, then redeem the ticket
    Pending(DebounceTicket),
    /// Blank input: clear results now
    Clear,
}

/// Coalesces bursts of raw input into committed values
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    seq: u64,
    pending: Option<(u64, String)>,
}

impl Debouncer {
    /// Create a debouncer with the given quiescence window
    #[inline]
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            seq: 0,
            pending: None,
        }
    }

    /// Record a raw value, superseding any pending one
    pub fn push(&mut self, raw: &str) -> Debounced {
        self.seq += 1;
        if raw.trim().is_empty() {
            self.pending = None;
            return Debounced::Clear;
        }
        self.pending = Some((self.seq, raw.to_string()));
        Debounced::Pending(DebounceTicket {
            seq: self.seq,
            delay: self.window,
        })
    }

    /// Redeem a ticket once its delay has elapsed
    ///
    /// Returns the pending value if the ticket is still the latest.
    pub fn fire(&mut self, ticket: DebounceTicket) -> Option<String> {
        match &self.pending {
            Some((seq, _)) if *seq == ticket.seq => self.pending.take().map(|(_, raw)| raw),
            _ => None,
        }
    }

    /// Drop any pending value; outstanding tickets become stale
    pub fn cancel(&mut self) {
        self.seq += 1;
        self.pending = None;
    }

    /// Whether a value is waiting for quiescence
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
