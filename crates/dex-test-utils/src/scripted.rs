//! In-process lookup fake

use async_trait::async_trait;
use dex_lookup::{LookupError, LookupOutcome, PokemonLookup, SearchTerm};
use dex_model::Pokemon;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

/// Canned answer for one term
#[derive(Debug, Clone)]
pub enum Reply {
    /// Record exists
    Found(Pokemon),
    /// 404
    NotFound,
    /// Non-success HTTP status other than 404
    Status(u16),
}

/// In-process [`PokemonLookup`] with per-term replies and latencies
///
/// Unscripted terms answer `NotFound` immediately.
#[derive(Debug, Default)]
pub struct ScriptedLookup {
    replies: HashMap<String, (Reply, Duration)>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedLookup {
    /// No scripted terms
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `term` with `pokemon`
    pub fn found(self, term: &str, pokemon: Pokemon) -> Self {
        self.reply(term, Reply::Found(pokemon), Duration::ZERO)
    }

    /// Answer `term` with not found
    pub fn not_found(self, term: &str) -> Self {
        self.reply(term, Reply::NotFound, Duration::ZERO)
    }

    /// Fail `term` with a non-success status
    pub fn status(self, term: &str, status: u16) -> Self {
        self.reply(term, Reply::Status(status), Duration::ZERO)
    }

    /// Answer `term` with `reply` after `latency`
    pub fn reply(mut self, term: &str, reply: Reply, latency: Duration) -> Self {
        self.replies.insert(term.to_string(), (reply, latency));
        self
    }

    /// Terms requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Number of lookups so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl PokemonLookup for ScriptedLookup {
    async fn lookup(&self, term: &SearchTerm) -> Result<LookupOutcome, LookupError> {
        self.requests.lock().push(term.as_str().to_string());

        let (reply, latency) = self
            .replies
            .get(term.as_str())
            .cloned()
            .unwrap_or((Reply::NotFound, Duration::ZERO));

        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        match reply {
            Reply::Found(p) => Ok(LookupOutcome::Found(p)),
            Reply::NotFound => Ok(LookupOutcome::NotFound),
            Reply::Status(code) => Err(LookupError::Status(code)),
        }
    }
}
