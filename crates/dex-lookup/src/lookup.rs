//! Lookup seam

use crate::error::LookupError;
use crate::term::SearchTerm;
use async_trait::async_trait;
use dex_model::Pokemon;
use std::sync::Arc;

/// Result of a lookup that reached the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The term resolved to a record
    Found(Pokemon),
    /// The service has no record for the term
    NotFound,
}

impl LookupOutcome {
    /// Candidate list for this outcome (0 or 1 entries)
    #[must_use]
    pub fn into_candidates(self) -> Vec<Pokemon> {
        match self {
            Self::Found(p) => vec![p],
            Self::NotFound => Vec::new(),
        }
    }
}

/// Resolves a search term to a record
///
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait PokemonLookup: Send + Sync {
    /// Look up a single term
    ///
    /// # Errors
    /// Any transport, status or decoding failure
    async fn lookup(&self, term: &SearchTerm) -> Result<LookupOutcome, LookupError>;
}

#[async_trait]
impl<T: PokemonLookup + ?Sized> PokemonLookup for Arc<T> {
    async fn lookup(&self, term: &SearchTerm) -> Result<LookupOutcome, LookupError> {
        (**self).lookup(term).await
    }
}
