//! Lookup errors
//!
//! "Not found" is not an error; it is [`crate::LookupOutcome::NotFound`].

use dex_model::ModelError;

/// Lookup failures
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// Connection, timeout or body read failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status other than 404
    #[error("unexpected status {0}")]
    Status(u16),

    /// Body decoded but did not make a valid record
    #[error("invalid response: {0}")]
    Invalid(#[from] ModelError),

    /// Term cannot be expressed as a path segment
    #[error("term cannot be used in a url: {0:?}")]
    Unaddressable(String),

    /// Base URL cannot carry path segments
    #[error("invalid base url: {0}")]
    BaseUrl(String),
}

impl LookupError {
    /// Whether the failure came from the network layer
    #[inline]
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Whether the service returned a server-side status
    #[inline]
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Status(code) if *code >= 500)
    }
}
