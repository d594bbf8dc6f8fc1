//! Error types for the field widget
//!
//! Lookup and commit failures never leave the widget as errors: the session
//! turns them into user-facing messages. What remains here is for the
//! widget's owner (configuration, a dead controller) and for host bindings.

use dex_lookup::LookupError;
use dex_model::ModelError;
use dex_store::StoreError;
use std::path::PathBuf;

/// Host field write failures
#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    /// Value violates the field's storage rules
    #[error("value rejected by field validation: {0}")]
    Invalid(#[from] ModelError),

    /// Document store refused the patch
    #[error("document store error: {0}")]
    Store(#[from] StoreError),

    /// Host-specific refusal
    #[error("host rejected write: {0}")]
    Rejected(String),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Read {
        /// File location
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config is not valid TOML for [`crate::FieldConfig`]
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid config value for {key}: {reason}")]
    Invalid {
        /// Offending key
        key: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Errors surfaced to the widget's owner
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Lookup client could not be built
    #[error("lookup client error: {0}")]
    Lookup(#[from] LookupError),

    /// Controller task has stopped
    #[error("field controller is closed")]
    Closed,
}
