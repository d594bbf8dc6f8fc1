//! Error types for host documents

use std::path::PathBuf;

/// Document store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Path string is empty
    #[error("field path is empty")]
    EmptyPath,

    /// Path has an empty segment (`a..b`)
    #[error("field path has an empty segment")]
    EmptySegment,

    /// Segment contains characters other than alphanumerics and `_`
    #[error("invalid field path segment: {0}")]
    InvalidSegment(String),

    /// Path targets a system field (`_id`, `_rev`, ...)
    #[error("field is reserved: {0}")]
    ReservedField(String),

    /// An intermediate value on the path is not an object
    #[error("cannot descend into non-object at {0}")]
    NotAnObject(String),

    /// Value could not be converted to JSON
    #[error("failed to serialize value: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Document file is not a JSON object
    #[error("document {path} is not a JSON object")]
    InvalidDocument {
        /// File location
        path: PathBuf,
    },

    /// Document file could not be parsed
    #[error("failed to parse document {path}: {source}")]
    Parse {
        /// File location
        path: PathBuf,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// Filesystem failure
    #[error("document io error at {path}: {source}")]
    Io {
        /// File location
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Whether the error is about the path rather than the document
    #[inline]
    #[must_use]
    pub fn is_path_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyPath | Self::EmptySegment | Self::InvalidSegment(_) | Self::ReservedField(_)
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
