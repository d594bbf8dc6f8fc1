//! Committed search terms

use std::fmt::{self, Display, Formatter};

/// Lookup key: trimmed and lowercased, never empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Normalize raw input
    ///
    /// Returns `None` for empty or whitespace-only input.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_lowercase()))
        }
    }

    /// Whether the key can be a URL path segment
    ///
    /// `.` and `..` are resolved away by URL normalization and never name a
    /// record.
    #[inline]
    #[must_use]
    pub fn is_addressable(&self) -> bool {
        !matches!(self.0.as_str(), "." | "..")
    }

    /// The normalized key
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SearchTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SearchTerm {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
