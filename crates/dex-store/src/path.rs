//! Dotted field paths
//!
//! Addresses a field inside a document, e.g. `pokemon` or
//! `hero.companion`. Segments are alphanumeric plus `_`; the first segment
//! may not start with `_` because those names belong to the store.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Fully-qualified path of a document field
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Path of a top-level field
    ///
    /// # Errors
    /// Same rules as [`FromStr`]
    pub fn single(segment: impl Into<String>) -> Result<Self, StoreError> {
        let segment = segment.into();
        validate_segment(&segment)?;
        check_reserved(&segment)?;
        Ok(Self(vec![segment]))
    }

    /// Get path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Parent path segments and the final key
    #[must_use]
    pub fn split_last(&self) -> (&[String], &str) {
        match self.0.split_last() {
            Some((last, parents)) => (parents, last.as_str()),
            None => (&[], ""),
        }
    }
}

fn validate_segment(seg: &str) -> Result<(), StoreError> {
    if seg.is_empty() {
        Err(StoreError::EmptySegment)
    } else if seg.contains(|c: char| !c.is_alphanumeric() && c != '_') {
        Err(StoreError::InvalidSegment(seg.to_string()))
    } else {
        Ok(())
    }
}

fn check_reserved(first: &str) -> Result<(), StoreError> {
    if first.starts_with('_') {
        Err(StoreError::ReservedField(first.to_string()))
    } else {
        Ok(())
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for FieldPath {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(StoreError::EmptyPath);
        }

        let segments: Vec<String> = s
            .split('.')
            .map(|seg| validate_segment(seg).map(|()| seg.to_string()))
            .collect::<Result<_, _>>()?;

        check_reserved(&segments[0])?;
        Ok(Self(segments))
    }
}

impl TryFrom<String> for FieldPath {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_dotted() {
        let path: FieldPath = "hero.companion".parse().unwrap();
        assert_eq!(path.segments(), ["hero", "companion"]);
        assert_eq!(path.to_string(), "hero.companion");
        assert_eq!(path.split_last(), (&["hero".to_string()][..], "companion"));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!("".parse::<FieldPath>(), Err(StoreError::EmptyPath)));
        assert!(matches!("a..b".parse::<FieldPath>(), Err(StoreError::EmptySegment)));
        assert!(matches!(
            "a.b-c".parse::<FieldPath>(),
            Err(StoreError::InvalidSegment(_))
        ));
        assert!(matches!(
            "_rev".parse::<FieldPath>(),
            Err(StoreError::ReservedField(_))
        ));
    }

    #[test]
    fn nested_underscore_is_allowed() {
        assert!("hero._key".parse::<FieldPath>().is_ok());
    }

    #[test]
    fn serde_as_string() {
        let path: FieldPath = "pokemon".parse().unwrap();
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"pokemon\"");
        let back: FieldPath = serde_json::from_str("\"hero.companion\"").unwrap();
        assert_eq!(back.segments().len(), 2);
        assert!(serde_json::from_str::<FieldPath>("\"\"").is_err());
    }
}
