//! Document store trait and shared document state

use crate::error::StoreError;
use crate::patch::Patch;
use crate::path::FieldPath;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;
use ulid::Ulid;

/// Root field holding the current revision
pub const REVISION_FIELD: &str = "_rev";

/// Document revision (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Revision(pub Ulid);

impl Revision {
    /// Generate new revision
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for Revision {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Revision {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Revision {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s).map(Self)
    }
}

/// A structured-content document that accepts field patches
pub trait DocumentStore: Send + Sync {
    /// Apply one patch atomically, returning the new revision
    ///
    /// # Errors
    /// Implementation-specific; a failed patch leaves the document unchanged
    fn apply(&self, patch: Patch) -> Result<Revision, StoreError>;

    /// Current value of a field, if present
    fn get(&self, path: &FieldPath) -> Option<Value>;

    /// Revision of the last applied patch
    fn revision(&self) -> Option<Revision>;

    /// Copy of the whole document
    fn snapshot(&self) -> Value;
}

impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    fn apply(&self, patch: Patch) -> Result<Revision, StoreError> {
        (**self).apply(patch)
    }

    fn get(&self, path: &FieldPath) -> Option<Value> {
        (**self).get(path)
    }

    fn revision(&self) -> Option<Revision> {
        (**self).revision()
    }

    fn snapshot(&self) -> Value {
        (**self).snapshot()
    }
}

/// Document body shared by the store implementations
#[derive(Debug, Clone, Default)]
pub(crate) struct DocumentState {
    body: Map<String, Value>,
}

impl DocumentState {
    pub(crate) fn from_body(body: Map<String, Value>) -> Self {
        Self { body }
    }

    pub(crate) fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    /// Apply against a copy so a failing patch changes nothing
    pub(crate) fn apply(&mut self, patch: Patch) -> Result<Revision, StoreError> {
        let mut next = self.body.clone();
        patch.apply_to(&mut next)?;

        let revision = Revision::new();
        next.insert(REVISION_FIELD.to_string(), Value::String(revision.to_string()));
        self.body = next;
        Ok(revision)
    }

    pub(crate) fn get(&self, path: &FieldPath) -> Option<Value> {
        let (first, rest) = path.segments().split_first()?;
        let mut current = self.body.get(first)?;
        for segment in rest {
            current = current.as_object()?.get(segment)?;
        }
        Some(current.clone())
    }

    pub(crate) fn revision(&self) -> Option<Revision> {
        self.body
            .get(REVISION_FIELD)
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
    }
}
