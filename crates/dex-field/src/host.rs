//! Host field capability
//!
//! The widget owns exactly one field of a host document and may only set or
//! unset it. [`HostField`] is that capability; [`FieldBinding`] implements
//! it over any [`DocumentStore`] at a fixed path.

use crate::error::CommitError;
use dex_model::Pokemon;
use dex_store::{DocumentStore, FieldPath, Patch};

/// Write access to the widget's host field
#[cfg_attr(test, mockall::automock)]
pub trait HostField: Send + Sync {
    /// Store `value` as the field's value, replacing any previous one
    ///
    /// # Errors
    /// Any failure to write; the field keeps its previous value
    fn commit(&self, value: &Pokemon) -> Result<(), CommitError>;

    /// Remove the field's value entirely
    ///
    /// # Errors
    /// Any failure to write
    fn remove(&self) -> Result<(), CommitError>;
}

/// A document field addressed by path
#[derive(Debug, Clone)]
pub struct FieldBinding<S> {
    store: S,
    path: FieldPath,
}

impl<S: DocumentStore> FieldBinding<S> {
    /// Bind to `path` inside `store`
    #[inline]
    #[must_use]
    pub fn new(store: S, path: FieldPath) -> Self {
        Self { store, path }
    }

    /// Field path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current field value
    ///
    /// A value that does not decode as a record is reported as absent.
    #[must_use]
    pub fn value(&self) -> Option<Pokemon> {
        let raw = self.store.get(&self.path)?;
        match serde_json::from_value(raw) {
            Ok(p) => Some(p),
            Err(e) => {
                tracing::warn!("Ignoring malformed value at {}: {}", self.path, e);
                None
            }
        }
    }
}

impl<S: DocumentStore> HostField for FieldBinding<S> {
    fn commit(&self, value: &Pokemon) -> Result<(), CommitError> {
        value.validate()?;
        let revision = self.store.apply(Patch::set(self.path.clone(), value)?)?;
        tracing::debug!("Committed #{} to {} (rev {})", value.id, self.path, revision);
        Ok(())
    }

    fn remove(&self) -> Result<(), CommitError> {
        let revision = self.store.apply(Patch::unset(self.path.clone()))?;
        tracing::debug!("Removed {} (rev {})", self.path, revision);
        Ok(())
    }
}
