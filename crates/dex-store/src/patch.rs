//! Field patches

use crate::error::StoreError;
use crate::path::FieldPath;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Mutation of a single document field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Patch {
    /// Replace the field's value
    Set {
        /// Target field
        path: FieldPath,
        /// New value
        value: Value,
    },
    /// Remove the field entirely
    Unset {
        /// Target field
        path: FieldPath,
    },
}

impl Patch {
    /// Build a set patch from any serializable value
    ///
    /// # Errors
    /// `StoreError::Serialize` if the value cannot be represented as JSON
    pub fn set<T: Serialize>(path: FieldPath, value: &T) -> Result<Self, StoreError> {
        let value = serde_json::to_value(value).map_err(StoreError::Serialize)?;
        Ok(Self::Set { path, value })
    }

    /// Build an unset patch
    #[inline]
    #[must_use]
    pub fn unset(path: FieldPath) -> Self {
        Self::Unset { path }
    }

    /// Target field
    #[inline]
    #[must_use]
    pub fn path(&self) -> &FieldPath {
        match self {
            Self::Set { path, .. } | Self::Unset { path } => path,
        }
    }

    /// Apply to a document body
    ///
    /// `Set` creates missing intermediate objects. `Unset` of a missing
    /// field is a no-op.
    ///
    /// # Errors
    /// `StoreError::NotAnObject` when an intermediate value is not an object
    pub(crate) fn apply_to(self, body: &mut Map<String, Value>) -> Result<(), StoreError> {
        match self {
            Self::Set { path, value } => {
                let (parents, key) = path.split_last();
                let target = descend(body, parents, true)?
                    .ok_or_else(|| StoreError::NotAnObject(path.to_string()))?;
                target.insert(key.to_string(), value);
                Ok(())
            }
            Self::Unset { path } => {
                let (parents, key) = path.split_last();
                if let Some(target) = descend(body, parents, false)? {
                    target.remove(key);
                }
                Ok(())
            }
        }
    }
}

/// Walk to the object holding the final key
///
/// Returns `Ok(None)` when `create` is false and a segment is missing.
fn descend<'a>(
    mut current: &'a mut Map<String, Value>,
    parents: &[String],
    create: bool,
) -> Result<Option<&'a mut Map<String, Value>>, StoreError> {
    for (depth, segment) in parents.iter().enumerate() {
        let map = current;
        if !map.contains_key(segment) {
            if !create {
                return Ok(None);
            }
            map.insert(segment.clone(), Value::Object(Map::new()));
        }
        current = match map.get_mut(segment) {
            Some(Value::Object(next)) => next,
            _ => return Err(StoreError::NotAnObject(parents[..=depth].join("."))),
        };
    }
    Ok(Some(current))
}
