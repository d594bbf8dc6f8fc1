//! In-memory document

use crate::document::{DocumentState, DocumentStore, Revision};
use crate::error::StoreError;
use crate::patch::Patch;
use crate::path::FieldPath;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Shared in-process document
///
/// Clones share the same body, so one handle can be given to a widget
/// while another reads the result.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    inner: Arc<Mutex<DocumentState>>,
}

impl MemoryDocument {
    /// Create an empty document
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from an existing JSON object
    ///
    /// Non-object values produce an empty document.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let body = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            inner: Arc::new(Mutex::new(DocumentState::from_body(body))),
        }
    }
}

impl DocumentStore for MemoryDocument {
    fn apply(&self, patch: Patch) -> Result<Revision, StoreError> {
        let path = patch.path().clone();
        let revision = self.inner.lock().apply(patch)?;
        tracing::debug!("Applied patch to {} (rev {})", path, revision);
        Ok(revision)
    }

    fn get(&self, path: &FieldPath) -> Option<Value> {
        self.inner.lock().get(path)
    }

    fn revision(&self) -> Option<Revision> {
        self.inner.lock().revision()
    }

    fn snapshot(&self) -> Value {
        Value::Object(self.inner.lock().body().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clones_share_state() {
        let doc = MemoryDocument::new();
        let reader = doc.clone();
        let path: FieldPath = "pokemon".parse().unwrap();

        doc.apply(Patch::set(path.clone(), &json!({ "id": 1 })).unwrap())
            .unwrap();
        assert_eq!(reader.get(&path), Some(json!({ "id": 1 })));
        assert_eq!(reader.revision(), doc.revision());
    }

    #[test]
    fn from_value_keeps_existing_fields() {
        let doc = MemoryDocument::from_value(json!({ "title": "hello" }));
        assert_eq!(doc.get(&"title".parse().unwrap()), Some(json!("hello")));
        assert!(MemoryDocument::from_value(json!(3)).snapshot().as_object().unwrap().is_empty());
    }
}
