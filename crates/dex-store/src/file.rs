//! JSON document on disk
//!
//! The whole document is rewritten on every patch through a temp file in the
//! same directory, then renamed into place.

use crate::document::{DocumentState, DocumentStore, Revision};
use crate::error::StoreError;
use crate::patch::Patch;
use crate::path::FieldPath;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File-backed document
#[derive(Debug)]
pub struct JsonFileDocument {
    path: PathBuf,
    state: Mutex<DocumentState>,
}

impl JsonFileDocument {
    /// Open a document, starting empty if the file does not exist
    ///
    /// # Errors
    /// - `StoreError::Io` if the file exists but cannot be read
    /// - `StoreError::Parse` / `StoreError::InvalidDocument` for bad content
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let body = match std::fs::read(&path) {
            Ok(bytes) => parse_body(&path, &bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Document {} not found, starting empty", path.display());
                Map::new()
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        Ok(Self {
            path,
            state: Mutex::new(DocumentState::from_body(body)),
        })
    }

    /// File location
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, body: &Map<String, Value>) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| StoreError::io(&dir, e))?;
        serde_json::to_writer_pretty(&mut tmp, body).map_err(StoreError::Serialize)?;
        tmp.write_all(b"\n")
            .and_then(|()| tmp.flush())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;
        Ok(())
    }
}

fn parse_body(path: &Path, bytes: &[u8]) -> Result<Map<String, Value>, StoreError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    let value: Value = serde_json::from_slice(bytes).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::InvalidDocument {
            path: path.to_path_buf(),
        }),
    }
}

impl DocumentStore for JsonFileDocument {
    fn apply(&self, patch: Patch) -> Result<Revision, StoreError> {
        let field = patch.path().clone();
        let mut state = self.state.lock();

        // Stage on a copy; only swap in once the file write succeeded.
        let mut next = state.clone();
        let revision = next.apply(patch)?;
        self.persist(next.body())?;
        *state = next;

        tracing::debug!(
            "Applied patch to {} in {} (rev {})",
            field,
            self.path.display(),
            revision
        );
        Ok(revision)
    }

    fn get(&self, path: &FieldPath) -> Option<Value> {
        self.state.lock().get(path)
    }

    fn revision(&self) -> Option<Revision> {
        self.state.lock().revision()
    }

    fn snapshot(&self) -> Value {
        Value::Object(self.state.lock().body().clone())
    }
}
