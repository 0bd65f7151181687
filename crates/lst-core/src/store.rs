//! # Local Document Store
//!
//! Persists fetched schema and payload documents under a root directory
//! and reads them back. Documents round-trip byte-for-byte: no newline
//! normalization, no re-encoding, no pretty-printing.

use std::path::{Path, PathBuf};

/// A flat file store rooted at one directory.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Create a store rooted at `root`. The directory is created on the
    /// first write, not here.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a named document.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Write `bytes` verbatim under `name`, creating the root directory
    /// if needed. Returns the path written to.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory or file cannot be
    /// written.
    pub fn persist(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        std::fs::create_dir_all(&self.root).map_err(|e| StoreError::Io {
            path: self.root.display().to_string(),
            source: e,
        })?;
        let path = self.path_of(name);
        std::fs::write(&path, bytes).map_err(|e| StoreError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(path)
    }

    /// Read a document back as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no document exists under
    /// `name`, and [`StoreError::Io`] for any other read failure.
    pub fn read_bytes(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.path_of(name);
        std::fs::read(&path).map_err(|e| Self::classify(&path, e))
    }

    /// Read a document back as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Same as [`read_bytes`](Self::read_bytes); additionally returns
    /// [`StoreError::Io`] if the content is not valid UTF-8.
    pub fn read_text(&self, name: &str) -> Result<String, StoreError> {
        let path = self.path_of(name);
        std::fs::read_to_string(&path).map_err(|e| Self::classify(&path, e))
    }

    fn classify(path: &Path, e: std::io::Error) -> StoreError {
        if e.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound {
                path: path.display().to_string(),
            }
        } else {
            StoreError::Io {
                path: path.display().to_string(),
                source: e,
            }
        }
    }
}

/// Document store errors. `NotFound` is distinct from other IO failures
/// so callers can tell a missing document from an unreadable one.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No document exists at the given path.
    #[error("document not found: {path}")]
    NotFound { path: String },

    /// The document exists but could not be read or written.
    #[error("io error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_is_byte_for_byte() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());

        // Mixed line endings, trailing whitespace, and multibyte content
        // must all survive untouched.
        let original = "{\"title\": \"caf\u{00e9}\",\r\n  \"n\": 1}\n ".as_bytes();
        store.persist("schema.json", original).unwrap();

        let bytes = store.read_bytes("schema.json").unwrap();
        assert_eq!(bytes, original);

        let text = store.read_text("schema.json").unwrap();
        assert_eq!(text.as_bytes(), original);
    }

    #[test]
    fn missing_document_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        let err = store.read_text("absent.json").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }), "got: {err}");
    }

    #[test]
    fn persist_creates_root_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path().join("nested/work"));
        let path = store.persist("payload.json", b"{}").unwrap();
        assert!(path.exists());
    }
}
