//! Whole-document JSON persistence.
//!
//! Loading never fails: a missing, unreadable or malformed file yields the
//! document's defaults. Saving rewrites the whole file atomically (temp file,
//! fsync, rename) and reports errors to the caller, who decides whether to
//! care.

use std::fs;
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// A persisted top-level document.
pub trait Document: Serialize + DeserializeOwned + Default {
    /// Short name used in log lines.
    const KIND: &'static str;

    /// Repairs invariants a hand-edited or foreign file may violate.
    fn normalize(&mut self) {}
}

/// Load/save gateway for one document file.
#[derive(Debug, Clone)]
pub struct JsonStore<T> {
    path: PathBuf,
    _doc: PhantomData<fn() -> T>,
}

impl<T: Document> JsonStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _doc: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Strict read. `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read(&self) -> Result<Option<T>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::ReadFailed {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let mut doc: T = serde_json::from_str(&content).map_err(|source| StoreError::ParseFailed {
            path: self.path.clone(),
            source,
        })?;
        doc.normalize();
        Ok(Some(doc))
    }

    /// Load from disk or return default.
    pub fn load(&self) -> T {
        match self.read() {
            Ok(Some(doc)) => {
                tracing::debug!(kind = T::KIND, path = %self.path.display(), "loaded document");
                doc
            }
            Ok(None) => {
                tracing::debug!(kind = T::KIND, path = %self.path.display(), "no document on disk, using defaults");
                T::default()
            }
            Err(e) => {
                tracing::warn!(kind = T::KIND, error = %e, "discarding unreadable document, using defaults");
                T::default()
            }
        }
    }

    /// Persist to disk, replacing the previous file in one rename.
    ///
    /// # Errors
    /// Returns an error if the document cannot be serialized, the directory
    /// cannot be created, or the file cannot be written or renamed.
    pub fn save(&self, doc: &T) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(doc).map_err(|source| StoreError::SerializeFailed {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::DataDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let write_failed = |source| StoreError::WriteFailed {
            path: tmp_path.clone(),
            source,
        };
        let mut file = fs::File::create(&tmp_path).map_err(write_failed)?;
        file.write_all(content.as_bytes()).map_err(write_failed)?;
        file.sync_all().map_err(write_failed)?;
        drop(file);

        fs::rename(&tmp_path, &self.path).map_err(|source| StoreError::WriteFailed {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(kind = T::KIND, path = %self.path.display(), bytes = content.len(), "saved document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Note {
        title: String,
        pinned: bool,
    }

    impl Document for Note {
        const KIND: &'static str = "note";
    }

    fn make_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = make_test_dir();
        let store = JsonStore::<Note>::new(dir.path().join("note.json"));
        assert!(store.read().unwrap().is_none());
        assert_eq!(store.load(), Note::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = make_test_dir();
        let store = JsonStore::<Note>::new(dir.path().join("nested/note.json"));
        let note = Note {
            title: "hello".into(),
            pinned: true,
        };
        store.save(&note).unwrap();
        assert_eq!(store.load(), note);
        assert!(!dir.path().join("nested/note.json.tmp").exists());
    }

    #[test]
    fn corrupt_file_falls_back_and_is_overwritten_by_save() {
        let dir = make_test_dir();
        let path = dir.path().join("note.json");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonStore::<Note>::new(&path);

        assert!(matches!(store.read(), Err(StoreError::ParseFailed { .. })));
        assert_eq!(store.load(), Note::default());

        store
            .save(&Note {
                title: "fresh".into(),
                pinned: false,
            })
            .unwrap();
        assert_eq!(store.load().title, "fresh");
    }

    #[test]
    fn save_into_unwritable_location_reports_error() {
        let dir = make_test_dir();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        // A regular file where a directory is expected.
        let store = JsonStore::<Note>::new(blocker.join("note.json"));
        assert!(store.save(&Note::default()).is_err());
    }
}
