//! Local JSON-file note store.
//!
//! # Responsibility
//! - Persist the full collection as one JSON array in a single file.
//! - Degrade unreadable state to an empty collection instead of failing.
//!
//! # Invariants
//! - Every mutation is a full read-modify-write of the collection.
//! - The file path is injected; nothing here reads ambient process state.
//!
//! Safe only under the single-writer assumption: two processes mutating the
//! same file clobber each other, last write wins, no detection.

use super::{NoteStore, StoreResult};
use crate::model::note::Note;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed store holding the whole collection under one path.
pub struct LocalJsonStore {
    path: PathBuf,
}

impl LocalJsonStore {
    /// Creates a store over the given collection file. The file and its
    /// parent directory are created lazily on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The collection file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_collection(&self) -> Vec<Note> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(
                    "event=store_list module=store backend=local status=empty path={}",
                    self.path.display()
                );
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "event=store_list module=store backend=local status=degraded path={} error={err}",
                    self.path.display()
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(notes) => notes,
            Err(err) => {
                // Malformed data is treated as "no notes", not as a failure.
                warn!(
                    "event=store_list module=store backend=local status=degraded path={} error={err}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    fn write_collection(&self, notes: &[Note]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let serialized = serde_json::to_string(notes)?;
        fs::write(&self.path, serialized)?;
        Ok(())
    }
}

impl NoteStore for LocalJsonStore {
    fn list(&self) -> Vec<Note> {
        self.read_collection()
    }

    fn save(&self, note: &Note) -> StoreResult<Note> {
        note.validate()?;

        let mut notes = self.read_collection();
        match notes.iter().position(|existing| existing.id == note.id) {
            Some(index) => notes[index] = note.clone(),
            None => notes.push(note.clone()),
        }
        self.write_collection(&notes)?;

        info!(
            "event=store_save module=store backend=local status=ok id={} total={}",
            note.id,
            notes.len()
        );
        Ok(note.clone())
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        let mut notes = self.read_collection();
        let before = notes.len();
        notes.retain(|note| note.id != id);
        self.write_collection(&notes)?;

        info!(
            "event=store_delete module=store backend=local status=ok id={id} removed={}",
            before - notes.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::LocalJsonStore;
    use crate::model::note::Note;
    use crate::store::NoteStore;
    use tempfile::tempdir;

    #[test]
    fn first_write_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deep/notes.json");
        let store = LocalJsonStore::new(&path);

        store.save(&Note::draft("hello")).unwrap();
        assert!(path.exists());
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn malformed_file_lists_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.json");
        std::fs::write(&path, "{ not json at all").unwrap();

        let store = LocalJsonStore::new(&path);
        assert!(store.list().is_empty());
    }

    #[test]
    fn collection_is_stored_as_a_json_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.json");
        let store = LocalJsonStore::new(&path);
        store.save(&Note::draft("# One")).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["title"], "One");
    }
}
