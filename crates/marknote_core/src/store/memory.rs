//! In-memory note store.
//!
//! The substitutable fake for tests and ephemeral sessions: same contract as
//! the file-backed store, nothing touches disk.

use super::{NoteStore, StoreResult};
use crate::model::note::Note;
use std::sync::{Mutex, PoisonError};

/// Mutex-guarded in-memory collection.
#[derive(Default)]
pub struct MemoryStore {
    notes: Mutex<Vec<Note>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds the collection, preserving the given order.
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes: Mutex::new(notes),
        }
    }
}

impl NoteStore for MemoryStore {
    fn list(&self) -> Vec<Note> {
        self.notes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, note: &Note) -> StoreResult<Note> {
        note.validate()?;

        let mut notes = self.notes.lock().unwrap_or_else(PoisonError::into_inner);
        match notes.iter().position(|existing| existing.id == note.id) {
            Some(index) => notes[index] = note.clone(),
            None => notes.push(note.clone()),
        }
        Ok(note.clone())
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        self.notes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|note| note.id != id);
        Ok(())
    }
}
