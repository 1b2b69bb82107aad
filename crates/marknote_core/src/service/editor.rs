//! Editor buffer state and the explicit save flow.
//!
//! # Responsibility
//! - Hold the one in-progress content buffer.
//! - Build the note record on save: fresh identity for new notes, preserved
//!   identity for revisions.
//!
//! # Invariants
//! - A whitespace-only buffer never reaches the store.
//! - Saving is explicit; there is no debounce or autosave.

use crate::model::note::Note;
use crate::store::{NoteStore, StoreResult};
use log::debug;

/// Mutable editing state: one buffer plus the note it was seeded from.
#[derive(Debug, Default)]
pub struct EditorState {
    buffer: String,
    active: Option<Note>,
}

/// Result of an explicit save action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The note as the store persisted it.
    Saved(Note),
    /// Trimmed buffer was empty; nothing was persisted. Not an error.
    EmptyBuffer,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the buffer from an existing note and makes it active.
    pub fn open(&mut self, note: Note) {
        self.buffer = note.content.clone();
        self.active = Some(note);
    }

    /// Clears the buffer and active note for composing a new note.
    pub fn start_new(&mut self) {
        self.buffer.clear();
        self.active = None;
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn set_buffer(&mut self, content: impl Into<String>) {
        self.buffer = content.into();
    }

    /// The note currently being edited, if any.
    pub fn active(&self) -> Option<&Note> {
        self.active.as_ref()
    }

    /// Persists the buffer through the store.
    ///
    /// Revisions keep id and `created_at`; new notes get both generated.
    /// The stored record becomes the active note, so a follow-up save is a
    /// revision of it.
    pub fn save<S: NoteStore>(&mut self, store: &S) -> StoreResult<SaveOutcome> {
        if self.buffer.trim().is_empty() {
            debug!("event=editor_save module=editor status=rejected reason=empty_buffer");
            return Ok(SaveOutcome::EmptyBuffer);
        }

        let note = match &self.active {
            Some(existing) => existing.revise(&self.buffer),
            None => Note::draft(&self.buffer),
        };
        let stored = store.save(&note)?;
        self.active = Some(stored.clone());
        Ok(SaveOutcome::Saved(stored))
    }
}
