//! Notebook orchestration: the home-screen flow as core logic.
//!
//! # Responsibility
//! - Tie editor, store, and cached collection together for one session.
//! - Notify the frontend of outcomes through `NotebookObserver` callbacks
//!   instead of owning any presentation.
//!
//! # Invariants
//! - The cached collection is always the store's persistence order; it is
//!   never re-sorted here.
//! - Every successful mutation is followed by a full reload from the store.
//! - Store write failures are surfaced once through the observer and not
//!   retried; the cached state stays as it was.

use crate::grammar::GrammarReport;
use crate::model::note::{Note, NoteId};
use crate::render::{view_note, ViewOutcome};
use crate::service::editor::{EditorState, SaveOutcome};
use crate::store::{NoteStore, StoreResult};
use chrono::{DateTime, Datelike, Utc};
use log::info;

const PREVIEW_MAX_CHARS: usize = 100;

/// Frontend notification surface. All methods default to no-ops so an
/// implementor only handles what it presents.
pub trait NotebookObserver {
    /// A note was persisted.
    fn note_saved(&mut self, _note: &Note) {}
    /// A note was removed.
    fn note_deleted(&mut self, _id: &str) {}
    /// A store write failed; advisory only, nothing was rolled back.
    fn store_failed(&mut self, _message: &str) {}
    /// The active backend has no grammar checker.
    fn grammar_unavailable(&mut self) {}
}

/// Sidebar line for one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSummary {
    pub id: NoteId,
    pub title: String,
    /// First 100 code points of the raw content.
    pub preview: String,
    /// Short date label, year only when it differs from the current one.
    pub updated_label: String,
}

/// One user session over a note store.
pub struct Notebook<S: NoteStore, O: NotebookObserver> {
    store: S,
    observer: O,
    notes: Vec<Note>,
    editor: EditorState,
}

impl<S: NoteStore, O: NotebookObserver> Notebook<S, O> {
    /// Opens a session and loads the collection once.
    pub fn open(store: S, observer: O) -> Self {
        let mut notebook = Self {
            store,
            observer,
            notes: Vec::new(),
            editor: EditorState::new(),
        };
        notebook.refresh();
        notebook
    }

    /// Reloads the cached collection from the store.
    pub fn refresh(&mut self) {
        self.notes = self.store.list();
    }

    /// The cached collection, in persistence order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorState {
        &mut self.editor
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Seeds the editor from a cached note. Returns false for unknown ids.
    pub fn select(&mut self, id: &str) -> bool {
        match self.notes.iter().find(|note| note.id == id) {
            Some(note) => {
                self.editor.open(note.clone());
                true
            }
            None => false,
        }
    }

    /// Clears the editor for a new note.
    pub fn create_new(&mut self) {
        self.editor.start_new();
    }

    /// Saves the editor buffer and reloads the collection on success.
    pub fn save(&mut self) -> StoreResult<SaveOutcome> {
        match self.editor.save(&self.store) {
            Ok(SaveOutcome::Saved(note)) => {
                self.observer.note_saved(&note);
                self.refresh();
                Ok(SaveOutcome::Saved(note))
            }
            // An empty buffer is silently ignored, not reported.
            Ok(SaveOutcome::EmptyBuffer) => Ok(SaveOutcome::EmptyBuffer),
            Err(err) => {
                self.observer.store_failed(&err.to_string());
                Err(err)
            }
        }
    }

    /// Deletes by id; clears the editor when the active note goes away.
    pub fn delete(&mut self, id: &str) -> StoreResult<()> {
        match self.store.delete(id) {
            Ok(()) => {
                if self.editor.active().map(|note| note.id.as_str()) == Some(id) {
                    self.editor.start_new();
                }
                self.observer.note_deleted(id);
                self.refresh();
                Ok(())
            }
            Err(err) => {
                self.observer.store_failed(&err.to_string());
                Err(err)
            }
        }
    }

    /// Runs the backend grammar checker over the current buffer.
    pub fn check_grammar(&mut self) -> StoreResult<Option<GrammarReport>> {
        match self.store.check_grammar(self.editor.buffer()) {
            Ok(Some(report)) => {
                info!(
                    "event=grammar_check module=notebook status=ok issues={}",
                    report.errors.len()
                );
                Ok(Some(report))
            }
            Ok(None) => {
                self.observer.grammar_unavailable();
                Ok(None)
            }
            Err(err) => {
                self.observer.store_failed(&err.to_string());
                Err(err)
            }
        }
    }

    /// Resolves and renders one note for the read-only view.
    pub fn view(&self, id: &str) -> StoreResult<ViewOutcome> {
        view_note(&self.store, id)
    }

    /// Sidebar view model for the cached collection.
    pub fn summaries(&self) -> Vec<NoteSummary> {
        let now = Utc::now();
        self.notes
            .iter()
            .map(|note| NoteSummary {
                id: note.id.clone(),
                title: note.title.clone(),
                preview: note.content.chars().take(PREVIEW_MAX_CHARS).collect(),
                updated_label: format_updated_label(note.updated_at, now),
            })
            .collect()
    }
}

/// Formats a sidebar date: `Mar 4` this year, `Mar 4, 2023` otherwise.
fn format_updated_label(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if updated_at.year() == now.year() {
        updated_at.format("%b %-d").to_string()
    } else {
        updated_at.format("%b %-d, %Y").to_string()
    }
}
