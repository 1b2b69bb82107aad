//! Note store contracts and backend implementations.
//!
//! # Responsibility
//! - Define the persistence contract every backend satisfies.
//! - Keep storage transport details (filesystem, HTTP) out of services.
//!
//! # Invariants
//! - Write paths call `Note::validate()` before persisting.
//! - `list` never fails: an unreadable medium degrades to an empty
//!   collection and is logged.
//! - `save` replaces in place when the id exists, preserving collection
//!   order; otherwise it appends.

use crate::grammar::GrammarReport;
use crate::model::note::{Note, NoteValidationError};
use crate::render;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod local;
pub mod memory;
pub mod remote;

pub type StoreResult<T> = Result<T, StoreError>;

/// Backend error for note persistence and backend-side operations.
#[derive(Debug)]
pub enum StoreError {
    /// The note violates a record invariant.
    Validation(NoteValidationError),
    /// Filesystem failure on the local medium.
    Io(std::io::Error),
    /// Serialization failure writing the collection.
    Json(serde_json::Error),
    /// Network-level failure talking to the remote medium.
    Transport(reqwest::Error),
    /// The remote medium answered with a non-success status.
    UnexpectedStatus { status: u16, endpoint: &'static str },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "storage io failure: {err}"),
            Self::Json(err) => write!(f, "collection serialization failure: {err}"),
            Self::Transport(err) => write!(f, "backend request failure: {err}"),
            Self::UnexpectedStatus { status, endpoint } => {
                write!(f, "backend returned status {status} for {endpoint}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Transport(err) => Some(err),
            Self::UnexpectedStatus { .. } => None,
        }
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

/// Persistence contract for the note collection.
///
/// Beyond CRUD, a backend owns the two operations the remote medium hosts
/// server-side: Markdown rendering and grammar checking. The provided
/// methods give the local medium's behavior (in-process render, no grammar
/// checker); the remote backend overrides both.
pub trait NoteStore {
    /// Returns all notes in persistence order.
    ///
    /// Infallible by contract: an empty, missing, or malformed medium is
    /// treated as "no notes".
    fn list(&self) -> Vec<Note>;

    /// Point lookup by id.
    ///
    /// A full-collection scan is the only read primitive both media share,
    /// so the lookup is defined in terms of `list`.
    fn get(&self, id: &str) -> Option<Note> {
        self.list().into_iter().find(|note| note.id == id)
    }

    /// Persists one note with replace-or-append semantics and returns the
    /// stored record. One full read-modify-write of the collection.
    fn save(&self, note: &Note) -> StoreResult<Note>;

    /// Removes the note with the given id. A missing id is a no-op, not an
    /// error.
    fn delete(&self, id: &str) -> StoreResult<()>;

    /// Converts Markdown to display HTML for the read-only view.
    fn render_html(&self, content: &str) -> StoreResult<String> {
        Ok(render::to_html(content))
    }

    /// Runs the backend grammar checker over `text`.
    ///
    /// `Ok(None)` means the backend has no checker; callers surface that as
    /// an advisory, not an error.
    fn check_grammar(&self, _text: &str) -> StoreResult<Option<GrammarReport>> {
        Ok(None)
    }
}

impl<S: NoteStore + ?Sized> NoteStore for Box<S> {
    fn list(&self) -> Vec<Note> {
        (**self).list()
    }

    fn get(&self, id: &str) -> Option<Note> {
        (**self).get(id)
    }

    fn save(&self, note: &Note) -> StoreResult<Note> {
        (**self).save(note)
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        (**self).delete(id)
    }

    fn render_html(&self, content: &str) -> StoreResult<String> {
        (**self).render_html(content)
    }

    fn check_grammar(&self, text: &str) -> StoreResult<Option<GrammarReport>> {
        (**self).check_grammar(text)
    }
}
