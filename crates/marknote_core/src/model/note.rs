//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record and its lifecycle constructors.
//! - Enforce the timestamp ordering invariant on write paths.
//!
//! # Invariants
//! - `id` is immutable once assigned and unique across the collection.
//! - `updated_at` is never earlier than `created_at`.
//! - `title` is always re-derived from `content`, never edited on its own.

use crate::derive::{derive_title, generate_note_id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures. The
/// value is opaque to everything except the generator that minted it.
pub type NoteId = String;

/// The persisted unit of content.
///
/// Serialized field names stay camelCase so the on-disk collection and the
/// remote wire format share one shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Opaque unique id, assigned once at creation.
    pub id: NoteId,
    /// Display title, derived from `content` on every save.
    pub title: String,
    /// Raw Markdown source text.
    pub content: String,
    /// Creation instant, fixed for the lifetime of the note.
    pub created_at: DateTime<Utc>,
    /// Last-save instant. Never earlier than `created_at`.
    pub updated_at: DateTime<Utc>,
}

/// Validation failure for a note record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// The id string is empty.
    EmptyId,
    /// `updated_at` precedes `created_at`.
    TimestampOrder {
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "note id must not be empty"),
            Self::TimestampOrder {
                created_at,
                updated_at,
            } => write!(
                f,
                "updated_at {updated_at} is earlier than created_at {created_at}"
            ),
        }
    }
}

impl Error for NoteValidationError {}

impl Note {
    /// Creates a brand-new note from raw content.
    ///
    /// Assigns a fresh id, derives the title, and stamps both timestamps
    /// with the current instant.
    pub fn draft(content: impl Into<String>) -> Self {
        let content = content.into();
        let now = Utc::now();
        Self {
            id: generate_note_id(),
            title: derive_title(&content),
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builds the next revision of an existing note.
    ///
    /// Keeps `id` and `created_at`, replaces the content, re-derives the
    /// title, and moves `updated_at` to now.
    pub fn revise(&self, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            id: self.id.clone(),
            title: derive_title(&content),
            content,
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }

    /// Checks record invariants. Store write paths call this before
    /// persisting.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.is_empty() {
            return Err(NoteValidationError::EmptyId);
        }
        if self.updated_at < self.created_at {
            return Err(NoteValidationError::TimestampOrder {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }
}
