//! Core domain logic for marknote.
//! This crate is the single source of truth for note identity, persistence,
//! and derivation invariants; frontends stay thin over it.

pub mod config;
pub mod derive;
pub mod grammar;
pub mod logging;
pub mod model;
pub mod render;
pub mod service;
pub mod store;

pub use config::{default_app_dir, default_config_file, ConfigError, StoreConfig};
pub use derive::{derive_title, generate_note_id};
pub use grammar::{
    span_at, underline_spans, GrammarIssue, GrammarReport, IssueContext, UnderlineSpan,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use render::{to_html, view_note, RenderedNote, ViewOutcome};
pub use service::editor::{EditorState, SaveOutcome};
pub use service::notebook::{NoteSummary, Notebook, NotebookObserver};
pub use store::local::LocalJsonStore;
pub use store::memory::MemoryStore;
pub use store::remote::{RemoteHttpStore, DEFAULT_BASE_URL};
pub use store::{NoteStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
