//! Read-only rendered view of a note.
//!
//! # Responsibility
//! - Convert Markdown to display HTML through the external renderer.
//! - Resolve a note id into a renderable page, or a "go home" signal.
//!
//! The HTML is exactly as safe as the renderer's own escaping; nothing here
//! sanitizes it further. Raw HTML in note content passes straight through,
//! which is a latent XSS exposure when content is not the user's own.

use crate::model::note::{Note, NoteId};
use crate::store::{NoteStore, StoreResult};
use chrono::{DateTime, Utc};
use pulldown_cmark::{html, Options, Parser};

const APP_TITLE: &str = "Markdown Notes";

/// Converts Markdown source to HTML.
pub fn to_html(content: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(content, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// A note resolved and rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNote {
    pub id: NoteId,
    pub title: String,
    /// Window/document title while the note is open.
    pub window_title: String,
    pub html: String,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of opening the view route for an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOutcome {
    Rendered(RenderedNote),
    /// Unknown id; the caller falls back to the home view.
    NotFound,
}

/// Resolves and renders one note through the store's renderer.
pub fn view_note<S: NoteStore>(store: &S, id: &str) -> StoreResult<ViewOutcome> {
    let Some(note) = store.get(id) else {
        return Ok(ViewOutcome::NotFound);
    };
    let html = store.render_html(&note.content)?;
    Ok(ViewOutcome::Rendered(rendered(note, html)))
}

fn rendered(note: Note, html: String) -> RenderedNote {
    RenderedNote {
        window_title: format!("{} | {APP_TITLE}", note.title),
        id: note.id,
        title: note.title,
        html,
        updated_at: note.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::{to_html, view_note, ViewOutcome};
    use crate::model::note::Note;
    use crate::store::memory::MemoryStore;
    use crate::store::NoteStore;

    #[test]
    fn heading_renders_as_h1() {
        assert_eq!(to_html("# Hello"), "<h1>Hello</h1>\n");
    }

    #[test]
    fn table_extension_is_enabled() {
        let html = to_html("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn inline_html_is_not_sanitized() {
        // Documented contract: output is only as safe as the renderer.
        let html = to_html("before <em onclick=\"x()\">raw</em> after");
        assert!(html.contains("onclick"));
    }

    #[test]
    fn view_resolves_known_id_and_sets_window_title() {
        let store = MemoryStore::new();
        let note = store.save(&Note::draft("# Hello\nWorld")).unwrap();

        match view_note(&store, &note.id).unwrap() {
            ViewOutcome::Rendered(page) => {
                assert_eq!(page.title, "Hello");
                assert_eq!(page.window_title, "Hello | Markdown Notes");
                assert!(page.html.contains("<h1>Hello</h1>"));
            }
            ViewOutcome::NotFound => panic!("note should resolve"),
        }
    }

    #[test]
    fn view_of_unknown_id_signals_not_found() {
        let store = MemoryStore::new();
        assert_eq!(view_note(&store, "missing").unwrap(), ViewOutcome::NotFound);
    }
}
