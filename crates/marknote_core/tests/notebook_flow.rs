use marknote_core::{
    MemoryStore, Note, Notebook, NotebookObserver, SaveOutcome, ViewOutcome,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct Events {
    saved: Vec<String>,
    deleted: Vec<String>,
    failed: Vec<String>,
    grammar_unavailable: usize,
}

#[derive(Clone, Default)]
struct RecordingObserver(Rc<RefCell<Events>>);

impl NotebookObserver for RecordingObserver {
    fn note_saved(&mut self, note: &Note) {
        self.0.borrow_mut().saved.push(note.id.clone());
    }

    fn note_deleted(&mut self, id: &str) {
        self.0.borrow_mut().deleted.push(id.to_string());
    }

    fn store_failed(&mut self, message: &str) {
        self.0.borrow_mut().failed.push(message.to_string());
    }

    fn grammar_unavailable(&mut self) {
        self.0.borrow_mut().grammar_unavailable += 1;
    }
}

fn open_notebook() -> (Notebook<MemoryStore, RecordingObserver>, RecordingObserver) {
    let observer = RecordingObserver::default();
    let notebook = Notebook::open(MemoryStore::new(), observer.clone());
    (notebook, observer)
}

#[test]
fn save_notifies_observer_and_reloads_collection() {
    let (mut notebook, observer) = open_notebook();

    notebook.editor_mut().set_buffer("# Fresh note");
    let outcome = notebook.save().unwrap();

    let SaveOutcome::Saved(note) = outcome else {
        panic!("buffer was not empty");
    };
    assert_eq!(observer.0.borrow().saved, vec![note.id.clone()]);
    assert_eq!(notebook.notes().len(), 1);
    assert_eq!(notebook.notes()[0].id, note.id);
}

#[test]
fn empty_buffer_save_is_silent() {
    let (mut notebook, observer) = open_notebook();

    notebook.editor_mut().set_buffer("  \n ");
    assert_eq!(notebook.save().unwrap(), SaveOutcome::EmptyBuffer);

    let events = observer.0.borrow();
    assert!(events.saved.is_empty());
    assert!(events.failed.is_empty());
    assert!(notebook.notes().is_empty());
}

#[test]
fn select_then_save_revises_the_same_note() {
    let (mut notebook, _observer) = open_notebook();

    notebook.editor_mut().set_buffer("# Original");
    let SaveOutcome::Saved(original) = notebook.save().unwrap() else {
        panic!("buffer was not empty");
    };

    notebook.create_new();
    assert!(notebook.editor().buffer().is_empty());

    assert!(notebook.select(&original.id));
    assert_eq!(notebook.editor().buffer(), "# Original");

    notebook.editor_mut().set_buffer("# Original, edited");
    let SaveOutcome::Saved(revised) = notebook.save().unwrap() else {
        panic!("buffer was not empty");
    };
    assert_eq!(revised.id, original.id);
    assert_eq!(notebook.notes().len(), 1);
}

#[test]
fn select_of_unknown_id_is_refused() {
    let (mut notebook, _observer) = open_notebook();
    assert!(!notebook.select("missing"));
}

#[test]
fn deleting_the_active_note_clears_the_editor() {
    let (mut notebook, observer) = open_notebook();

    notebook.editor_mut().set_buffer("goes away");
    let SaveOutcome::Saved(note) = notebook.save().unwrap() else {
        panic!("buffer was not empty");
    };
    assert!(notebook.select(&note.id));

    notebook.delete(&note.id).unwrap();

    assert!(notebook.editor().active().is_none());
    assert!(notebook.editor().buffer().is_empty());
    assert!(notebook.notes().is_empty());
    assert_eq!(observer.0.borrow().deleted, vec![note.id]);
}

#[test]
fn grammar_check_on_local_backend_fires_unavailable_callback() {
    let (mut notebook, observer) = open_notebook();

    notebook.editor_mut().set_buffer("check me");
    assert!(notebook.check_grammar().unwrap().is_none());
    assert_eq!(observer.0.borrow().grammar_unavailable, 1);
}

#[test]
fn summaries_keep_persistence_order_and_truncate_previews() {
    let long_body = format!("# Long\n{}", "x".repeat(200));
    let first = Note::draft("# First\nshort");
    let second = Note::draft(&long_body);
    let store = MemoryStore::with_notes(vec![first.clone(), second.clone()]);

    let notebook = Notebook::open(store, RecordingObserver::default());
    let summaries = notebook.summaries();

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].id, first.id);
    assert_eq!(summaries[0].title, "First");
    assert_eq!(summaries[1].id, second.id);
    assert_eq!(summaries[1].preview.chars().count(), 100);
    assert!(!summaries[0].updated_label.is_empty());
}

#[test]
fn view_renders_known_note_and_signals_missing_one() {
    let (mut notebook, _observer) = open_notebook();

    notebook.editor_mut().set_buffer("# Viewable\nbody");
    let SaveOutcome::Saved(note) = notebook.save().unwrap() else {
        panic!("buffer was not empty");
    };

    match notebook.view(&note.id).unwrap() {
        ViewOutcome::Rendered(page) => {
            assert_eq!(page.id, note.id);
            assert!(page.html.contains("<h1>Viewable</h1>"));
        }
        ViewOutcome::NotFound => panic!("note should resolve"),
    }

    assert_eq!(notebook.view("missing").unwrap(), ViewOutcome::NotFound);
}
