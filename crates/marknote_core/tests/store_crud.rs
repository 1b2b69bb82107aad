use marknote_core::{LocalJsonStore, MemoryStore, Note, NoteStore};
use tempfile::{tempdir, TempDir};

fn local_store() -> (TempDir, LocalJsonStore) {
    let dir = tempdir().unwrap();
    let store = LocalJsonStore::new(dir.path().join("notes.json"));
    (dir, store)
}

fn save_then_get_returns_equal_note(store: &impl NoteStore) {
    let note = Note::draft("# Round trip\nEvery field must survive.");
    store.save(&note).unwrap();

    let loaded = store.get(&note.id).unwrap();
    assert_eq!(loaded, note);
}

fn save_existing_id_replaces_in_place(store: &impl NoteStore) {
    let first = store.save(&Note::draft("first")).unwrap();
    let second = store.save(&Note::draft("second")).unwrap();
    let third = store.save(&Note::draft("third")).unwrap();

    let revised = second.revise("second, revised");
    store.save(&revised).unwrap();

    let notes = store.list();
    assert_eq!(notes.len(), 3);
    // Untouched neighbors keep their slots; the revision stays in the middle.
    assert_eq!(notes[0].id, first.id);
    assert_eq!(notes[1].id, second.id);
    assert_eq!(notes[1].content, "second, revised");
    assert_eq!(notes[2].id, third.id);
}

fn delete_then_get_is_none(store: &impl NoteStore) {
    let note = store.save(&Note::draft("doomed")).unwrap();
    store.delete(&note.id).unwrap();
    assert!(store.get(&note.id).is_none());
}

fn delete_missing_id_leaves_collection_unchanged(store: &impl NoteStore) {
    let kept = store.save(&Note::draft("kept")).unwrap();
    store.delete("never-existed").unwrap();

    let notes = store.list();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, kept.id);
}

fn list_is_insertion_order(store: &impl NoteStore) {
    let a = store.save(&Note::draft("a")).unwrap();
    let b = store.save(&Note::draft("b")).unwrap();
    let c = store.save(&Note::draft("c")).unwrap();

    let ids: Vec<_> = store.list().into_iter().map(|note| note.id).collect();
    assert_eq!(ids, vec![a.id, b.id, c.id]);
}

#[test]
fn memory_save_then_get_returns_equal_note() {
    save_then_get_returns_equal_note(&MemoryStore::new());
}

#[test]
fn local_save_then_get_returns_equal_note() {
    let (_dir, store) = local_store();
    save_then_get_returns_equal_note(&store);
}

#[test]
fn memory_save_existing_id_replaces_in_place() {
    save_existing_id_replaces_in_place(&MemoryStore::new());
}

#[test]
fn local_save_existing_id_replaces_in_place() {
    let (_dir, store) = local_store();
    save_existing_id_replaces_in_place(&store);
}

#[test]
fn memory_delete_then_get_is_none() {
    delete_then_get_is_none(&MemoryStore::new());
}

#[test]
fn local_delete_then_get_is_none() {
    let (_dir, store) = local_store();
    delete_then_get_is_none(&store);
}

#[test]
fn memory_delete_missing_id_leaves_collection_unchanged() {
    delete_missing_id_leaves_collection_unchanged(&MemoryStore::new());
}

#[test]
fn local_delete_missing_id_leaves_collection_unchanged() {
    let (_dir, store) = local_store();
    delete_missing_id_leaves_collection_unchanged(&store);
}

#[test]
fn memory_list_is_insertion_order() {
    list_is_insertion_order(&MemoryStore::new());
}

#[test]
fn local_list_is_insertion_order() {
    let (_dir, store) = local_store();
    list_is_insertion_order(&store);
}

#[test]
fn local_list_of_missing_file_is_empty() {
    let (_dir, store) = local_store();
    assert!(store.list().is_empty());
}

#[test]
fn local_list_of_malformed_file_is_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.json");
    std::fs::write(&path, "[{\"id\": truncated").unwrap();

    let store = LocalJsonStore::new(&path);
    assert!(store.list().is_empty());
    assert!(store.get("anything").is_none());
}

#[test]
fn local_collection_survives_reopening_the_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.json");

    let first_handle = LocalJsonStore::new(&path);
    let note = first_handle.save(&Note::draft("# Persistent")).unwrap();
    drop(first_handle);

    let second_handle = LocalJsonStore::new(&path);
    let loaded = second_handle.get(&note.id).unwrap();
    assert_eq!(loaded, note);
}
