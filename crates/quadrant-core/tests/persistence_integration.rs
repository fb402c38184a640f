//! Integration tests for SQLite-backed persistence.
//!
//! These tests verify the durability workflow: state written through
//! the store survives reopening the database, corrupt entries are
//! cleared instead of wedging every later load, and the two entries
//! never interfere with each other.

use quadrant_core::storage::{Database, StorageBackend, MODEL_KEY};
use quadrant_core::{Quadrant, TaskStore};
use tempfile::TempDir;

#[test]
fn test_state_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("quadrant.db");

    let id = {
        let db = Database::open_at(&path).unwrap();
        let mut store = TaskStore::load(Box::new(db));
        let task = store.add_task("Persist me").unwrap();
        store.move_task(&task.id, Quadrant::ImportantUrgent);
        store.toggle_task(&task.id);
        assert!(store.take_save_error().is_none());
        task.id
    };

    let mut db = Database::open_at(&path).unwrap();
    let model = db.load_model();
    assert_eq!(model.locate(&id), Some((Quadrant::ImportantUrgent, 0)));
    assert!(model.tasks(Quadrant::ImportantUrgent)[0].completed);
}

#[test]
fn test_fresh_database_defaults() {
    let dir = TempDir::new().unwrap();
    let mut db = Database::open_at(&dir.path().join("quadrant.db")).unwrap();

    assert!(db.load_model().is_empty());
    let prefs = db.load_prefs();
    for quadrant in Quadrant::ALL {
        assert!(prefs.show_completed(quadrant));
    }
}

#[test]
fn test_corrupt_model_entry_is_cleared() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("quadrant.db");

    {
        let db = Database::open_at(&path).unwrap();
        let mut store = TaskStore::load(Box::new(db));
        store.add_task("Will be lost").unwrap();
    }

    let mut db = Database::open_at(&path).unwrap();
    db.kv_set(MODEL_KEY, "{not json").unwrap();

    // A corrupt entry loads as an empty model and is removed so the
    // next load starts clean.
    assert!(db.load_model().is_empty());
    assert_eq!(db.kv_get(MODEL_KEY).unwrap(), None);
}

#[test]
fn test_prefs_survive_model_corruption() {
    let dir = TempDir::new().unwrap();
    let mut db = Database::open_at(&dir.path().join("quadrant.db")).unwrap();

    let mut prefs = db.load_prefs();
    prefs.set_show_completed(Quadrant::UnimportantUrgent, false);
    db.save_prefs(&prefs).unwrap();

    db.kv_set(MODEL_KEY, "junk").unwrap();
    assert!(db.load_model().is_empty());

    let prefs = db.load_prefs();
    assert!(!prefs.show_completed(Quadrant::UnimportantUrgent));
    assert!(prefs.show_completed(Quadrant::ImportantUrgent));
}

#[test]
fn test_stored_entry_uses_the_export_layout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("quadrant.db");

    {
        let db = Database::open_at(&path).unwrap();
        let mut store = TaskStore::load(Box::new(db));
        store.add_task("Check layout").unwrap();
    }

    // The persisted entry is the same four-key document the exporter
    // writes, so an exported file and a stored entry stay interchangeable.
    let db = Database::open_at(&path).unwrap();
    let raw = db.kv_get(MODEL_KEY).unwrap().unwrap();
    let imported = quadrant_core::codec::import_document(&raw).unwrap();
    assert_eq!(imported.tasks(Quadrant::ImportantNotUrgent)[0].text, "Check layout");
}
