//! Tests for the JSON file state backend.

use gh2tracker::domain::models::SyncState;
use gh2tracker::domain::ports::{StateStore, SyncError};
use gh2tracker::infrastructure::state::FileStateStore;
use tempfile::tempdir;

#[tokio::test]
async fn missing_file_loads_as_empty_state() {
    let dir = tempdir().unwrap();
    let store = FileStateStore::new(dir.path().join("states.json"));

    let state = store.load("o/r").await.unwrap();
    assert!(state.is_empty());
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("states.json");
    let store = FileStateStore::new(&path);

    let mut state = SyncState::new();
    state.set("o-r-code-scanning-1".to_string(), true);
    state.set("o-r-secret-scanning-2".to_string(), false);

    store.save("o/r", &state).await.unwrap();
    assert!(path.exists());

    let loaded = store.load("o/r").await.unwrap();
    assert_eq!(loaded, state);
}

#[tokio::test]
async fn save_creates_missing_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/deeper/states.json");
    let store = FileStateStore::new(&path);

    store.save("o/r", &SyncState::new()).await.unwrap();
    assert!(path.exists());
}

#[tokio::test]
async fn save_replaces_previous_state() {
    let dir = tempdir().unwrap();
    let store = FileStateStore::new(dir.path().join("states.json"));

    let mut first = SyncState::new();
    first.set("k1".to_string(), true);
    store.save("o/r", &first).await.unwrap();

    let mut second = SyncState::new();
    second.set("k2".to_string(), false);
    store.save("o/r", &second).await.unwrap();

    let loaded = store.load("o/r").await.unwrap();
    assert_eq!(loaded.get("k1"), None);
    assert_eq!(loaded.get("k2"), Some(false));
}

#[tokio::test]
async fn corrupt_file_is_a_persistence_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("states.json");
    std::fs::write(&path, "not json").unwrap();

    let store = FileStateStore::new(&path);
    let err = store.load("o/r").await.unwrap_err();
    assert!(matches!(err, SyncError::StatePersistence(_)));
}
