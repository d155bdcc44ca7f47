//! Integration tests for router-tabs-store.
//!
//! These exercise a `KeyedTabStore` over both storage backends, including
//! two stores sharing one medium the way two windows share one profile.

use router_tabs_store::{
    FileStorage, KeyValueStorage, KeyedTabStore, MemoryStorage, TabRecord, TabStore,
};
use tempfile::tempdir;

fn user(id: &str) -> TabRecord {
    TabRecord::new("user").with_param("id", id)
}

// ---------------------------------------------------------------------------
// File-backed stores
// ---------------------------------------------------------------------------

#[test]
fn file_store_survives_reopen() {
    let temp = tempdir().unwrap();

    {
        let storage = FileStorage::open(temp.path()).unwrap();
        let store: KeyedTabStore<TabRecord, _> = KeyedTabStore::new("app", storage);
        store.set(&[user("1"), user("2")]).unwrap();
        store.set_last_focus_tab(&user("2")).unwrap();
    }

    let storage = FileStorage::open(temp.path()).unwrap();
    let store: KeyedTabStore<TabRecord, _> = KeyedTabStore::new("app", storage);
    assert_eq!(store.get(), vec![user("1"), user("2")]);
    assert_eq!(store.get_last_focus_tab(), Some(user("2")));
}

#[test]
fn file_store_defaults_written_to_disk() {
    let temp = tempdir().unwrap();
    let storage = FileStorage::open(temp.path()).unwrap();
    let store: KeyedTabStore<TabRecord, _> = KeyedTabStore::new("app", storage.clone())
        .with_default_tabs(|| vec![TabRecord::new("dashboard")]);

    assert_eq!(store.get(), vec![TabRecord::new("dashboard")]);
    let path = storage.path_for_key("app:router-tabs").unwrap();
    assert!(path.exists());
}

#[test]
fn file_store_corrupt_file_recovers() {
    let temp = tempdir().unwrap();
    let storage = FileStorage::open(temp.path()).unwrap();
    let store: KeyedTabStore<TabRecord, _> = KeyedTabStore::new("app", storage.clone());

    std::fs::write(storage.path_for_key("app:router-tabs").unwrap(), "[[[").unwrap();
    assert!(store.get().is_empty());
}

#[test]
fn file_store_destroy_by_pattern() {
    let temp = tempdir().unwrap();
    let storage = FileStorage::open(temp.path()).unwrap();
    let first: KeyedTabStore<TabRecord, _> = KeyedTabStore::new("session-a", storage.clone());
    let second: KeyedTabStore<TabRecord, _> = KeyedTabStore::new("session-b", storage.clone());
    first.set(&[user("1")]).unwrap();
    second.set(&[user("2")]).unwrap();

    assert_eq!(first.destroy_by_pattern("session-").unwrap(), 2);
    assert!(storage.keys().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Shared medium
// ---------------------------------------------------------------------------

#[test]
fn shared_memory_storage_last_write_wins() {
    let storage = MemoryStorage::new();
    let window_a: KeyedTabStore<TabRecord, _> = KeyedTabStore::new("app", storage.clone());
    let window_b: KeyedTabStore<TabRecord, _> = KeyedTabStore::new("app", storage.clone());

    let rx = storage.subscribe();
    window_a.set(&[user("1")]).unwrap();
    window_b.set(&[user("9")]).unwrap();

    assert_eq!(window_a.get(), vec![user("9")]);
    let keys: Vec<String> = rx.try_iter().map(|event| event.key).collect();
    assert_eq!(keys, vec!["app:router-tabs", "app:router-tabs"]);
}
