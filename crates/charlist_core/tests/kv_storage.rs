use charlist_core::storage::{open_store, open_store_in_memory};
use charlist_core::{PersistencePort, SqliteKeyValueStore, StorageError};

#[test]
fn slot_load_returns_none_until_saved() {
    let conn = open_store_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let slot = store.slot("charlist.user_interactions").unwrap();

    assert_eq!(slot.load().unwrap(), None);
    slot.save(r#"{"favorites":[]}"#).unwrap();
    assert_eq!(slot.load().unwrap().as_deref(), Some(r#"{"favorites":[]}"#));
}

#[test]
fn save_overwrites_whole_value() {
    let conn = open_store_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let slot = store.slot("charlist.welcome_dismissed").unwrap();

    slot.save("a much longer first value").unwrap();
    slot.save("true").unwrap();
    assert_eq!(slot.load().unwrap().as_deref(), Some("true"));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn keys_are_isolated() {
    let conn = open_store_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    store.set("first", "1").unwrap();
    store.set("second", "2").unwrap();
    assert_eq!(store.get("first").unwrap().as_deref(), Some("1"));
    assert!(store.remove("first").unwrap());
    assert!(!store.remove("first").unwrap());
    assert_eq!(store.get("first").unwrap(), None);
    assert_eq!(store.get("second").unwrap().as_deref(), Some("2"));
}

#[test]
fn invalid_keys_are_rejected() {
    let conn = open_store_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    let err = store.slot("User Interactions").err().unwrap();
    assert!(matches!(err, StorageError::InvalidKey(key) if key == "User Interactions"));
    assert!(matches!(
        store.set("", "x").unwrap_err(),
        StorageError::InvalidKey(_)
    ));
}

#[test]
fn values_survive_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("charlist.sqlite3");

    {
        let conn = open_store(&path).unwrap();
        SqliteKeyValueStore::new(&conn).set("k", "persisted").unwrap();
    }

    let conn = open_store(&path).unwrap();
    assert_eq!(
        SqliteKeyValueStore::new(&conn).get("k").unwrap().as_deref(),
        Some("persisted")
    );
}
