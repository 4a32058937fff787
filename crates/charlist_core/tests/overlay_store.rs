use charlist_core::storage::{open_store, open_store_in_memory};
use charlist_core::{
    Comment, MemorySlot, OverlayState, OverlayStore, PersistencePort, SqliteKeyValueStore,
};
use chrono::{TimeZone, Utc};
use std::collections::HashSet;

const OVERLAY_KEY: &str = "charlist.user_interactions";

#[test]
fn toggle_favorite_twice_restores_membership() {
    let slot = MemorySlot::new();
    let mut store = OverlayStore::load(&slot);
    store.toggle_favorite("5");
    let before = store.favorite_ids();

    assert!(store.toggle_favorite("1"));
    assert!(!store.toggle_favorite("1"));

    assert_eq!(store.favorite_ids(), before);
    assert_eq!(slot.save_count(), 3);
}

#[test]
fn hide_is_idempotent_and_unhide_removes() {
    let slot = MemorySlot::new();
    let mut store = OverlayStore::load(&slot);

    assert!(store.hide_character("3"));
    assert!(!store.hide_character("3"));
    assert_eq!(store.state().hidden(), ["3"]);

    assert!(store.unhide_character("3"));
    assert!(!store.is_hidden("3"));
}

#[test]
fn add_comment_appends_trimmed_text_with_unique_id() {
    let slot = MemorySlot::new();
    let mut store = OverlayStore::load(&slot);
    store.add_comment("2", "existing");
    store.add_comment("9", "other thread");

    let id = store.add_comment("1", "  hello  ").unwrap();

    let thread = store.comments_for("1");
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].text, "hello");
    assert_eq!(thread[0].id, id);

    let all_ids: Vec<&str> = store
        .state()
        .comments()
        .values()
        .flatten()
        .map(|comment| comment.id.as_str())
        .collect();
    let unique: HashSet<&str> = all_ids.iter().copied().collect();
    assert_eq!(unique.len(), all_ids.len());
}

#[test]
fn blank_comment_is_rejected_without_writing() {
    let slot = MemorySlot::new();
    let mut store = OverlayStore::load(&slot);

    assert_eq!(store.add_comment("1", " \n\t "), None);
    assert!(store.comments_for("1").is_empty());
    assert_eq!(slot.save_count(), 0);
}

#[test]
fn edit_comment_changes_only_text() {
    let slot = MemorySlot::new();
    let mut store = OverlayStore::load(&slot);
    let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
    let first = store.add_comment_at("1", "first", created_at).unwrap();
    let second = store.add_comment_at("1", "second", created_at).unwrap();
    let third = store.add_comment_at("1", "third", created_at).unwrap();

    assert!(store.edit_comment("1", &second, "new text"));

    let thread = store.comments_for("1");
    let ids: Vec<&str> = thread.iter().map(|comment| comment.id.as_str()).collect();
    assert_eq!(ids, [first.as_str(), second.as_str(), third.as_str()]);
    assert_eq!(thread[1].text, "new text");
    assert_eq!(thread[1].created_at, created_at);
    assert_eq!(thread[0].text, "first");
}

#[test]
fn edit_comment_rejects_blank_text_and_unknown_ids() {
    let slot = MemorySlot::new();
    let mut store = OverlayStore::load(&slot);
    let id = store.add_comment("1", "keep me").unwrap();

    assert!(!store.edit_comment("1", &id, "   "));
    assert!(!store.edit_comment("1", "missing", "text"));
    assert!(!store.edit_comment("2", &id, "wrong thread"));
    assert_eq!(store.comments_for("1")[0].text, "keep me");
    assert_eq!(slot.save_count(), 1);
}

#[test]
fn delete_comment_removes_exactly_one() {
    let slot = MemorySlot::new();
    let mut store = OverlayStore::load(&slot);
    let first = store.add_comment("1", "a").unwrap();
    let second = store.add_comment("1", "b").unwrap();
    let third = store.add_comment("1", "c").unwrap();

    assert!(!store.delete_comment("1", "missing"));
    assert_eq!(store.comment_count("1"), 3);

    assert!(store.delete_comment("1", &second));
    let ids: Vec<&str> = store
        .comments_for("1")
        .iter()
        .map(|comment| comment.id.as_str())
        .collect();
    assert_eq!(ids, [first.as_str(), third.as_str()]);
}

#[test]
fn every_mutation_is_flushed_before_returning() {
    let slot = MemorySlot::new();
    let mut store = OverlayStore::load(&slot);

    store.toggle_favorite("1");
    let persisted = OverlayState::from_json(&slot.value().unwrap()).unwrap();
    assert!(persisted.is_favorite("1"));

    let comment_id = store.add_comment("1", "persist me").unwrap();
    let persisted = OverlayState::from_json(&slot.value().unwrap()).unwrap();
    assert_eq!(persisted.comments_for("1")[0].id, comment_id);
}

#[test]
fn corrupt_document_falls_back_to_empty_state() {
    let slot = MemorySlot::with_value("{not json");
    let mut store = OverlayStore::load(&slot);
    assert!(store.state().is_empty());

    store.hide_character("4");
    let persisted = OverlayState::from_json(&slot.value().unwrap()).unwrap();
    assert_eq!(persisted.hidden(), ["4"]);
}

#[test]
fn overlay_state_round_trips_through_json() {
    let mut state = OverlayState::new();
    state.toggle_favorite("8");
    state.toggle_favorite("2");
    state.insert_hidden("5");
    state.insert_hidden("1");
    let created_at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    state.push_comment("2", Comment::with_id("z", "last id first", created_at));
    state.push_comment("2", Comment::with_id("a", "second", created_at));
    state.push_comment("10", Comment::with_id("m", "other", created_at));

    let restored = OverlayState::from_json(&state.to_json().unwrap()).unwrap();

    assert_eq!(restored, state);
    assert_eq!(restored.favorites(), ["8", "2"]);
    assert_eq!(restored.comments_for("2")[0].id, "z");
}

#[test]
fn stored_document_uses_external_field_names() {
    let slot = MemorySlot::new();
    let mut store = OverlayStore::load(&slot);
    store.toggle_favorite("1");
    store.hide_character("2");
    store.add_comment_at("1", "hi", Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());

    let json: serde_json::Value = serde_json::from_str(&slot.value().unwrap()).unwrap();
    assert_eq!(json["favorites"], serde_json::json!(["1"]));
    assert_eq!(json["hidden"], serde_json::json!(["2"]));
    assert_eq!(json["comments"]["1"][0]["text"], "hi");
    assert_eq!(json["comments"]["1"][0]["createdAt"], "2024-06-01T00:00:00Z");
}

#[test]
fn state_survives_reload_from_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("charlist.sqlite3");
    let comment_id;

    {
        let conn = open_store(&path).unwrap();
        let kv = SqliteKeyValueStore::new(&conn);
        let mut store = OverlayStore::load(kv.slot(OVERLAY_KEY).unwrap());
        store.toggle_favorite("1");
        store.hide_character("3");
        comment_id = store.add_comment("1", "remember this").unwrap();
    }

    let conn = open_store(&path).unwrap();
    let kv = SqliteKeyValueStore::new(&conn);
    let store = OverlayStore::load(kv.slot(OVERLAY_KEY).unwrap());
    assert!(store.is_favorite("1"));
    assert!(store.is_hidden("3"));
    assert_eq!(store.comments_for("1")[0].id, comment_id);
    assert_eq!(store.comments_for("1")[0].text, "remember this");
}

#[test]
fn legacy_document_in_sqlite_is_loaded() {
    let conn = open_store_in_memory().unwrap();
    let kv = SqliteKeyValueStore::new(&conn);
    let slot = kv.slot(OVERLAY_KEY).unwrap();
    slot.save(r#"{"favorites":["1"],"deletedCharacters":["2"],"comments":{}}"#)
        .unwrap();

    let store = OverlayStore::load(slot);
    assert!(store.is_favorite("1"));
    assert!(store.is_hidden("2"));
}
