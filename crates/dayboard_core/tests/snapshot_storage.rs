use chrono::NaiveDate;
use dayboard_core::db::open_db;
use dayboard_core::{
    DateKey, FileSnapshotStore, SnapshotStore, SqliteSnapshotStore, StoreConfig, TaskStore,
    DEFAULT_STORAGE_KEY,
};
use serde_json::{json, Value};

fn feb(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, day).unwrap()
}

#[test]
fn sqlite_slot_is_empty_until_first_save() {
    let mut slot = SqliteSnapshotStore::in_memory(DEFAULT_STORAGE_KEY).unwrap();
    assert_eq!(slot.load().unwrap(), None);

    slot.save(b"first").unwrap();
    slot.save(b"second").unwrap();
    assert_eq!(slot.load().unwrap().as_deref(), Some(&b"second"[..]));

    let rows: i64 = slot
        .connection()
        .query_row("SELECT COUNT(*) FROM kv_slots;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn sqlite_slots_with_different_keys_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dayboard.sqlite3");

    let mut tasks = SqliteSnapshotStore::open(&StoreConfig::new(&path)).unwrap();
    let mut other =
        SqliteSnapshotStore::open(&StoreConfig::new(&path).with_storage_key("Other")).unwrap();
    tasks.save(b"tasks").unwrap();
    other.save(b"other").unwrap();

    assert_eq!(tasks.load().unwrap().as_deref(), Some(&b"tasks"[..]));
    assert_eq!(other.load().unwrap().as_deref(), Some(&b"other"[..]));
}

#[test]
fn store_reopened_on_same_database_sees_same_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path().join("dayboard.sqlite3"));
    let day = DateKey::of(feb(21)).unwrap();

    let expected = {
        let mut store = TaskStore::new(SqliteSnapshotStore::open(&config).unwrap());
        let milk = store.add_task(feb(21), "Buy milk").unwrap();
        store.add_task(feb(21), "Call mom").unwrap();
        store.add_task(feb(20), "Pay rent").unwrap();
        store.toggle_task(&day, milk.id);
        store.snapshot().clone()
    };

    let reopened = TaskStore::new(SqliteSnapshotStore::open(&config).unwrap());
    assert_eq!(reopened.snapshot(), &expected);
    assert!(reopened.tasks_for(&day)[0].completed);
    assert_eq!(
        reopened.all_date_keys(),
        vec![DateKey::of(feb(21)).unwrap(), DateKey::of(feb(20)).unwrap()]
    );
}

#[test]
fn sqlite_slot_holds_iso_keyed_json() {
    let mut store = TaskStore::new(SqliteSnapshotStore::in_memory(DEFAULT_STORAGE_KEY).unwrap());
    let task = store.add_task(feb(21), "Buy milk").unwrap();

    let blob = store.storage().load().unwrap().unwrap();
    let value: Value = serde_json::from_slice(&blob).unwrap();
    assert_eq!(
        value,
        json!({
            "2026-02-21": [
                { "id": task.id.to_string(), "title": "Buy milk", "isCompleted": false }
            ]
        })
    );
}

#[test]
fn corrupt_sqlite_slot_falls_back_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dayboard.sqlite3");
    {
        let conn = open_db(&path).unwrap();
        conn.execute(
            "INSERT INTO kv_slots (key, value) VALUES (?1, ?2);",
            rusqlite::params![DEFAULT_STORAGE_KEY, &b"\x00garbage"[..]],
        )
        .unwrap();
    }

    let store = TaskStore::new(SqliteSnapshotStore::open(&StoreConfig::new(&path)).unwrap());
    assert!(store.is_empty());
}

#[test]
fn file_slot_missing_file_loads_none() {
    let dir = tempfile::tempdir().unwrap();
    let slot = FileSnapshotStore::new(dir.path().join("missing.json"));
    assert_eq!(slot.load().unwrap(), None);
}

#[test]
fn file_slot_overwrites_and_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("tasks.json");
    let mut slot = FileSnapshotStore::new(&path);

    slot.save(b"{\"a\":1}").unwrap();
    slot.save(b"{}").unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"{}");
    assert!(!path.with_file_name("tasks.json.tmp").exists());
}

#[test]
fn file_backed_store_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");

    let expected = {
        let mut store = TaskStore::new(FileSnapshotStore::new(&path));
        store.add_task(feb(21), "Buy milk").unwrap();
        store.add_task(feb(22), "Call mom").unwrap();
        store.snapshot().clone()
    };

    let reopened = TaskStore::new(FileSnapshotStore::new(&path));
    assert_eq!(reopened.snapshot(), &expected);
}

#[test]
fn unreadable_file_slot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    // A directory at the slot path makes reads fail with something other than NotFound.
    let store = TaskStore::new(FileSnapshotStore::new(dir.path()));
    assert!(store.is_empty());
}
