use aquatrack_core::db::open_db;
use aquatrack_core::repo::tracker_repo::{ENTRIES_KEY, GOAL_KEY, TODAY_INTAKE_KEY};
use aquatrack_core::{
    IntakeEntry, KeyValueStore, KeyValueTrackerRepository, MemoryKeyValueStore,
    SqliteKeyValueStore, TrackerRepository, TrackerState,
};
use chrono::{TimeZone, Utc};

fn sample_state() -> TrackerState {
    let first = Utc.with_ymd_and_hms(2026, 2, 13, 7, 45, 12).unwrap();
    let second = first + chrono::Duration::milliseconds(5_400_123);
    TrackerState::with_entries(
        2750,
        vec![
            IntakeEntry::new("entry-1", 250, first).unwrap(),
            IntakeEntry::new("entry-2", 750, second).unwrap(),
        ],
    )
}

#[test]
fn empty_store_loads_defaults() {
    let repo = KeyValueTrackerRepository::new(MemoryKeyValueStore::new());

    assert_eq!(repo.load(), TrackerState::default());
}

#[test]
fn save_writes_all_three_keys() {
    let store = MemoryKeyValueStore::new();
    let repo = KeyValueTrackerRepository::new(store.clone());

    repo.save(&sample_state()).unwrap();

    assert_eq!(store.get(GOAL_KEY).unwrap().as_deref(), Some("2750"));
    assert_eq!(store.get(TODAY_INTAKE_KEY).unwrap().as_deref(), Some("1000"));
    let entries: serde_json::Value =
        serde_json::from_str(&store.get(ENTRIES_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(entries[0]["id"], "entry-1");
    assert_eq!(entries[1]["amount"], 750);
}

#[test]
fn memory_roundtrip_preserves_state() {
    let repo = KeyValueTrackerRepository::new(MemoryKeyValueStore::new());
    let state = sample_state();

    repo.save(&state).unwrap();

    assert_eq!(repo.load(), state);
}

#[test]
fn sqlite_roundtrip_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracker.db");
    let state = sample_state();

    {
        let conn = open_db(&path).unwrap();
        let repo = KeyValueTrackerRepository::new(SqliteKeyValueStore::new(&conn));
        repo.save(&state).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let repo = KeyValueTrackerRepository::new(SqliteKeyValueStore::new(&conn));
    assert_eq!(repo.load(), state);
}

#[test]
fn sqlite_save_overwrites_previous_values() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("tracker.db")).unwrap();
    let repo = KeyValueTrackerRepository::new(SqliteKeyValueStore::new(&conn));

    repo.save(&sample_state()).unwrap();
    repo.save(&TrackerState::default()).unwrap();

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 3);
    assert_eq!(repo.load(), TrackerState::default());
}

#[test]
fn corrupt_goal_falls_back_to_default_without_touching_entries() {
    let store = MemoryKeyValueStore::new();
    let repo = KeyValueTrackerRepository::new(store.clone());
    repo.save(&sample_state()).unwrap();
    store.set(GOAL_KEY, "lots").unwrap();

    let loaded = repo.load();
    assert_eq!(loaded.daily_goal(), 2000);
    assert_eq!(loaded.entries().len(), 2);
    assert_eq!(loaded.today_intake(), 1000);
}

#[test]
fn out_of_range_goal_is_clamped() {
    let store = MemoryKeyValueStore::new();
    store.set(GOAL_KEY, "12000").unwrap();
    let repo = KeyValueTrackerRepository::new(store.clone());
    assert_eq!(repo.load().daily_goal(), 5000);

    store.set(GOAL_KEY, "-3").unwrap();
    assert_eq!(repo.load().daily_goal(), 1000);
}

#[test]
fn malformed_entries_fall_back_to_empty_list() {
    let store = MemoryKeyValueStore::new();
    let repo = KeyValueTrackerRepository::new(store.clone());
    repo.save(&sample_state()).unwrap();

    store.set(ENTRIES_KEY, "[{not json").unwrap();
    let loaded = repo.load();
    assert!(loaded.entries().is_empty());
    assert_eq!(loaded.today_intake(), 1000);
    assert_eq!(loaded.daily_goal(), 2750);

    store
        .set(
            ENTRIES_KEY,
            r#"[{"id":"ok","amount":250,"timestamp":"2026-02-13T10:00:00Z"},
                {"id":"bad","amount":0,"timestamp":"2026-02-13T11:00:00Z"}]"#,
        )
        .unwrap();
    assert!(repo.load().entries().is_empty());
}

#[test]
fn stored_intake_is_kept_when_it_disagrees_with_entries() {
    let store = MemoryKeyValueStore::new();
    let repo = KeyValueTrackerRepository::new(store.clone());
    repo.save(&sample_state()).unwrap();
    store.set(TODAY_INTAKE_KEY, "4200").unwrap();

    let loaded = repo.load();
    assert_eq!(loaded.today_intake(), 4200);
    assert_eq!(loaded.entries().len(), 2);

    store.set(TODAY_INTAKE_KEY, "garbage").unwrap();
    assert_eq!(repo.load().today_intake(), 1000);
}

#[test]
fn valid_intake_survives_corrupt_entries() {
    let store = MemoryKeyValueStore::new();
    store.set(GOAL_KEY, "2000").unwrap();
    store.set(TODAY_INTAKE_KEY, "750").unwrap();
    store.set(ENTRIES_KEY, "[{not json").unwrap();

    let loaded = KeyValueTrackerRepository::new(store).load();

    assert_eq!(loaded.today_intake(), 750);
    assert!(loaded.entries().is_empty());
    assert_eq!(loaded.daily_goal(), 2000);
    assert_eq!(loaded.remaining_amount(), 1250);
}

#[test]
fn missing_intake_key_uses_entries() {
    let store = MemoryKeyValueStore::new();
    let repo = KeyValueTrackerRepository::new(store.clone());
    repo.save(&sample_state()).unwrap();
    store.remove(TODAY_INTAKE_KEY);

    assert_eq!(repo.load(), sample_state());
}
