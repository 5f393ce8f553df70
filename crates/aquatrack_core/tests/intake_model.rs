use aquatrack_core::{IntakeEntry, IntakeValidationError, TrackerState, DEFAULT_DAILY_GOAL_ML};
use chrono::{TimeZone, Utc};

fn at(hour: u32, minute: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 13, hour, minute, 0).unwrap()
}

#[test]
fn default_state_matches_first_launch() {
    let state = TrackerState::default();

    assert_eq!(state.daily_goal(), DEFAULT_DAILY_GOAL_ML);
    assert_eq!(state.today_intake(), 0);
    assert!(state.entries().is_empty());
    assert_eq!(state.progress_percentage(), 0.0);
    assert_eq!(state.remaining_amount(), 2000);
    assert!(!state.goal_achieved());
}

#[test]
fn entry_rejects_zero_amount_and_blank_id() {
    assert_eq!(
        IntakeEntry::new("a", 0, at(8, 0)).unwrap_err(),
        IntakeValidationError::ZeroAmount
    );
    assert_eq!(
        IntakeEntry::new("  ", 250, at(8, 0)).unwrap_err(),
        IntakeValidationError::EmptyId
    );
}

#[test]
fn entry_serialization_uses_expected_wire_fields() {
    let entry = IntakeEntry::new("1739440800000", 500, at(10, 0)).unwrap();

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["id"], "1739440800000");
    assert_eq!(json["amount"], 500);
    assert_eq!(json["timestamp"], "2026-02-13T10:00:00Z");

    let decoded: IntakeEntry = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, entry);
}

#[test]
fn entry_accepts_millisecond_iso_timestamps() {
    let value = serde_json::json!({
        "id": "1739440800000",
        "amount": 250,
        "timestamp": "2026-02-13T10:00:00.000Z"
    });

    let entry: IntakeEntry = serde_json::from_value(value).unwrap();
    assert_eq!(entry.timestamp(), at(10, 0));
    assert_eq!(entry.amount(), 250);
}

#[test]
fn deserialize_rejects_zero_amount() {
    let value = serde_json::json!({
        "id": "x",
        "amount": 0,
        "timestamp": "2026-02-13T10:00:00Z"
    });

    let err = serde_json::from_value::<IntakeEntry>(value).unwrap_err();
    assert!(
        err.to_string().contains("greater than 0ml"),
        "unexpected error: {err}"
    );
}

#[test]
fn push_and_pop_keep_intake_in_sync() {
    let mut state = TrackerState::default();
    state.push_entry(IntakeEntry::new("a", 250, at(8, 0)).unwrap());
    state.push_entry(IntakeEntry::new("b", 750, at(9, 0)).unwrap());
    assert_eq!(state.today_intake(), 1000);
    assert_eq!(state.progress_percentage(), 50.0);

    let removed = state.pop_entry().unwrap();
    assert_eq!(removed.id(), "b");
    assert_eq!(state.today_intake(), 250);

    state.pop_entry().unwrap();
    assert!(state.pop_entry().is_none());
    assert_eq!(state.today_intake(), 0);
}

#[test]
fn progress_is_capped_at_one_hundred() {
    let entries = vec![
        IntakeEntry::new("a", 1000, at(8, 0)).unwrap(),
        IntakeEntry::new("b", 1000, at(9, 0)).unwrap(),
        IntakeEntry::new("c", 1000, at(10, 0)).unwrap(),
    ];
    let state = TrackerState::with_entries(2000, entries);

    assert_eq!(state.today_intake(), 3000);
    assert_eq!(state.progress_percentage(), 100.0);
    assert_eq!(state.remaining_amount(), 0);
    assert!(state.goal_achieved());
}

#[test]
fn with_entries_clamps_goal_and_derives_intake() {
    let entries = vec![IntakeEntry::new("a", 500, at(8, 0)).unwrap()];

    let low = TrackerState::with_entries(10, entries.clone());
    assert_eq!(low.daily_goal(), 1000);
    assert_eq!(low.today_intake(), 500);

    let high = TrackerState::with_entries(9000, entries);
    assert_eq!(high.daily_goal(), 5000);
}

#[test]
fn goal_delta_clamps_at_bounds() {
    let mut state = TrackerState::default();
    assert_eq!(state.apply_goal_delta(-750), 1250);
    assert_eq!(state.apply_goal_delta(-500), 1000);
    assert_eq!(state.apply_goal_delta(5000), 5000);
}

#[test]
fn restore_keeps_stored_intake_and_floors_on_pop() {
    let entries = vec![IntakeEntry::new("a", 500, at(8, 0)).unwrap()];
    let mut state = TrackerState::restore(12_000, entries, 300);

    assert_eq!(state.daily_goal(), 5000);
    assert_eq!(state.today_intake(), 300);

    state.pop_entry().unwrap();
    assert_eq!(state.today_intake(), 0);
}
