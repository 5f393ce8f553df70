//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level tracker functions to Dart via FRB.
//! - Translate core results into flat response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every action response carries the post-action snapshot when `ok`.

use aquatrack_core::db::open_db;
use aquatrack_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    IntakeEntry, IntakeStore, KeyValueTrackerRepository, SqliteIntakeStore, SqliteKeyValueStore,
    StoreResult, TrackerSnapshot, QUICK_ADD_AMOUNTS_ML,
};
use log::warn;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const TRACKER_DB_FILE_NAME: &str = "aquatrack.sqlite3";
const TRACKER_DB_PATH_ENV: &str = "AQUATRACK_DB_PATH";
static TRACKER_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One logged drink as shown in the recent-entries list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerEntryItem {
    pub entry_id: String,
    pub amount_ml: u32,
    /// RFC 3339 UTC timestamp; the UI formats local time.
    pub timestamp: String,
}

/// Render-ready tracker state.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerView {
    pub daily_goal_ml: u32,
    pub today_intake_ml: u32,
    pub remaining_ml: u32,
    /// Within `[0, 100]`.
    pub progress_percentage: f64,
    pub progress_percent_rounded: u32,
    pub entry_count: u32,
    pub goal_achieved: bool,
    /// Amount of the entry "Remove Last" would remove.
    pub last_entry_ml: Option<u32>,
    /// Newest first.
    pub recent_entries: Vec<TrackerEntryItem>,
}

/// Read response for the main tracker screen.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerSnapshotResponse {
    pub ok: bool,
    pub view: Option<TrackerView>,
    /// Diagnostic message; empty on success.
    pub message: String,
}

/// Result envelope for tracker mutations.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerActionResponse {
    pub ok: bool,
    /// Toast text on success, diagnostic text on failure.
    pub message: String,
    pub view: Option<TrackerView>,
}

impl TrackerActionResponse {
    fn success(message: impl Into<String>, snapshot: TrackerSnapshot) -> Self {
        Self {
            ok: true,
            message: message.into(),
            view: Some(to_tracker_view(snapshot)),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            view: None,
        }
    }
}

/// Loads current tracker state for rendering.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_snapshot() -> TrackerSnapshotResponse {
    snapshot_at(&resolve_tracker_db_path())
}

fn snapshot_at(db_path: &Path) -> TrackerSnapshotResponse {
    match with_intake_store_at(db_path, |store| Ok(store.snapshot())) {
        Ok(snapshot) => TrackerSnapshotResponse {
            ok: true,
            view: Some(to_tracker_view(snapshot)),
            message: String::new(),
        },
        Err(err) => TrackerSnapshotResponse {
            ok: false,
            view: None,
            message: format!("tracker_snapshot failed: {err}"),
        },
    }
}

/// Logs `amount_ml` of water.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - `amount_ml == 0` returns `ok=false` and changes nothing.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_add_entry(amount_ml: u32) -> TrackerActionResponse {
    add_entry_at(&resolve_tracker_db_path(), amount_ml)
}

fn add_entry_at(db_path: &Path, amount_ml: u32) -> TrackerActionResponse {
    let result = with_intake_store_at(db_path, |store| {
        let event = store.add_entry(amount_ml)?;
        Ok((event.message(), store.snapshot()))
    });
    match result {
        Ok((message, snapshot)) => TrackerActionResponse::success(message, snapshot),
        Err(err) => TrackerActionResponse::failure(format!("tracker_add_entry failed: {err}")),
    }
}

/// Removes the most recent entry.
///
/// # FFI contract
/// - Empty entry list is not an error: returns `ok=true` with an empty message.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_remove_last_entry() -> TrackerActionResponse {
    remove_last_entry_at(&resolve_tracker_db_path())
}

fn remove_last_entry_at(db_path: &Path) -> TrackerActionResponse {
    let result = with_intake_store_at(db_path, |store| {
        let event = store.remove_last_entry()?;
        let message = event.map(|event| event.message()).unwrap_or_default();
        Ok((message, store.snapshot()))
    });
    match result {
        Ok((message, snapshot)) => TrackerActionResponse::success(message, snapshot),
        Err(err) => {
            TrackerActionResponse::failure(format!("tracker_remove_last_entry failed: {err}"))
        }
    }
}

/// Moves the daily goal by `delta_ml` (a non-zero multiple of 250).
///
/// # FFI contract
/// - Out-of-range results are clamped, not rejected.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_adjust_goal(delta_ml: i32) -> TrackerActionResponse {
    adjust_goal_at(&resolve_tracker_db_path(), delta_ml)
}

fn adjust_goal_at(db_path: &Path, delta_ml: i32) -> TrackerActionResponse {
    let result = with_intake_store_at(db_path, |store| {
        let goal = store.set_goal(delta_ml)?;
        Ok((format!("Daily goal set to {goal}ml."), store.snapshot()))
    });
    match result {
        Ok((message, snapshot)) => TrackerActionResponse::success(message, snapshot),
        Err(err) => TrackerActionResponse::failure(format!("tracker_adjust_goal failed: {err}")),
    }
}

/// Amounts offered by the quick-add buttons.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_quick_amounts() -> Vec<u32> {
    QUICK_ADD_AMOUNTS_ML.to_vec()
}

fn resolve_tracker_db_path() -> PathBuf {
    TRACKER_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(TRACKER_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(TRACKER_DB_FILE_NAME)
        })
        .clone()
}

fn with_intake_store_at<T>(
    db_path: &Path,
    f: impl FnOnce(&mut SqliteIntakeStore<'_>) -> StoreResult<T>,
) -> Result<T, String> {
    let conn = open_db(db_path).map_err(|err| {
        warn!(
            "event=ffi_call module=ffi status=error error_code={}",
            err.code()
        );
        format!("tracker DB open failed: {err}")
    })?;
    let mut store = IntakeStore::load(KeyValueTrackerRepository::new(SqliteKeyValueStore::new(
        &conn,
    )));
    let result = f(&mut store);
    result.map_err(|err| err.to_string())
}

fn to_tracker_view(snapshot: TrackerSnapshot) -> TrackerView {
    TrackerView {
        daily_goal_ml: snapshot.daily_goal,
        today_intake_ml: snapshot.today_intake,
        remaining_ml: snapshot.remaining_amount,
        progress_percentage: snapshot.progress_percentage,
        progress_percent_rounded: snapshot.progress_percent_rounded,
        entry_count: u32::try_from(snapshot.entry_count).unwrap_or(u32::MAX),
        goal_achieved: snapshot.goal_achieved,
        last_entry_ml: snapshot.last_entry.as_ref().map(IntakeEntry::amount),
        recent_entries: snapshot
            .recent_entries
            .iter()
            .map(to_tracker_entry_item)
            .collect(),
    }
}

fn to_tracker_entry_item(entry: &IntakeEntry) -> TrackerEntryItem {
    TrackerEntryItem {
        entry_id: entry.id().to_string(),
        amount_ml: entry.amount(),
        timestamp: entry.timestamp().to_rfc3339(),
    }
}
