//! Tracker state persistence over a key-value store.
//!
//! # Responsibility
//! - Map `TrackerState` to the three persisted keys and back.
//! - Recover from missing or corrupt values without surfacing errors.
//!
//! # Invariants
//! - `save` always writes goal, intake and entries together.
//! - `load` never fails; each unusable field falls back on its own.
//! - A readable `todayIntake` is restored as stored, even when it disagrees
//!   with the entries; a missing or corrupt one is derived from the entries.

use crate::model::intake::{
    clamp_goal, sum_amounts, IntakeEntry, TrackerState, DEFAULT_DAILY_GOAL_ML,
};
use crate::repo::kv_store::{KeyValueStore, RepoResult};
use log::{info, warn};

/// Key holding the daily goal as a decimal integer.
pub const GOAL_KEY: &str = "waterGoal";
/// Key holding today's running total as a decimal integer.
pub const TODAY_INTAKE_KEY: &str = "todayIntake";
/// Key holding the JSON array of entries.
pub const ENTRIES_KEY: &str = "waterEntries";

/// Load/save port for tracker state.
pub trait TrackerRepository {
    /// Restores persisted state, substituting defaults for unusable fields.
    fn load(&self) -> TrackerState;
    /// Re-writes the full persisted state.
    fn save(&self, state: &TrackerState) -> RepoResult<()>;
}

/// `TrackerRepository` backed by any `KeyValueStore`.
pub struct KeyValueTrackerRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KeyValueTrackerRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!("event=tracker_load module=repo status=fallback key={key} reason=read_failed error={err}");
                None
            }
        }
    }

    fn read_goal(&self) -> u32 {
        let Some(raw) = self.read_raw(GOAL_KEY) else {
            return DEFAULT_DAILY_GOAL_ML;
        };
        match raw.trim().parse::<i64>() {
            Ok(value) => clamp_goal(value),
            Err(_) => {
                warn!("event=tracker_load module=repo status=fallback key={GOAL_KEY} reason=unparsable");
                DEFAULT_DAILY_GOAL_ML
            }
        }
    }

    fn read_intake(&self) -> Option<u32> {
        let raw = self.read_raw(TODAY_INTAKE_KEY)?;
        match raw.trim().parse::<u32>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("event=tracker_load module=repo status=fallback key={TODAY_INTAKE_KEY} reason=unparsable");
                None
            }
        }
    }

    fn read_entries(&self) -> Vec<IntakeEntry> {
        let Some(raw) = self.read_raw(ENTRIES_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<IntakeEntry>>(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    "event=tracker_load module=repo status=fallback key={ENTRIES_KEY} reason=malformed error_line={} error_column={}",
                    err.line(),
                    err.column()
                );
                Vec::new()
            }
        }
    }
}

impl<S: KeyValueStore> TrackerRepository for KeyValueTrackerRepository<S> {
    fn load(&self) -> TrackerState {
        let goal = self.read_goal();
        let entries = self.read_entries();
        let stored_intake = self.read_intake();

        let entries_sum = sum_amounts(&entries);
        let today_intake = match stored_intake {
            Some(stored) => {
                if stored != entries_sum {
                    warn!(
                        "event=tracker_load module=repo status=mismatch stored_intake_ml={stored} entries_sum_ml={entries_sum}"
                    );
                }
                stored
            }
            None => entries_sum,
        };
        let state = TrackerState::restore(goal, entries, today_intake);

        info!(
            "event=tracker_load module=repo status=ok goal_ml={} intake_ml={} entries={}",
            state.daily_goal(),
            state.today_intake(),
            state.entries().len()
        );
        state
    }

    fn save(&self, state: &TrackerState) -> RepoResult<()> {
        let entries_json = serde_json::to_string(state.entries())?;
        self.store.set_many(&[
            (GOAL_KEY, state.daily_goal().to_string()),
            (TODAY_INTAKE_KEY, state.today_intake().to_string()),
            (ENTRIES_KEY, entries_json),
        ])
    }
}
