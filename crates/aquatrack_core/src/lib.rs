//! Core domain logic for AquaTrack.
//! This crate is the single source of truth for intake-tracking invariants.

pub mod clock;
pub mod db;
pub mod ids;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ids::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::intake::{
    IntakeEntry, IntakeValidationError, TrackerState, DEFAULT_DAILY_GOAL_ML, GOAL_STEP_ML,
    MAX_DAILY_GOAL_ML, MIN_DAILY_GOAL_ML, QUICK_ADD_AMOUNTS_ML, RECENT_ENTRIES_LIMIT,
};
pub use model::snapshot::TrackerSnapshot;
pub use notify::{CollectingNotifier, IntakeEvent, IntakeNotifier, LogNotifier, NoopNotifier};
pub use repo::kv_store::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use repo::tracker_repo::{KeyValueTrackerRepository, TrackerRepository};
pub use service::intake_store::{IntakeStore, SqliteIntakeStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
