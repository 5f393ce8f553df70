//! Domain model for daily water intake tracking.
//!
//! # Responsibility
//! - Define the intake entry record and the tracker state it accumulates into.
//! - Own the goal bounds and the derived progress metrics.
//!
//! # Invariants
//! - `TrackerState::today_intake()` equals the sum of entry amounts after
//!   every mutation.
//! - The daily goal never leaves `[MIN_DAILY_GOAL_ML, MAX_DAILY_GOAL_ML]`.

pub mod intake;
pub mod snapshot;
