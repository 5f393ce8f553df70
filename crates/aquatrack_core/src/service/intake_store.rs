//! Intake store use-case service.
//!
//! # Responsibility
//! - Own today's `TrackerState` and apply user-triggered mutations to it.
//! - Persist the full state after every mutation.
//! - Emit notification events for add/remove outcomes.
//!
//! # Invariants
//! - Mutations never bypass `TrackerState` invariants.
//! - Every successful mutation is followed by exactly one `save`.
//! - Removing from an empty list changes nothing and writes nothing.

use crate::clock::{Clock, SystemClock};
use crate::ids::{IdGenerator, UuidIdGenerator};
use crate::model::intake::{
    quick_add_amount, validate_goal_delta, IntakeEntry, IntakeValidationError, TrackerState,
    GOAL_STEP_ML,
};
use crate::model::snapshot::TrackerSnapshot;
use crate::notify::{IntakeEvent, IntakeNotifier, LogNotifier};
use crate::repo::kv_store::{RepoError, SqliteKeyValueStore};
use crate::repo::tracker_repo::{KeyValueTrackerRepository, TrackerRepository};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Intake store over the local SQLite key-value table.
pub type SqliteIntakeStore<'conn> =
    IntakeStore<KeyValueTrackerRepository<SqliteKeyValueStore<'conn>>>;

/// Service error for intake use-cases.
#[derive(Debug)]
pub enum StoreError {
    /// Caller input rejected before any state change.
    Validation(IntakeValidationError),
    /// State changed in memory but could not be persisted.
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<IntakeValidationError> for StoreError {
    fn from(value: IntakeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Holder of today's tracker state plus its injected collaborators.
pub struct IntakeStore<R: TrackerRepository> {
    repo: R,
    state: TrackerState,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    notifier: Box<dyn IntakeNotifier>,
}

impl<R: TrackerRepository> IntakeStore<R> {
    /// Restores state from `repo` with system clock, UUID ids and log
    /// notifications.
    ///
    /// Never fails: unusable persisted fields fall back to defaults.
    pub fn load(repo: R) -> Self {
        let state = repo.load();
        Self {
            repo,
            state,
            clock: Box::new(SystemClock),
            ids: Box::new(UuidIdGenerator),
            notifier: Box::new(LogNotifier),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_notifier(mut self, notifier: impl IntakeNotifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Discards in-memory state and re-reads it from storage.
    pub fn reload(&mut self) {
        self.state = self.repo.load();
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn daily_goal(&self) -> u32 {
        self.state.daily_goal()
    }

    pub fn today_intake(&self) -> u32 {
        self.state.today_intake()
    }

    pub fn entries(&self) -> &[IntakeEntry] {
        self.state.entries()
    }

    pub fn entry_count(&self) -> usize {
        self.state.entries().len()
    }

    pub fn last_entry(&self) -> Option<&IntakeEntry> {
        self.state.last_entry()
    }

    /// Newest-first slice of the latest entries.
    pub fn recent_entries(&self) -> Vec<&IntakeEntry> {
        self.state.recent_entries()
    }

    pub fn progress_percentage(&self) -> f64 {
        self.state.progress_percentage()
    }

    pub fn progress_percent_rounded(&self) -> u32 {
        self.state.progress_percentage().round() as u32
    }

    pub fn remaining_amount(&self) -> u32 {
        self.state.remaining_amount()
    }

    pub fn goal_achieved(&self) -> bool {
        self.state.goal_achieved()
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot::from_state(&self.state)
    }

    /// Logs a new entry of `amount` ml stamped with the injected clock.
    ///
    /// # Errors
    /// - `Validation(ZeroAmount)` when `amount == 0`; nothing changes.
    /// - `Repo` when the write fails after the in-memory append.
    pub fn add_entry(&mut self, amount: u32) -> StoreResult<IntakeEvent> {
        let entry = IntakeEntry::new(self.ids.next_id(), amount, self.clock.now())?;
        let total = self.state.push_entry(entry);
        self.persist("intake_add")?;

        info!(
            "event=intake_add module=store status=ok amount_ml={amount} total_ml={total} entries={}",
            self.state.entries().len()
        );
        let event = IntakeEvent::Added { amount };
        self.notifier.notify(&event);
        Ok(event)
    }

    /// Adds the quick-add amount at `index`.
    pub fn add_quick_amount(&mut self, index: usize) -> StoreResult<IntakeEvent> {
        let amount = quick_add_amount(index)?;
        self.add_entry(amount)
    }

    /// Removes the most recent entry.
    ///
    /// Returns `Ok(None)` without touching storage when there is nothing to
    /// remove.
    pub fn remove_last_entry(&mut self) -> StoreResult<Option<IntakeEvent>> {
        let Some(entry) = self.state.pop_entry() else {
            debug!("event=intake_remove module=store status=skipped reason=empty");
            return Ok(None);
        };
        self.persist("intake_remove")?;

        let amount = entry.amount();
        info!(
            "event=intake_remove module=store status=ok amount_ml={amount} total_ml={} entries={}",
            self.state.today_intake(),
            self.state.entries().len()
        );
        let event = IntakeEvent::Removed { amount };
        self.notifier.notify(&event);
        Ok(Some(event))
    }

    /// Moves the daily goal by `delta` ml, clamped to the supported range.
    ///
    /// Returns the new goal. State is persisted even when clamping leaves the
    /// goal unchanged.
    ///
    /// # Errors
    /// - `Validation(GoalDeltaNotStep)` when `delta` is zero or not a multiple
    ///   of the goal step.
    pub fn set_goal(&mut self, delta: i32) -> StoreResult<u32> {
        validate_goal_delta(delta)?;
        let previous = self.state.daily_goal();
        let goal = self.state.apply_goal_delta(delta);
        self.persist("goal_set")?;

        info!(
            "event=goal_set module=store status=ok delta_ml={delta} previous_ml={previous} goal_ml={goal}"
        );
        Ok(goal)
    }

    pub fn increase_goal(&mut self) -> StoreResult<u32> {
        self.set_goal(GOAL_STEP_ML as i32)
    }

    pub fn decrease_goal(&mut self) -> StoreResult<u32> {
        self.set_goal(-(GOAL_STEP_ML as i32))
    }

    fn persist(&self, operation: &'static str) -> StoreResult<()> {
        self.repo.save(&self.state).map_err(|err| {
            error!(
                "event={operation} module=store status=error error_code=persist_failed error={err}"
            );
            StoreError::from(err)
        })
    }
}
