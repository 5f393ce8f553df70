//! Intake entry and tracker state.
//!
//! # Responsibility
//! - Define the immutable `IntakeEntry` record and its wire shape.
//! - Apply invariant-preserving mutations to `TrackerState`.
//! - Compute progress and remaining-amount metrics.
//!
//! # Invariants
//! - Entry amount is strictly positive and entry id is non-blank.
//! - `today_intake == sum(entries[*].amount)` after any mutation of a state
//!   that started consistent. Restored state may carry a stored total that
//!   disagrees; removal then floors the total at zero.
//! - Goal is clamped to `[MIN_DAILY_GOAL_ML, MAX_DAILY_GOAL_ML]` and only
//!   moves by multiples of `GOAL_STEP_ML`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Goal used on first launch and whenever the persisted goal is unusable.
pub const DEFAULT_DAILY_GOAL_ML: u32 = 2000;
/// Lowest selectable daily goal.
pub const MIN_DAILY_GOAL_ML: u32 = 1000;
/// Highest selectable daily goal.
pub const MAX_DAILY_GOAL_ML: u32 = 5000;
/// Goal adjustment granularity.
pub const GOAL_STEP_ML: u32 = 250;
/// Amounts offered by the quick-add buttons, in display order.
pub const QUICK_ADD_AMOUNTS_ML: [u32; 4] = [250, 500, 750, 1000];
/// Number of entries shown in the "recent entries" list.
pub const RECENT_ENTRIES_LIMIT: usize = 3;

/// Opaque identifier of one intake entry.
pub type EntryId = String;

/// Validation errors for intake inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeValidationError {
    /// Entry amount must be greater than zero.
    ZeroAmount,
    /// Entry id must contain at least one non-whitespace character.
    EmptyId,
    /// Goal delta must be a non-zero multiple of `GOAL_STEP_ML`.
    GoalDeltaNotStep(i32),
    /// Quick-add index is outside `QUICK_ADD_AMOUNTS_ML`.
    QuickAmountIndex(usize),
}

impl Display for IntakeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroAmount => write!(f, "intake amount must be greater than 0ml"),
            Self::EmptyId => write!(f, "intake entry id cannot be empty"),
            Self::GoalDeltaNotStep(delta) => write!(
                f,
                "goal delta {delta} must be a non-zero multiple of {GOAL_STEP_ML}ml"
            ),
            Self::QuickAmountIndex(index) => write!(
                f,
                "quick-add index {index} is out of range (0..{})",
                QUICK_ADD_AMOUNTS_ML.len()
            ),
        }
    }
}

impl Error for IntakeValidationError {}

/// One recorded water-intake event.
///
/// Fields are private so an entry cannot change after creation. The
/// serialized shape is `{ "id", "amount", "timestamp" }` with an RFC 3339
/// timestamp; deserialization runs the same validation as [`IntakeEntry::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IntakeEntryWire")]
pub struct IntakeEntry {
    id: EntryId,
    amount: u32,
    timestamp: DateTime<Utc>,
}

#[derive(Deserialize)]
struct IntakeEntryWire {
    id: EntryId,
    amount: u32,
    timestamp: DateTime<Utc>,
}

impl TryFrom<IntakeEntryWire> for IntakeEntry {
    type Error = IntakeValidationError;

    fn try_from(value: IntakeEntryWire) -> Result<Self, Self::Error> {
        Self::new(value.id, value.amount, value.timestamp)
    }
}

impl IntakeEntry {
    /// Creates a validated entry.
    ///
    /// # Errors
    /// - `ZeroAmount` when `amount == 0`.
    /// - `EmptyId` when `id` is blank.
    pub fn new(
        id: impl Into<EntryId>,
        amount: u32,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, IntakeValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(IntakeValidationError::EmptyId);
        }
        if amount == 0 {
            return Err(IntakeValidationError::ZeroAmount);
        }
        Ok(Self {
            id,
            amount,
            timestamp,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Amount in milliliters.
    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Clamps an arbitrary goal value into the supported range.
pub fn clamp_goal(value: i64) -> u32 {
    let clamped = value.clamp(i64::from(MIN_DAILY_GOAL_ML), i64::from(MAX_DAILY_GOAL_ML));
    u32::try_from(clamped).unwrap_or(MAX_DAILY_GOAL_ML)
}

/// Validates that `delta` moves the goal by whole steps.
pub fn validate_goal_delta(delta: i32) -> Result<(), IntakeValidationError> {
    let step = GOAL_STEP_ML as i32;
    if delta == 0 || delta % step != 0 {
        return Err(IntakeValidationError::GoalDeltaNotStep(delta));
    }
    Ok(())
}

/// Returns the quick-add amount at `index`.
pub fn quick_add_amount(index: usize) -> Result<u32, IntakeValidationError> {
    QUICK_ADD_AMOUNTS_ML
        .get(index)
        .copied()
        .ok_or(IntakeValidationError::QuickAmountIndex(index))
}

/// Today's goal, entries and running total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerState {
    daily_goal: u32,
    entries: Vec<IntakeEntry>,
    today_intake: u32,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self {
            daily_goal: DEFAULT_DAILY_GOAL_ML,
            entries: Vec::new(),
            today_intake: 0,
        }
    }
}

impl TrackerState {
    /// Builds a consistent state from a goal and entries.
    ///
    /// The goal is clamped and `today_intake` is derived from `entries`.
    pub fn with_entries(daily_goal: u32, entries: Vec<IntakeEntry>) -> Self {
        let today_intake = sum_amounts(&entries);
        Self {
            daily_goal: clamp_goal(i64::from(daily_goal)),
            entries,
            today_intake,
        }
    }

    /// Builds a state from independently persisted parts.
    ///
    /// The goal is clamped; `today_intake` is kept as given, without checking
    /// it against `entries`.
    pub fn restore(daily_goal: u32, entries: Vec<IntakeEntry>, today_intake: u32) -> Self {
        Self {
            daily_goal: clamp_goal(i64::from(daily_goal)),
            entries,
            today_intake,
        }
    }

    pub fn daily_goal(&self) -> u32 {
        self.daily_goal
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[IntakeEntry] {
        &self.entries
    }

    pub fn today_intake(&self) -> u32 {
        self.today_intake
    }

    pub fn last_entry(&self) -> Option<&IntakeEntry> {
        self.entries.last()
    }

    /// Up to `RECENT_ENTRIES_LIMIT` entries, newest first.
    pub fn recent_entries(&self) -> Vec<&IntakeEntry> {
        self.entries.iter().rev().take(RECENT_ENTRIES_LIMIT).collect()
    }

    /// Appends `entry` and returns the new running total.
    pub fn push_entry(&mut self, entry: IntakeEntry) -> u32 {
        self.today_intake = self.today_intake.saturating_add(entry.amount);
        self.entries.push(entry);
        self.today_intake
    }

    /// Removes the most recent entry, if any.
    ///
    /// The running total is floored at zero.
    pub fn pop_entry(&mut self) -> Option<IntakeEntry> {
        let entry = self.entries.pop()?;
        self.today_intake = self.today_intake.saturating_sub(entry.amount);
        Some(entry)
    }

    /// Moves the goal by `delta` and clamps it. Returns the new goal.
    ///
    /// Callers are expected to run [`validate_goal_delta`] first.
    pub fn apply_goal_delta(&mut self, delta: i32) -> u32 {
        self.daily_goal = clamp_goal(i64::from(self.daily_goal) + i64::from(delta));
        self.daily_goal
    }

    /// `min(today_intake / daily_goal * 100, 100)`.
    pub fn progress_percentage(&self) -> f64 {
        let ratio = f64::from(self.today_intake) / f64::from(self.daily_goal) * 100.0;
        ratio.min(100.0)
    }

    /// `max(0, daily_goal - today_intake)`.
    pub fn remaining_amount(&self) -> u32 {
        self.daily_goal.saturating_sub(self.today_intake)
    }

    pub fn goal_achieved(&self) -> bool {
        self.remaining_amount() == 0
    }
}

/// Sums entry amounts, saturating at `u32::MAX`.
pub fn sum_amounts(entries: &[IntakeEntry]) -> u32 {
    entries
        .iter()
        .fold(0u32, |total, entry| total.saturating_add(entry.amount))
}
