//! Read-only projection of tracker state for rendering layers.

use crate::model::intake::{IntakeEntry, TrackerState};
use serde::Serialize;

/// Everything a single-screen view needs, computed in one read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerSnapshot {
    pub daily_goal: u32,
    pub today_intake: u32,
    pub remaining_amount: u32,
    /// Always within `[0, 100]`.
    pub progress_percentage: f64,
    /// `progress_percentage` rounded for "N% complete" labels.
    pub progress_percent_rounded: u32,
    pub entry_count: usize,
    pub goal_achieved: bool,
    pub last_entry: Option<IntakeEntry>,
    /// Newest first.
    pub recent_entries: Vec<IntakeEntry>,
}

impl TrackerSnapshot {
    pub fn from_state(state: &TrackerState) -> Self {
        let progress_percentage = state.progress_percentage();
        Self {
            daily_goal: state.daily_goal(),
            today_intake: state.today_intake(),
            remaining_amount: state.remaining_amount(),
            progress_percentage,
            progress_percent_rounded: progress_percentage.round() as u32,
            entry_count: state.entries().len(),
            goal_achieved: state.goal_achieved(),
            last_entry: state.last_entry().cloned(),
            recent_entries: state.recent_entries().into_iter().cloned().collect(),
        }
    }
}
