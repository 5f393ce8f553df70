//! Notification events emitted after intake mutations.
//!
//! # Responsibility
//! - Describe add/remove outcomes as typed events.
//! - Render the short user-facing message for each event.
//! - Deliver events to a pluggable notification channel.

use log::info;
use std::cell::RefCell;
use std::rc::Rc;

/// Outcome of an intake mutation that the user should hear about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeEvent {
    Added { amount: u32 },
    Removed { amount: u32 },
}

impl IntakeEvent {
    /// Amount carried by the event, in milliliters.
    pub fn amount(self) -> u32 {
        match self {
            Self::Added { amount } | Self::Removed { amount } => amount,
        }
    }

    /// Human-readable toast text.
    pub fn message(self) -> String {
        match self {
            Self::Added { amount } => format!("Added {amount}ml to your daily intake!"),
            Self::Removed { amount } => format!("Removed {amount}ml from your intake"),
        }
    }

    fn kind(self) -> &'static str {
        match self {
            Self::Added { .. } => "added",
            Self::Removed { .. } => "removed",
        }
    }
}

/// Receiver for intake events.
pub trait IntakeNotifier {
    fn notify(&self, event: &IntakeEvent);
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl IntakeNotifier for NoopNotifier {
    fn notify(&self, _event: &IntakeEvent) {}
}

/// Writes each event as a metadata-only log line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl IntakeNotifier for LogNotifier {
    fn notify(&self, event: &IntakeEvent) {
        info!(
            "event=intake_notify module=notify status=ok kind={} amount_ml={}",
            event.kind(),
            event.amount()
        );
    }
}

/// Buffers events for later draining.
///
/// Clones share one buffer, so a caller can keep a handle while the store
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct CollectingNotifier {
    events: Rc<RefCell<Vec<IntakeEvent>>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns buffered events without clearing them.
    pub fn events(&self) -> Vec<IntakeEvent> {
        self.events.borrow().clone()
    }

    /// Removes and returns buffered events in emission order.
    pub fn drain(&self) -> Vec<IntakeEvent> {
        self.events.borrow_mut().drain(..).collect()
    }
}

impl IntakeNotifier for CollectingNotifier {
    fn notify(&self, event: &IntakeEvent) {
        self.events.borrow_mut().push(*event);
    }
}
