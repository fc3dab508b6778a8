//! Shared display state written by the poller and read by the page server

use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::RwLock;

use crate::model::{HealthStatus, Message, MessagePane, StatsSnapshot};

/// Everything the page shows that is the same for every visitor.
///
/// Form values and submission notices belong to a single request and are
/// never stored here. Each field is owned by one operation and overwritten wholesale when that
/// operation completes; concurrent writers simply race (last write wins).
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    pub clock: Option<DateTime<Local>>,
    pub health: HealthStatus,
    pub stats: Option<StatsSnapshot>,
    pub messages: MessagePane,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick_clock(&mut self, now: DateTime<Local>) {
        self.clock = Some(now);
    }

    pub fn update_stats(&mut self, total_messages: i64) {
        self.stats = Some(StatsSnapshot { total_messages });
    }

    /// Replace the rendered list with a fresh fetch
    pub fn replace_messages(&mut self, messages: Vec<Message>) {
        self.messages = MessagePane::from(messages);
    }

    pub fn fail_messages(&mut self) {
        self.messages = MessagePane::Failed;
    }
}

/// Thread-safe shared state handle
pub type StateHandle = Arc<RwLock<DisplayState>>;

pub fn new_state_handle() -> StateHandle {
    Arc::new(RwLock::new(DisplayState::new()))
}
