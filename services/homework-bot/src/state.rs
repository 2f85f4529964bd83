//! In-memory poll state owned by the engine

use std::collections::BTreeSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// Everything the poll loop remembers between cycles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollState {
    /// Lower bound (unix seconds) of the next fetch window
    pub cursor: i64,
    /// Status code of the last successfully notified record, empty until then
    pub last_status: String,
    /// Failure texts relayed to the chat since the last clean cycle
    pub relayed_errors: BTreeSet<String>,
}

impl PollState {
    pub fn new(cursor: i64) -> Self {
        Self {
            cursor,
            ..Self::default()
        }
    }

    /// Start polling from the current time
    pub fn starting_now() -> Self {
        Self::new(current_epoch_secs())
    }

    /// Whether `status` differs from the last notified one
    pub fn is_new_status(&self, status: &str) -> bool {
        self.last_status != status
    }

    pub fn record_status(&mut self, status: &str) {
        self.last_status = status.to_string();
    }

    /// Move the cursor forward; an older value would re-open a window
    /// that was already processed and is ignored
    pub fn advance_cursor(&mut self, cursor: i64) {
        if cursor < self.cursor {
            tracing::warn!(
                "Ignoring cursor {} behind current cursor {}",
                cursor,
                self.cursor
            );
            return;
        }
        self.cursor = cursor;
    }

    /// Whether `message` was already relayed since the last clean cycle
    pub fn is_repeated_error(&self, message: &str) -> bool {
        self.relayed_errors.contains(message)
    }

    pub fn record_relayed_error(&mut self, message: String) {
        self.relayed_errors.insert(message);
    }

    /// Forget relayed failures after a cycle without any
    pub fn clear_errors(&mut self) {
        self.relayed_errors.clear();
    }
}

fn current_epoch_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
