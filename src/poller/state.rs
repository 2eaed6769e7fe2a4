//! Poll loop memory
//!
//! Lives only for the lifetime of the process and is mutated only by the
//! iteration function.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PollState {
    /// Lower bound (unix seconds) of homework updates still considered new
    cursor: i64,
    /// Last status-change message that was delivered
    last_notification: Option<String>,
    /// Last failure notice that was delivered
    last_failure_notice: Option<String>,
}

impl PollState {
    pub fn new(cursor: i64) -> Self {
        Self {
            cursor,
            last_notification: None,
            last_failure_notice: None,
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn last_notification(&self) -> Option<&str> {
        self.last_notification.as_deref()
    }

    pub fn last_failure_notice(&self) -> Option<&str> {
        self.last_failure_notice.as_deref()
    }

    /// Move the cursor forward; never backwards. Returns whether it moved.
    pub fn advance_cursor(&mut self, to: i64) -> bool {
        if to > self.cursor {
            self.cursor = to;
            true
        } else {
            false
        }
    }

    /// Same text as the previous delivered status change
    pub fn is_duplicate(&self, message: &str) -> bool {
        self.last_notification.as_deref() == Some(message)
    }

    pub fn record_notification(&mut self, message: String) {
        self.last_notification = Some(message);
    }

    /// Same text as the previous delivered failure notice
    pub fn is_repeated_failure(&self, notice: &str) -> bool {
        self.last_failure_notice.as_deref() == Some(notice)
    }

    pub fn record_failure_notice(&mut self, notice: String) {
        self.last_failure_notice = Some(notice);
    }
}
