//! Per-iteration outcome

use serde::Serialize;

/// What happened to the operational failure notice of an iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureNotice {
    /// No operational failure
    None,
    Sent,
    /// Identical to the previous notice
    Suppressed,
    /// Delivery of the notice failed
    Failed,
}

/// Summary of one poll iteration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IterationReport {
    pub cursor_before: i64,
    pub cursor_after: i64,
    /// Homeworks in the validated response
    pub homeworks: usize,
    pub sent: usize,
    pub duplicates: usize,
    pub stale: usize,
    /// Homeworks skipped for a bad date, missing field or unknown status
    pub item_errors: usize,
    pub delivery_failures: usize,
    /// Fetch/shape failure that aborted the batch
    pub operational_error: Option<String>,
    pub failure_notice: FailureNotice,
}

impl IterationReport {
    pub fn new(cursor: i64) -> Self {
        Self {
            cursor_before: cursor,
            cursor_after: cursor,
            homeworks: 0,
            sent: 0,
            duplicates: 0,
            stale: 0,
            item_errors: 0,
            delivery_failures: 0,
            operational_error: None,
            failure_notice: FailureNotice::None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.operational_error.is_none()
    }
}
