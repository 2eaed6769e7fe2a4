//! Fetch → validate → evaluate → notify → sleep
//!
//! - Fetch and shape failures abort the iteration: the cursor stays put and a
//!   failure notice is sent unless it repeats the previous one
//! - A broken homework (bad date, missing field, unknown status) is skipped,
//!   its siblings are still processed
//! - A status change is sent only when its text differs from the last one delivered

use super::report::{FailureNotice, IterationReport};
use super::state::PollState;
use crate::error::PollError;
use crate::homework::{
    check_response, current_date, failure_message, homework_timestamp, parse_status, StatusSource,
};
use crate::notification::NotificationChannel;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

pub struct PollLoop<S, C> {
    source: S,
    channel: C,
    state: PollState,
    retry_period: Duration,
}

impl<S, C> PollLoop<S, C>
where
    S: StatusSource,
    C: NotificationChannel,
{
    /// Start watching from the current time
    pub fn new(source: S, channel: C, retry_period: Duration) -> Self {
        Self::with_cursor(source, channel, chrono::Utc::now().timestamp(), retry_period)
    }

    pub fn with_cursor(source: S, channel: C, cursor: i64, retry_period: Duration) -> Self {
        Self {
            source,
            channel,
            state: PollState::new(cursor),
            retry_period,
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Poll forever, sleeping `retry_period` after every iteration
    pub async fn run(&mut self) {
        info!(
            cursor = self.state.cursor(),
            interval_secs = self.retry_period.as_secs(),
            channel = self.channel.name(),
            "Homework status poller started"
        );

        loop {
            let report = self.run_once().await;
            debug!(?report, "Iteration finished");
            sleep(self.retry_period).await;
        }
    }

    /// Run a single iteration
    pub async fn run_once(&mut self) -> IterationReport {
        let mut report = IterationReport::new(self.state.cursor());
        info!(cursor = self.state.cursor(), "Requesting homework statuses");

        if let Err(e) = self.poll(&mut report).await {
            self.report_failure(&e, &mut report).await;
        }

        report.cursor_after = self.state.cursor();
        report
    }

    async fn poll(&mut self, report: &mut IterationReport) -> Result<(), PollError> {
        let since = self.state.cursor();
        let response = self.source.fetch(since).await?;
        let homeworks = check_response(&response)?;

        report.homeworks = homeworks.len();
        if homeworks.is_empty() {
            debug!("No new statuses in response");
        }

        for homework in homeworks {
            self.evaluate(homework, since, report).await;
        }

        match current_date(&response) {
            Some(date) => {
                if self.state.advance_cursor(date) {
                    debug!(cursor = date, "Cursor advanced");
                }
            }
            None => {
                if let Some(value) = response.get("current_date") {
                    warn!(current_date = %value, "Ignoring non-integer current_date");
                }
            }
        }

        Ok(())
    }

    async fn evaluate(&mut self, homework: &Value, since: i64, report: &mut IterationReport) {
        let name = homework
            .get("homework_name")
            .and_then(Value::as_str)
            .unwrap_or("<unnamed>");

        let updated = match homework_timestamp(homework) {
            Ok(ts) => ts,
            Err(e) => {
                warn!(homework = name, error = %e, "Skipping homework");
                report.item_errors += 1;
                return;
            }
        };

        if updated < since {
            debug!(homework = name, updated, since, "Stale homework, skipping");
            report.stale += 1;
            return;
        }

        let message = match parse_status(homework) {
            Ok(message) => message,
            Err(e) => {
                warn!(homework = name, error = %e, "Skipping homework");
                report.item_errors += 1;
                return;
            }
        };

        if self.state.is_duplicate(&message) {
            debug!(homework = name, "Same as last sent message, skipping");
            report.duplicates += 1;
            return;
        }

        match self.channel.send(&message).await {
            Ok(()) => {
                info!(homework = name, message = %message, "Status change sent");
                self.state.record_notification(message);
                report.sent += 1;
            }
            Err(e) => {
                // last_notification untouched, the change is retried next poll
                error!(homework = name, error = %e, "Failed to send status change");
                report.delivery_failures += 1;
            }
        }
    }

    async fn report_failure(&mut self, err: &PollError, report: &mut IterationReport) {
        let description = err.to_string();
        error!(error = %description, "Program failure");
        report.operational_error = Some(description.clone());

        let notice = failure_message(&description);
        if self.state.is_repeated_failure(&notice) {
            debug!("Failure notice already sent, not repeating");
            report.failure_notice = FailureNotice::Suppressed;
            return;
        }

        match self.channel.send(&notice).await {
            Ok(()) => {
                self.state.record_failure_notice(notice);
                report.failure_notice = FailureNotice::Sent;
            }
            Err(e) => {
                error!(error = %e, "Failed to send failure notice");
                report.failure_notice = FailureNotice::Failed;
            }
        }
    }
}
