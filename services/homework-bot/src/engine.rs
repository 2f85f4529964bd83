//! Engine: the fetch, validate, translate, notify loop

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::notifier::Notifier;
use crate::practicum::PracticumClient;
use crate::response::{check_response, current_date};
use crate::state::PollState;
use crate::verdict::HomeworkRecord;
use crate::BotError;

/// Prefix of the chat message sent when a cycle fails
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Outcome of a single poll cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Records in the validated response
    pub records: usize,
    /// Status notifications delivered
    pub notified: usize,
    /// Status notifications the notifier failed to deliver
    pub undelivered: usize,
    /// Fetch, validation and translation failures
    pub errors: Vec<String>,
}

impl CycleReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.undelivered == 0
    }
}

/// The engine polls the status API and dispatches notifications
#[derive(Debug)]
pub struct Engine {
    client: PracticumClient,
    notifier: Arc<dyn Notifier>,
    state: PollState,
    retry_period: Duration,
    relay_errors: bool,
}

impl Engine {
    pub fn new(
        client: PracticumClient,
        notifier: Arc<dyn Notifier>,
        config: &Config,
        state: PollState,
    ) -> Self {
        Self {
            client,
            notifier,
            state,
            retry_period: config.polling.retry_period,
            relay_errors: config.polling.relay_errors,
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Poll until the cancellation token is triggered.
    ///
    /// The sleep after each cycle runs whether or not the cycle failed.
    pub async fn run(&mut self, cancel: CancellationToken) {
        tracing::info!(
            "Polling every {:?} starting from {}",
            self.retry_period,
            self.state.cursor
        );

        loop {
            let report = tokio::select! {
                report = self.run_cycle() => report,
                _ = cancel.cancelled() => {
                    tracing::debug!("Poll loop cancelled during cycle");
                    break;
                }
            };

            tracing::debug!(
                "Cycle done: records={}, notified={}, undelivered={}, errors={}, cursor={}",
                report.records,
                report.notified,
                report.undelivered,
                report.errors.len(),
                self.state.cursor
            );

            tokio::select! {
                _ = tokio::time::sleep(self.retry_period) => {}
                _ = cancel.cancelled() => {
                    tracing::debug!("Poll loop cancelled");
                    break;
                }
            }
        }
    }

    /// Run one fetch, validate, translate and notify pass.
    ///
    /// Never fails: every error is logged, optionally relayed to the chat, and
    /// listed in the returned report.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let mut report = CycleReport::default();

        let payload = match self.client.fetch(self.state.cursor).await {
            Ok(payload) => payload,
            Err(e) => {
                self.handle_failure(e, &mut report).await;
                return report;
            }
        };

        let records = match check_response(&payload) {
            Ok(records) => records,
            Err(e) => {
                self.handle_failure(e, &mut report).await;
                return report;
            }
        };

        report.records = records.len();
        if records.is_empty() {
            tracing::debug!("No new statuses in response");
        }

        for record in records {
            match HomeworkRecord::from_value(record) {
                Ok(record) => self.process_record(&record, &mut report).await,
                Err(e) => self.handle_failure(e, &mut report).await,
            }
        }

        // An undelivered status has to be fetched again next cycle
        if report.undelivered == 0 {
            if let Some(cursor) = current_date(&payload) {
                self.state.advance_cursor(cursor);
            }
        }

        if report.errors.is_empty() {
            self.state.clear_errors();
        }

        report
    }

    async fn process_record(&mut self, record: &HomeworkRecord, report: &mut CycleReport) {
        let status = record.status.code();
        if !self.state.is_new_status(status) {
            tracing::debug!(
                "Status of '{}' unchanged ({}), not notifying",
                record.homework_name,
                status
            );
            return;
        }

        let message = record.message();
        match self.notifier.notify(&message).await {
            Ok(()) => {
                tracing::info!(
                    "Sent notification via {}: {}",
                    self.notifier.type_name(),
                    message
                );
                self.state.record_status(status);
                report.notified += 1;
            }
            Err(e) => {
                tracing::error!("Failed to send notification: {}", e);
                report.undelivered += 1;
            }
        }
    }

    async fn handle_failure(&mut self, error: BotError, report: &mut CycleReport) {
        let message = format!("{}: {}", FAILURE_PREFIX, error);
        tracing::error!("{}", message);
        report.errors.push(error.to_string());

        if !self.relay_errors {
            return;
        }
        if self.state.is_repeated_error(&message) {
            tracing::debug!("Failure already relayed to chat, not repeating");
            return;
        }

        // Relay problems are only logged, they never become cycle failures
        match self.notifier.notify(&message).await {
            Ok(()) => self.state.record_relayed_error(message),
            Err(e) => tracing::error!("Failed to relay failure to chat: {}", e),
        }
    }
}
