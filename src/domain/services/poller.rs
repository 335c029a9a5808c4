#[cfg(test)]
#[path = "poller_test.rs"]
mod tests;

use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::domain::models::CompletionSummary;
use crate::domain::models::Destination;
use crate::domain::models::ProcessingStatus;
use crate::domain::models::SessionApi;
use crate::domain::models::SessionError;

#[derive(Debug)]
enum PollState {
    Idle,
    Polling,
    Done,
}

/// How a polling run ended. Query failures are not an outcome, they surface
/// as errors from [`StatusPoller::run`].
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Navigate(Destination, CompletionSummary),
    Failed(String),
    Cancelled,
}

/// Polls a session's status on a fixed interval until it completes, fails,
/// or gets cancelled. A poller is single use, `run()` consumes it.
pub struct StatusPoller {
    interval: Duration,
    cancel: CancellationToken,
    state: PollState,
}

impl StatusPoller {
    pub fn new(interval: Duration, cancel: CancellationToken) -> StatusPoller {
        return StatusPoller {
            interval,
            cancel,
            state: PollState::Idle,
        };
    }

    /// Queries immediately, then sleeps between queries. Cancellation is
    /// honored while waiting on a query and while sleeping, and a cancelled
    /// run never issues another request. The review flag is read through
    /// `review_enabled` only once completion is observed.
    pub async fn run<A, F>(
        mut self,
        api: &A,
        session_id: &str,
        review_enabled: F,
    ) -> Result<PollOutcome, SessionError>
    where
        A: SessionApi + ?Sized,
        F: Fn() -> bool,
    {
        self.state = PollState::Polling;
        tracing::info!(session_id, state = ?self.state, interval_ms = self.interval.as_millis() as u64, "watching session");

        loop {
            // Cancellation wins over a ready query or an elapsed sleep.
            let status = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    self.state = PollState::Done;
                    tracing::info!(session_id, "polling cancelled");
                    return Ok(PollOutcome::Cancelled);
                }
                res = api.query_status(session_id) => {
                    match res {
                        Ok(status) => status,
                        Err(err) => {
                            self.state = PollState::Done;
                            return Err(err);
                        }
                    }
                }
            };

            match status {
                ProcessingStatus::Completed(summary) => {
                    self.state = PollState::Done;
                    let destination = Destination::for_completion(session_id, review_enabled());
                    tracing::info!(session_id, destination = %destination.path(), "processing completed");
                    return Ok(PollOutcome::Navigate(destination, summary));
                }
                ProcessingStatus::Error(reason) => {
                    self.state = PollState::Done;
                    let reason = reason
                        .unwrap_or_else(|| return "Processing failed. Please try again.".to_string());
                    tracing::warn!(session_id, reason = %reason, "processing failed");
                    return Ok(PollOutcome::Failed(reason));
                }
                ProcessingStatus::Pending => {
                    tokio::select! {
                        biased;
                        _ = self.cancel.cancelled() => {
                            self.state = PollState::Done;
                            tracing::info!(session_id, "polling cancelled");
                            return Ok(PollOutcome::Cancelled);
                        }
                        _ = time::sleep(self.interval) => {}
                    }
                }
            }
        }
    }
}
