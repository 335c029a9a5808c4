#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::poller::PollOutcome;
use super::poller::StatusPoller;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::CandidateFile;
use crate::domain::models::Event;
use crate::domain::models::GenerationConfig;
use crate::domain::models::SessionError;
use crate::domain::models::SharedSessionApi;

pub fn help_text() -> String {
    let text = r#"
HOTKEYS:
- Enter - Validate the entered document path, or start generation from the configure step.
- Tab / Shift+Tab - Move between the configure fields.
- Space - Cycle the focused quality level, or toggle review mode.
- Left/Right arrows - Cycle the quality level when it has focus.
- CTRL+N - Continue to the configure step once a document is selected.
- CTRL+B - Go back to the upload step.
- CTRL+X - Clear the selected document.
- CTRL+C - Cancel generation if in progress, otherwise exit.
        "#;

    return text.trim().to_string();
}

fn workflow_failed(err: SessionError, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    tracing::error!(error = %err, "workflow stopped");
    tx.send(Event::WorkflowFailed(err.to_string()))?;

    return Ok(());
}

/// Drives one submission end to end: upload, trigger, then poll until the
/// server settles. Every await along the way gives cancellation a chance to
/// win, and a failure at any stage ends the run with no retry.
async fn run_workflow(
    api: SharedSessionApi,
    file: CandidateFile,
    config: GenerationConfig,
    interval: Duration,
    cancel: CancellationToken,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    tx.send(Event::WorkflowProgress("Uploading document...".to_string()))?;

    let submitted = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tx.send(Event::WorkflowCancelled())?;
            return Ok(());
        }
        res = api.submit(&file, &config) => res,
    };

    let session_id = match submitted {
        Ok(session_id) => session_id,
        Err(err) => return workflow_failed(err, tx),
    };

    tx.send(Event::SessionCreated(session_id.clone()))?;
    tx.send(Event::WorkflowProgress("Processing document...".to_string()))?;

    let triggered = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tx.send(Event::WorkflowCancelled())?;
            return Ok(());
        }
        res = api.trigger_processing(&session_id) => res,
    };

    if let Err(err) = triggered {
        return workflow_failed(err, tx);
    }

    let poller = StatusPoller::new(interval, cancel);
    let outcome = poller
        .run(api.as_ref(), &session_id, || {
            return Config::get(ConfigKey::EnableReview) == "true";
        })
        .await;

    match outcome {
        Ok(PollOutcome::Navigate(destination, summary)) => {
            tx.send(Event::WorkflowComplete(destination, summary))?;
        }
        Ok(PollOutcome::Failed(reason)) => {
            tx.send(Event::WorkflowFailed(reason))?;
        }
        Ok(PollOutcome::Cancelled) => {
            tx.send(Event::WorkflowCancelled())?;
        }
        Err(err) => {
            return workflow_failed(err, tx);
        }
    }

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        api: SharedSessionApi,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let mut cancel = CancellationToken::new();

        loop {
            let event = rx.recv().await;
            if event.is_none() {
                continue;
            }

            match event.unwrap() {
                Action::CancelWorkflow() => {
                    cancel.cancel();
                }
                Action::SubmitWorkflow(file, config) => {
                    let interval = match Config::get(ConfigKey::PollInterval).parse::<u64>() {
                        Ok(millis) => Duration::from_millis(millis),
                        Err(_) => {
                            tx.send(Event::WorkflowFailed(
                                "poll-interval must be a number of milliseconds".to_string(),
                            ))?;
                            continue;
                        }
                    };

                    // Each submission gets a fresh token so cancelling an
                    // earlier run cannot bleed into this one.
                    cancel = CancellationToken::new();
                    let worker_api = api.clone();
                    let worker_tx = tx.clone();
                    let worker_cancel = cancel.clone();
                    tokio::spawn(async move {
                        let res = run_workflow(
                            worker_api,
                            file,
                            config,
                            interval,
                            worker_cancel,
                            &worker_tx,
                        )
                        .await;

                        if let Err(err) = res {
                            tracing::error!(error = ?err, "workflow worker failed");
                        }
                    });
                }
            }
        }
    }
}
