use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::time;
use tokio_util::sync::CancellationToken;

use super::PollOutcome;
use super::StatusPoller;
use crate::domain::models::CandidateFile;
use crate::domain::models::CompletionSummary;
use crate::domain::models::Destination;
use crate::domain::models::GenerationConfig;
use crate::domain::models::ProcessingStatus;
use crate::domain::models::SessionApi;
use crate::domain::models::SessionError;

struct ScriptedApi {
    responses: Mutex<Vec<Result<ProcessingStatus, SessionError>>>,
    queries: AtomicUsize,
}

impl ScriptedApi {
    fn new(responses: Vec<Result<ProcessingStatus, SessionError>>) -> ScriptedApi {
        return ScriptedApi {
            responses: Mutex::new(responses),
            queries: AtomicUsize::new(0),
        };
    }

    fn queries(&self) -> usize {
        return self.queries.load(Ordering::SeqCst);
    }
}

#[async_trait]
impl SessionApi for ScriptedApi {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn submit(
        &self,
        _file: &CandidateFile,
        _config: &GenerationConfig,
    ) -> Result<String, SessionError> {
        return Ok("session-0".to_string());
    }

    #[allow(clippy::implicit_return)]
    async fn trigger_processing(&self, _session_id: &str) -> Result<(), SessionError> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn query_status(&self, _session_id: &str) -> Result<ProcessingStatus, SessionError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        return self.responses.lock().unwrap().remove(0);
    }
}

#[derive(Default)]
struct StallApi {
    queries: AtomicUsize,
}

#[async_trait]
impl SessionApi for StallApi {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn submit(
        &self,
        _file: &CandidateFile,
        _config: &GenerationConfig,
    ) -> Result<String, SessionError> {
        return Ok("session-0".to_string());
    }

    #[allow(clippy::implicit_return)]
    async fn trigger_processing(&self, _session_id: &str) -> Result<(), SessionError> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn query_status(&self, _session_id: &str) -> Result<ProcessingStatus, SessionError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        time::sleep(Duration::from_secs(3600)).await;
        return Ok(ProcessingStatus::Pending);
    }
}

#[tokio::test(start_paused = true)]
async fn it_polls_until_completion_and_navigates_to_the_quiz() {
    let api = ScriptedApi::new(vec![
        Ok(ProcessingStatus::Pending),
        Ok(ProcessingStatus::Pending),
        Ok(ProcessingStatus::Completed(CompletionSummary {
            questions_count: Some(12),
            processing_time_secs: Some(3.2),
        })),
    ]);
    let poller = StatusPoller::new(Duration::from_millis(2000), CancellationToken::new());

    let started = time::Instant::now();
    let outcome = poller.run(&api, "session-1", || return false).await.unwrap();

    assert_eq!(
        outcome,
        PollOutcome::Navigate(
            Destination::Quiz {
                session_id: "session-1".to_string()
            },
            CompletionSummary {
                questions_count: Some(12),
                processing_time_secs: Some(3.2),
            },
        )
    );
    assert_eq!(api.queries(), 3);
    assert_eq!(started.elapsed(), Duration::from_millis(4000));
}

#[tokio::test(start_paused = true)]
async fn it_navigates_to_review_when_the_flag_is_enabled() {
    let api = ScriptedApi::new(vec![Ok(ProcessingStatus::Completed(
        CompletionSummary::default(),
    ))]);
    let poller = StatusPoller::new(Duration::from_millis(2000), CancellationToken::new());

    let outcome = poller.run(&api, "session-2", || return true).await.unwrap();

    assert_eq!(
        outcome,
        PollOutcome::Navigate(
            Destination::Review {
                session_id: "session-2".to_string()
            },
            CompletionSummary::default(),
        )
    );
}

#[tokio::test(start_paused = true)]
async fn it_reads_the_review_flag_at_completion_time() {
    let api = Arc::new(ScriptedApi::new(vec![
        Ok(ProcessingStatus::Pending),
        Ok(ProcessingStatus::Completed(CompletionSummary::default())),
    ]));
    let review = Arc::new(AtomicBool::new(false));
    let poller = StatusPoller::new(Duration::from_millis(2000), CancellationToken::new());

    let handle = {
        let api = api.clone();
        let review = review.clone();
        tokio::spawn(async move {
            return poller
                .run(api.as_ref(), "session-3", move || {
                    return review.load(Ordering::SeqCst);
                })
                .await;
        })
    };

    time::sleep(Duration::from_millis(1000)).await;
    review.store(true, Ordering::SeqCst);

    let outcome = handle.await.unwrap().unwrap();
    assert_eq!(
        outcome,
        PollOutcome::Navigate(
            Destination::Review {
                session_id: "session-3".to_string()
            },
            CompletionSummary::default(),
        )
    );
}

#[tokio::test(start_paused = true)]
async fn it_stops_on_a_reported_error_without_delay() {
    let api = ScriptedApi::new(vec![Ok(ProcessingStatus::Error(Some("disk full".to_string())))]);
    let poller = StatusPoller::new(Duration::from_millis(2000), CancellationToken::new());

    let started = time::Instant::now();
    let outcome = poller.run(&api, "session-4", || return false).await.unwrap();

    assert_eq!(outcome, PollOutcome::Failed("disk full".to_string()));
    assert_eq!(api.queries(), 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn it_falls_back_to_a_generic_error_message() {
    let api = ScriptedApi::new(vec![Ok(ProcessingStatus::Error(None))]);
    let poller = StatusPoller::new(Duration::from_millis(2000), CancellationToken::new());

    let outcome = poller.run(&api, "session-5", || return false).await.unwrap();

    assert_eq!(
        outcome,
        PollOutcome::Failed("Processing failed. Please try again.".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn it_returns_immediately_when_cancelled_before_the_first_query() {
    let api = ScriptedApi::new(vec![]);
    let cancel = CancellationToken::new();
    cancel.cancel();
    let poller = StatusPoller::new(Duration::from_millis(2000), cancel);

    let outcome = poller.run(&api, "session-6", || return false).await.unwrap();

    assert_eq!(outcome, PollOutcome::Cancelled);
    assert_eq!(api.queries(), 0);
}

#[tokio::test(start_paused = true)]
async fn it_cancels_between_queries() {
    let api = Arc::new(ScriptedApi::new(vec![
        Ok(ProcessingStatus::Pending),
        Ok(ProcessingStatus::Pending),
    ]));
    let cancel = CancellationToken::new();
    let poller = StatusPoller::new(Duration::from_millis(2000), cancel.clone());

    let handle = {
        let api = api.clone();
        tokio::spawn(async move {
            return poller.run(api.as_ref(), "session-7", || return false).await;
        })
    };

    time::sleep(Duration::from_millis(2500)).await;
    cancel.cancel();

    let outcome = handle.await.unwrap().unwrap();
    assert_eq!(outcome, PollOutcome::Cancelled);
    assert_eq!(api.queries(), 2);
}

#[tokio::test(start_paused = true)]
async fn it_cancels_while_a_query_is_in_flight() {
    let api = Arc::new(StallApi::default());
    let cancel = CancellationToken::new();
    let poller = StatusPoller::new(Duration::from_millis(2000), cancel.clone());

    let handle = {
        let api = api.clone();
        tokio::spawn(async move {
            return poller.run(api.as_ref(), "session-8", || return false).await;
        })
    };

    time::sleep(Duration::from_millis(100)).await;
    cancel.cancel();

    let outcome = handle.await.unwrap().unwrap();
    assert_eq!(outcome, PollOutcome::Cancelled);
    assert_eq!(api.queries.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn it_propagates_query_failures() {
    let api = ScriptedApi::new(vec![
        Ok(ProcessingStatus::Pending),
        Err(SessionError::Query("connection refused".to_string())),
    ]);
    let poller = StatusPoller::new(Duration::from_millis(2000), CancellationToken::new());

    let err = poller
        .run(&api, "session-9", || return false)
        .await
        .unwrap_err();

    assert_eq!(err, SessionError::Query("connection refused".to_string()));
    assert_eq!(api.queries(), 2);
}
