use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::CandidateFile;
use super::GenerationConfig;
use super::ProcessingStatus;
use super::SessionError;

#[async_trait]
pub trait SessionApi {
    /// Used at startup to verify the generation server is reachable before
    /// the wizard begins.
    async fn health_check(&self) -> Result<()>;

    /// Uploads the selected document together with the generation settings
    /// and returns the server-assigned session id.
    async fn submit(
        &self,
        file: &CandidateFile,
        config: &GenerationConfig,
    ) -> Result<String, SessionError>;

    /// Asks the server to start generating questions for an uploaded
    /// session. The response body carries nothing of interest, only the
    /// status code matters.
    async fn trigger_processing(&self, session_id: &str) -> Result<(), SessionError>;

    /// Fetches the processing state for a session. Status values the client
    /// does not recognize are reported as still pending.
    async fn query_status(&self, session_id: &str) -> Result<ProcessingStatus, SessionError>;
}

pub type SharedSessionApi = Arc<dyn SessionApi + Send + Sync>;
