#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::multipart::Part;
use serde::Deserialize;
use serde::Serialize;
use tokio::fs;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::CandidateFile;
use crate::domain::models::CompletionSummary;
use crate::domain::models::GenerationConfig;
use crate::domain::models::ProcessingStatus;
use crate::domain::models::SessionApi;
use crate::domain::models::SessionError;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    success: bool,
    session_id: Option<String>,
    filename: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StatusResponse {
    #[serde(default)]
    status: String,
    error: Option<String>,
    questions_count: Option<u32>,
    processing_time: Option<f64>,
}

/// Talks to the generation server over its JSON endpoints. Error bodies are
/// parsed regardless of the HTTP status code, the server reports rejections
/// as JSON with `success: false`.
pub struct HttpSessionClient {
    url: String,
    timeout: String,
}

impl Default for HttpSessionClient {
    fn default() -> HttpSessionClient {
        return HttpSessionClient {
            url: Config::get(ConfigKey::ServerUrl),
            timeout: Config::get(ConfigKey::HealthCheckTimeout),
        };
    }
}

#[async_trait]
impl SessionApi for HttpSessionClient {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "the generation server is not running");
            bail!("The generation server is not running");
        }

        let res = res.unwrap();
        if res.status() != 200 {
            tracing::error!(status = res.status().as_u16(), "generation server health check failed");
            bail!("The generation server health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn submit(
        &self,
        file: &CandidateFile,
        config: &GenerationConfig,
    ) -> Result<String, SessionError> {
        let bytes = match fs::read(&file.path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::error!(error = ?err, path = %file.path.display(), "failed to read the selected document");
                return Err(SessionError::Submit(format!(
                    "{name} could not be read",
                    name = file.name
                )));
            }
        };

        let mut part = Part::bytes(bytes).file_name(file.name.clone());
        if !file.media_type.is_empty() {
            part = part
                .mime_str(&file.media_type)
                .map_err(|err| return SessionError::Submit(err.to_string()))?;
        }

        let form = Form::new()
            .part("file", part)
            .text("apiKey", config.api_key.clone())
            .text("qualityLevel", config.quality.to_string())
            .text("enableReview", config.review_enabled.to_string());

        let res = match reqwest::Client::new()
            .post(format!("{url}/upload", url = self.url))
            .multipart(form)
            .send()
            .await
        {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "upload request failed");
                return Err(SessionError::Submit(
                    "the server could not be reached".to_string(),
                ));
            }
        };

        let body = match res.json::<UploadResponse>().await {
            Ok(body) => body,
            Err(err) => {
                tracing::error!(error = ?err, "upload response failed to parse");
                return Err(SessionError::Submit(
                    "the server returned an unreadable response".to_string(),
                ));
            }
        };

        tracing::debug!(body = ?body, "upload response");

        if !body.success {
            let reason = body
                .error
                .unwrap_or_else(|| return "the server rejected the upload".to_string());
            return Err(SessionError::Submit(reason));
        }

        match body.session_id {
            Some(session_id) => return Ok(session_id),
            None => {
                return Err(SessionError::Submit(
                    "the server did not provide a session id".to_string(),
                ));
            }
        }
    }

    #[allow(clippy::implicit_return)]
    async fn trigger_processing(&self, session_id: &str) -> Result<(), SessionError> {
        let res = match reqwest::Client::new()
            .get(format!("{url}/process/{session_id}", url = self.url))
            .send()
            .await
        {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "processing request failed");
                return Err(SessionError::Trigger(
                    "the server could not be reached".to_string(),
                ));
            }
        };

        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "processing request rejected");
            return Err(SessionError::Trigger(format!(
                "the server returned status {status}",
                status = res.status().as_u16()
            )));
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn query_status(&self, session_id: &str) -> Result<ProcessingStatus, SessionError> {
        let res = match reqwest::Client::new()
            .get(format!("{url}/status/{session_id}", url = self.url))
            .send()
            .await
        {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "status request failed");
                return Err(SessionError::Query(
                    "the server could not be reached".to_string(),
                ));
            }
        };

        let body = match res.json::<StatusResponse>().await {
            Ok(body) => body,
            Err(err) => {
                tracing::error!(error = ?err, "status response failed to parse");
                return Err(SessionError::Query(
                    "the server returned an unreadable response".to_string(),
                ));
            }
        };

        tracing::debug!(body = ?body, "status response");

        match body.status.as_str() {
            "completed" => {
                return Ok(ProcessingStatus::Completed(CompletionSummary {
                    questions_count: body.questions_count,
                    processing_time_secs: body.processing_time,
                }));
            }
            "error" => return Ok(ProcessingStatus::Error(body.error)),
            _ => return Ok(ProcessingStatus::Pending),
        }
    }
}
