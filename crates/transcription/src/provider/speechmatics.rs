use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::multipart;
use serde::Deserialize;
use tokio::time::Instant;

use super::{
    JobConfig, JobHandle, JobOutput, JobSummary, ProviderError, RecognitionItem,
    TranscriptionProvider,
};
use crate::config::ProviderConfig;

/// Speechmatics Batch API adapter.
///
/// One pooled `reqwest::Client` is shared across calls; connections are
/// released by RAII on every exit path.
pub struct SpeechmaticsProvider {
    client: reqwest::Client,
    config: ProviderConfig,
}

#[derive(Deserialize)]
struct CreateJobResponse {
    id: String,
}

#[derive(Deserialize)]
struct JobStatusResponse {
    job: JobDetails,
}

#[derive(Deserialize)]
struct JobDetails {
    status: String,
    #[serde(default)]
    errors: Option<Vec<JobErrorDetail>>,
}

#[derive(Deserialize)]
struct JobErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct TranscriptResponse {
    #[serde(default)]
    results: Vec<RecognitionItem>,
}

#[derive(Deserialize)]
struct ListJobsResponse {
    #[serde(default)]
    jobs: Vec<JobRow>,
}

#[derive(Deserialize)]
struct JobRow {
    id: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    duration: Option<f64>,
}

impl SpeechmaticsProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ProviderError::Status {
            code: status.as_u16(),
            body,
        })
    }

    async fn job_status(&self, job_id: &str) -> Result<JobDetails, ProviderError> {
        let response = self
            .client
            .get(self.url(&format!("jobs/{job_id}")))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let parsed: JobStatusResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;
        Ok(parsed.job)
    }

    async fn fetch_transcript(&self, job_id: &str) -> Result<JobOutput, ProviderError> {
        let response = self
            .client
            .get(self.url(&format!("jobs/{job_id}/transcript")))
            .query(&[("format", "json-v2")])
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let parsed: TranscriptResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        Ok(JobOutput {
            transcript: assemble_transcript(&parsed.results),
            items: parsed.results,
        })
    }
}

#[async_trait]
impl TranscriptionProvider for SpeechmaticsProvider {
    async fn submit(&self, path: &Path, config: &JobConfig) -> Result<JobHandle, ProviderError> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| ProviderError::Transport(format!("read {}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("media")
            .to_string();

        let job_request = serde_json::json!({
            "type": "transcription",
            "transcription_config": config,
        });
        let form = multipart::Form::new()
            .part("data_file", multipart::Part::bytes(data).file_name(file_name))
            .text("config", job_request.to_string());

        tracing::debug!(path = %path.display(), "Submitting transcription job");

        let response = self
            .client
            .post(self.url("jobs"))
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let created: CreateJobResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        tracing::debug!(job_id = %created.id, "Job accepted");
        Ok(JobHandle { id: created.id })
    }

    async fn await_completion(&self, job: &JobHandle) -> Result<JobOutput, ProviderError> {
        let deadline = Instant::now() + self.config.job_timeout;

        loop {
            let details = self.job_status(&job.id).await?;
            match details.status.as_str() {
                "done" => {
                    let output = self.fetch_transcript(&job.id).await?;
                    tracing::info!(
                        job_id = %job.id,
                        chars = output.transcript.len(),
                        "Transcription job completed"
                    );
                    return Ok(output);
                }
                "rejected" | "deleted" | "expired" => {
                    let detail = details
                        .errors
                        .unwrap_or_default()
                        .into_iter()
                        .filter_map(|e| e.message)
                        .collect::<Vec<_>>()
                        .join("; ");
                    let detail = if detail.is_empty() {
                        format!("job {} was {}", job.id, details.status)
                    } else {
                        detail
                    };
                    return Err(ProviderError::JobFailed(detail));
                }
                _ => {
                    if Instant::now() + self.config.poll_interval > deadline {
                        return Err(ProviderError::Timeout(format!(
                            "job {} still {} after {:?}",
                            job.id, details.status, self.config.job_timeout
                        )));
                    }
                    tokio::time::sleep(self.config.poll_interval).await;
                }
            }
        }
    }

    async fn list_jobs(&self) -> Result<Vec<JobSummary>, ProviderError> {
        let response = self
            .client
            .get(self.url("jobs"))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let parsed: ListJobsResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        Ok(parsed
            .jobs
            .into_iter()
            .map(|row| JobSummary {
                id: row.id,
                created_at: row.created_at,
                duration_seconds: row.duration,
            })
            .collect())
    }
}

/// Joins word-level items into flat text. Words are space-separated;
/// punctuation attaches to the preceding token.
fn assemble_transcript(items: &[RecognitionItem]) -> String {
    let mut text = String::new();
    for item in items {
        let Some(alt) = item.alternatives.first() else {
            continue;
        };
        if alt.content.is_empty() {
            continue;
        }
        if item.item_type != "punctuation" && !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&alt.content);
    }
    text
}
