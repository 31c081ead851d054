pub mod speechmatics;

pub use speechmatics::SpeechmaticsProvider;

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Accuracy, TranscribeOptions};

/// Remote job configuration sent with a submission.
#[derive(Debug, Clone, Serialize)]
pub struct JobConfig {
    pub language: String,
    pub operating_point: String,
    /// `Some("speaker")` when diarization is requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diarization: Option<String>,
}

impl JobConfig {
    pub fn from_options(options: &TranscribeOptions) -> Self {
        let operating_point = match options.accuracy {
            Accuracy::Enhanced => "enhanced",
            Accuracy::Standard => "standard",
        };
        Self {
            language: options.language.clone(),
            operating_point: operating_point.to_string(),
            diarization: options.diarize.then(|| "speaker".to_string()),
        }
    }
}

/// Handle for a submitted remote job.
#[derive(Debug, Clone)]
pub struct JobHandle {
    pub id: String,
}

/// Terminal output of a successfully completed remote job.
#[derive(Debug, Clone, Default)]
pub struct JobOutput {
    /// Flat transcript text.
    pub transcript: String,
    /// Word-level results, in recognition order. May be empty.
    pub items: Vec<RecognitionItem>,
}

/// One item from the provider's word-level results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alternative {
    pub content: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Summary row from the provider's job listing.
#[derive(Debug, Clone)]
pub struct JobSummary {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub duration_seconds: Option<f64>,
}

/// Failures at the provider wire level. The client layer classifies these
/// into the user-facing `TranscribeError` taxonomy.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("provider returned status {code}: {body}")]
    Status { code: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("failed to decode provider response: {0}")]
    Decode(String),
    #[error("remote job did not reach a terminal state in time: {0}")]
    Timeout(String),
    #[error("remote job failed: {0}")]
    JobFailed(String),
}

/// Port for the remote batch transcription provider.
///
/// Submission and completion are separate suspension points; the adapter
/// must never wait unboundedly in `await_completion`.
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    /// Uploads one media file and creates a remote job.
    async fn submit(&self, path: &Path, config: &JobConfig) -> Result<JobHandle, ProviderError>;

    /// Waits until the job reaches a terminal state and returns its output.
    async fn await_completion(&self, job: &JobHandle) -> Result<JobOutput, ProviderError>;

    /// Lists jobs known to the provider account, newest first or not —
    /// callers must not rely on ordering.
    async fn list_jobs(&self) -> Result<Vec<JobSummary>, ProviderError>;
}
