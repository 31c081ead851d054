use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::TranscribeOptions;
use crate::error::TranscribeError;
use crate::provider::{JobConfig, ProviderError, RecognitionItem, TranscriptionProvider};
use crate::{TranscriptionOutcome, Word};

/// Drives one file through the remote provider and captures the result as
/// an outcome. Failures are data here: this never returns `Err`, so a batch
/// item cannot take down its siblings.
pub struct TranscriptionClient {
    provider: Arc<dyn TranscriptionProvider>,
}

impl TranscriptionClient {
    pub fn new(provider: Arc<dyn TranscriptionProvider>) -> Self {
        Self { provider }
    }

    pub async fn transcribe(
        &self,
        path: &Path,
        options: &TranscribeOptions,
        duration_seconds: f64,
    ) -> TranscriptionOutcome {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return TranscriptionOutcome::failed(
                path.to_path_buf(),
                duration_seconds,
                options,
                TranscribeError::NotFound(path.display().to_string()),
            );
        }

        let config = JobConfig::from_options(options);

        let job = match self.provider.submit(path, &config).await {
            Ok(job) => job,
            Err(e) => {
                let error = classify(e);
                warn!(path = %path.display(), error = %error, "Job submission failed");
                return TranscriptionOutcome::failed(
                    path.to_path_buf(),
                    duration_seconds,
                    options,
                    error,
                );
            }
        };

        let output = match self.provider.await_completion(&job).await {
            Ok(output) => output,
            Err(e) => {
                let error = classify(e);
                warn!(path = %path.display(), job_id = %job.id, error = %error, "Job failed");
                return TranscriptionOutcome::failed(
                    path.to_path_buf(),
                    duration_seconds,
                    options,
                    error,
                );
            }
        };

        let words = extract_words(&output.items);
        debug!(
            path = %path.display(),
            job_id = %job.id,
            words = words.as_ref().map(Vec::len).unwrap_or(0),
            "Transcription completed"
        );

        TranscriptionOutcome::completed(
            path.to_path_buf(),
            duration_seconds,
            options,
            output.transcript,
            words,
            job.id,
        )
    }
}

/// Maps a wire-level failure onto the user-facing taxonomy.
fn classify(error: ProviderError) -> TranscribeError {
    match error {
        ProviderError::Status { code: 429, .. } => TranscribeError::RateLimited,
        ProviderError::Status { code: 403, .. } => TranscribeError::QuotaOrAuthError,
        ProviderError::Status { code: 401, .. } => TranscribeError::InvalidCredentials,
        ProviderError::Status { code: 400, body } => {
            TranscribeError::BadRequest(error_detail(&body))
        }
        ProviderError::Status { code, body } => TranscribeError::RemoteError {
            code,
            detail: error_detail(&body),
        },
        other => TranscribeError::Unknown(other.to_string()),
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Pulls the provider's `detail` field out of an error body, falling back
/// to the raw body.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .unwrap_or_else(|| body.to_string())
}

/// Best-effort word extraction: only `word` items with a usable alternative
/// produce entries; anything else is skipped silently. Zero extracted words
/// means "timestamps unavailable" and yields `None`, not an empty list.
fn extract_words(items: &[RecognitionItem]) -> Option<Vec<Word>> {
    let words: Vec<Word> = items
        .iter()
        .filter(|item| item.item_type == "word")
        .filter_map(|item| {
            item.alternatives.first().map(|alt| Word {
                text: alt.content.clone(),
                start: item.start_time,
                end: item.end_time,
                confidence: alt.confidence.unwrap_or(0.0),
            })
        })
        .collect();

    if words.is_empty() { None } else { Some(words) }
}
