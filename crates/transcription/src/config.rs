use std::time::Duration;

use crate::Accuracy;

/// Connection settings for the remote provider adapter.
///
/// Credentials are passed in here explicitly; the adapter never reads the
/// process environment itself.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub base_url: String,
    /// Delay between job-status polls while waiting for completion.
    pub poll_interval: Duration,
    /// Overall deadline for one remote job, submit to terminal state.
    pub job_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://asr.api.speechmatics.com/v2".to_string(),
            poll_interval: Duration::from_secs(2),
            job_timeout: Duration::from_secs(1800),
        }
    }
}

/// Per-call transcription options shared by every item of a batch.
#[derive(Debug, Clone)]
pub struct TranscribeOptions {
    pub accuracy: Accuracy,
    /// Language code sent to the provider (e.g. "en", "de").
    pub language: String,
    /// Enable speaker diarization.
    pub diarize: bool,
}

impl Default for TranscribeOptions {
    fn default() -> Self {
        Self {
            accuracy: Accuracy::Standard,
            language: "en".to_string(),
            diarize: false,
        }
    }
}
