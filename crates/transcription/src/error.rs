use thiserror::Error;

/// Failure taxonomy for every operation in this crate.
///
/// Inside a batch these are data, not control flow: each item's error is
/// captured in its `TranscriptionOutcome` and never crosses the item
/// boundary.
#[derive(Debug, Clone, Error)]
pub enum TranscribeError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("could not determine media duration: {0}")]
    DurationProbeFailed(String),
    #[error("rate limited by the transcription provider, wait and retry")]
    RateLimited,
    #[error("invalid transcription provider API key")]
    InvalidCredentials,
    #[error("provider quota exceeded or API key not authorized")]
    QuotaOrAuthError,
    #[error("invalid request: {0}")]
    BadRequest(String),
    #[error("provider error ({code}): {detail}")]
    RemoteError { code: u16, detail: String },
    #[error("{0}")]
    Unknown(String),
    #[error("directory not found: {0}")]
    DirectoryNotFound(String),
    #[error("not a directory: {0}")]
    NotADirectory(String),
    #[error("no transcript found for: {0}")]
    TranscriptNotFound(String),
    #[error("failed to read transcript: {0}")]
    TranscriptReadFailed(String),
}

impl TranscribeError {
    /// Stable snake_case tag used in batch reports and API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            TranscribeError::NotFound(_) => "not_found",
            TranscribeError::DurationProbeFailed(_) => "duration_probe_failed",
            TranscribeError::RateLimited => "rate_limited",
            TranscribeError::InvalidCredentials => "invalid_credentials",
            TranscribeError::QuotaOrAuthError => "quota_or_auth_error",
            TranscribeError::BadRequest(_) => "bad_request",
            TranscribeError::RemoteError { .. } => "remote_error",
            TranscribeError::Unknown(_) => "unknown",
            TranscribeError::DirectoryNotFound(_) => "directory_not_found",
            TranscribeError::NotADirectory(_) => "not_a_directory",
            TranscribeError::TranscriptNotFound(_) => "transcript_not_found",
            TranscribeError::TranscriptReadFailed(_) => "transcript_read_failed",
        }
    }
}
