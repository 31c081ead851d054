pub mod batch;
pub mod client;
pub mod codec;
pub mod config;
pub mod discovery;
pub mod error;
pub mod probe;
pub mod provider;
pub mod report;

pub use batch::{BatchItem, BatchOrchestrator, BatchProgress, ProgressFn};
pub use client::TranscriptionClient;
pub use config::{ProviderConfig, TranscribeOptions};
pub use error::TranscribeError;
pub use probe::{DurationProbe, FfprobeDurationProbe};
pub use provider::{SpeechmaticsProvider, TranscriptionProvider};

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codec::TranscriptView;

/// Provider operating point controlling transcription quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accuracy {
    #[default]
    Standard,
    Enhanced,
}

impl Accuracy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Accuracy::Standard => "standard",
            Accuracy::Enhanced => "enhanced",
        }
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One word with timing from the provider's word-level results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    #[serde(rename = "word")]
    pub text: String,
    pub start: f64,
    pub end: f64,
    pub confidence: f64,
}

/// The immutable result of transcribing one file.
///
/// `words: None` means the provider returned no usable word timings, which
/// is distinct from `Some(vec![])` at this layer (the JSON codec normalizes
/// both to an empty array on disk).
#[derive(Debug, Clone)]
pub struct TranscriptionOutcome {
    pub file_path: PathBuf,
    /// Probed playback duration; 0.0 when the probe failed upstream.
    pub duration_seconds: f64,
    pub accuracy: Accuracy,
    pub diarization: bool,
    pub status: OutcomeStatus,
}

#[derive(Debug, Clone)]
pub enum OutcomeStatus {
    Completed {
        transcript: String,
        words: Option<Vec<Word>>,
        job_id: String,
    },
    Failed(TranscribeError),
}

impl TranscriptionOutcome {
    pub fn completed(
        file_path: PathBuf,
        duration_seconds: f64,
        options: &TranscribeOptions,
        transcript: String,
        words: Option<Vec<Word>>,
        job_id: String,
    ) -> Self {
        Self {
            file_path,
            duration_seconds,
            accuracy: options.accuracy,
            diarization: options.diarize,
            status: OutcomeStatus::Completed {
                transcript,
                words,
                job_id,
            },
        }
    }

    pub fn failed(
        file_path: PathBuf,
        duration_seconds: f64,
        options: &TranscribeOptions,
        error: TranscribeError,
    ) -> Self {
        Self {
            file_path,
            duration_seconds,
            accuracy: options.accuracy,
            diarization: options.diarize,
            status: OutcomeStatus::Failed(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Completed { .. })
    }

    pub fn error(&self) -> Option<&TranscribeError> {
        match &self.status {
            OutcomeStatus::Failed(e) => Some(e),
            OutcomeStatus::Completed { .. } => None,
        }
    }

    /// Borrowed view of a completed outcome, ready for the codec.
    pub fn as_transcript(&self) -> Option<TranscriptView<'_>> {
        match &self.status {
            OutcomeStatus::Completed {
                transcript, words, ..
            } => Some(TranscriptView {
                media_path: Path::new(&self.file_path),
                transcript,
                words: words.as_deref(),
                duration_seconds: self.duration_seconds,
                accuracy: self.accuracy,
            }),
            OutcomeStatus::Failed(_) => None,
        }
    }
}
