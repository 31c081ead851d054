use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::{transcript_path, write_atomic, TranscriptContent, TranscriptView};
use crate::error::TranscribeError;
use crate::{Accuracy, Word};

#[derive(Debug, Serialize, Deserialize)]
struct TranscriptDocument {
    metadata: Metadata,
    transcript: String,
    /// Always present on disk; absent in-memory words normalize to `[]`.
    #[serde(default)]
    words: Vec<Word>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Metadata {
    source: String,
    transcribed_at: String,
    duration_seconds: f64,
    accuracy: Accuracy,
}

/// JSON format: metadata plus word-level timing, full duration precision.
pub fn write(view: &TranscriptView<'_>) -> Result<PathBuf, TranscribeError> {
    let path = transcript_path(view.media_path, true);
    let source = view
        .media_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| view.media_path.display().to_string());

    let document = TranscriptDocument {
        metadata: Metadata {
            source,
            transcribed_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            duration_seconds: view.duration_seconds,
            accuracy: view.accuracy,
        },
        transcript: view.transcript.to_string(),
        words: view.words.unwrap_or_default().to_vec(),
    };

    let rendered = serde_json::to_string_pretty(&document)
        .map_err(|e| TranscribeError::Unknown(format!("failed to write transcript: {e}")))?;
    write_atomic(&path, &rendered)?;
    Ok(path)
}

pub fn read(path: &Path) -> Result<TranscriptContent, TranscribeError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| TranscribeError::TranscriptReadFailed(e.to_string()))?;
    let document: TranscriptDocument = serde_json::from_str(&content)
        .map_err(|e| TranscribeError::TranscriptReadFailed(e.to_string()))?;

    Ok(TranscriptContent {
        transcript: document.transcript,
        duration_seconds: Some(document.metadata.duration_seconds),
        words: Some(document.words),
        has_timestamps: true,
    })
}
