use std::path::Path;

use axum::{Json, extract::Query};
use serde::{Deserialize, Serialize};

use scribekit_transcription::codec::{read_transcript, resolve_transcript};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct TranscriptQuery {
    /// Path to a media file OR to a transcript file.
    pub file_path: String,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub transcript: String,
    pub source_media: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    pub has_timestamps: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
}

/// Reads back a persisted transcript, sniffing the format from the path.
pub async fn get_transcript(
    Query(query): Query<TranscriptQuery>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let (transcript_path, source_media) = resolve_transcript(Path::new(&query.file_path))?;
    let content = read_transcript(&transcript_path)?;

    Ok(Json(TranscriptResponse {
        transcript: content.transcript,
        source_media: source_media.display().to_string(),
        duration_seconds: content.duration_seconds,
        has_timestamps: content.has_timestamps,
        word_count: content.words.as_ref().map(Vec::len),
    }))
}
