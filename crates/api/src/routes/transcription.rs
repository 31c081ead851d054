use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use scribekit_transcription::codec::{self, format_duration};
use scribekit_transcription::discovery::{default_file_types, find_media_files};
use scribekit_transcription::report::BatchReport;
use scribekit_transcription::{
    Accuracy, BatchItem, BatchOrchestrator, ProgressFn, TranscribeOptions, TranscriptionOutcome,
};

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct TranscribeFileRequest {
    pub file_path: String,
    #[serde(default)]
    pub accuracy: Accuracy,
    #[serde(default)]
    pub with_timestamps: bool,
    #[serde(default)]
    pub diarize: bool,
}

#[derive(Debug, Serialize)]
pub struct TranscribeFileResponse {
    pub file: String,
    pub transcript_path: String,
    pub duration_seconds: f64,
    pub duration_formatted: String,
    pub accuracy: Accuracy,
}

pub async fn transcribe_file(
    State(state): State<AppState>,
    Json(body): Json<TranscribeFileRequest>,
) -> Result<Json<TranscribeFileResponse>, ApiError> {
    let path = PathBuf::from(&body.file_path);
    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return Err(ApiError::NotFound(format!(
            "File not found: {}",
            body.file_path
        )));
    }

    // For a single file a failed probe is an error; batches degrade to 0.
    let duration_seconds = state.probe.probe(&path).await?;

    let options = transcribe_options(&state, body.accuracy, body.diarize);
    let outcome = state
        .client
        .transcribe(&path, &options, duration_seconds)
        .await;

    let transcript_path = persist(&outcome, body.with_timestamps)?;

    Ok(Json(TranscribeFileResponse {
        file: body.file_path,
        transcript_path: transcript_path.display().to_string(),
        duration_seconds,
        duration_formatted: format_duration(duration_seconds),
        accuracy: body.accuracy,
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct TranscribeDirectoryRequest {
    pub directory: String,
    #[serde(default)]
    pub file_types: Option<Vec<String>>,
    #[serde(default)]
    pub accuracy: Accuracy,
    #[serde(default)]
    pub with_timestamps: bool,
    #[serde(default)]
    pub diarize: bool,
    #[serde(default)]
    pub recursive: bool,
    #[validate(range(min = 1, max = 50))]
    pub max_concurrent: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TranscribeDirectoryResponse {
    #[serde(flatten)]
    pub report: BatchReport,
    pub total_duration_formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub async fn transcribe_directory(
    State(state): State<AppState>,
    Json(body): Json<TranscribeDirectoryRequest>,
) -> Result<Json<TranscribeDirectoryResponse>, ApiError> {
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let file_types = body.file_types.clone().unwrap_or_else(default_file_types);
    let files = find_media_files(Path::new(&body.directory), &file_types, body.recursive)?;

    if files.is_empty() {
        return Ok(Json(TranscribeDirectoryResponse {
            report: BatchReport::from_outcomes(&[], &[]),
            total_duration_formatted: format_duration(0.0),
            message: Some("No media files found in directory".to_string()),
        }));
    }

    let mut items = Vec::with_capacity(files.len());
    for path in files {
        let duration_seconds = match state.probe.probe(&path).await {
            Ok(duration) => duration,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Duration probe failed");
                0.0
            }
        };
        items.push(BatchItem {
            path,
            duration_seconds,
        });
    }

    let max_concurrent = body
        .max_concurrent
        .unwrap_or(state.settings.batch.default_max_concurrent);
    let options = transcribe_options(&state, body.accuracy, body.diarize);

    let progress: ProgressFn = Arc::new(|snapshot| {
        tracing::info!(
            completed = snapshot.completed,
            total = snapshot.total,
            file = %snapshot.current_file,
            "Batch progress"
        );
    });

    let orchestrator = BatchOrchestrator::new(Arc::clone(&state.client), max_concurrent);
    let outcomes = orchestrator.run_batch(items, &options, Some(progress)).await;

    let mut transcript_paths = Vec::with_capacity(outcomes.len());
    for outcome in &outcomes {
        match outcome.as_transcript() {
            Some(view) => match codec::write_transcript(&view, body.with_timestamps) {
                Ok(path) => transcript_paths.push(Some(path)),
                Err(e) => {
                    tracing::warn!(
                        path = %outcome.file_path.display(),
                        error = %e,
                        "Failed to persist transcript"
                    );
                    transcript_paths.push(None);
                }
            },
            None => transcript_paths.push(None),
        }
    }

    let report = BatchReport::from_outcomes(&outcomes, &transcript_paths);
    let total_duration_formatted = format_duration(report.total_duration_seconds);

    Ok(Json(TranscribeDirectoryResponse {
        report,
        total_duration_formatted,
        message: None,
    }))
}

fn transcribe_options(state: &AppState, accuracy: Accuracy, diarize: bool) -> TranscribeOptions {
    TranscribeOptions {
        accuracy,
        language: state.settings.batch.language.clone(),
        diarize,
    }
}

/// Persists a completed outcome and returns the transcript path; a failed
/// outcome surfaces its own error.
fn persist(
    outcome: &TranscriptionOutcome,
    with_timestamps: bool,
) -> Result<PathBuf, ApiError> {
    match outcome.as_transcript() {
        Some(view) => Ok(codec::write_transcript(&view, with_timestamps)?),
        None => match outcome.error() {
            Some(error) => Err(error.clone().into()),
            None => Err(ApiError::Internal("outcome without transcript".to_string())),
        },
    }
}
