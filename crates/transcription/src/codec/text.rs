use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};

use super::{
    format_duration, parse_duration, transcript_path, write_atomic, TranscriptContent,
    TranscriptView,
};
use crate::error::TranscribeError;

/// Plain-text format: a fixed 4-line header, one blank line, then the raw
/// transcript verbatim.
pub fn write(view: &TranscriptView<'_>) -> Result<PathBuf, TranscribeError> {
    let path = transcript_path(view.media_path, false);
    let source = view
        .media_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| view.media_path.display().to_string());
    let duration = if view.duration_seconds > 0.0 {
        format_duration(view.duration_seconds)
    } else {
        "unknown".to_string()
    };
    let transcribed_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    let document = format!(
        "# Transcribed: {transcribed_at}\n# Source: {source}\n# Duration: {duration}\n# Accuracy: {accuracy}\n\n{transcript}",
        accuracy = view.accuracy,
        transcript = view.transcript,
    );

    write_atomic(&path, &document)?;
    Ok(path)
}

pub fn read(path: &Path) -> Result<TranscriptContent, TranscribeError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| TranscribeError::TranscriptReadFailed(e.to_string()))?;
    Ok(parse(&content))
}

/// Everything after the first blank line is transcript, trimmed once as a
/// whole — interior blank lines survive. Duration comes from the header
/// when it parses.
fn parse(content: &str) -> TranscriptContent {
    let mut transcript_lines = Vec::new();
    let mut duration_seconds = None;
    let mut past_header = false;

    for line in content.lines() {
        if past_header {
            transcript_lines.push(line);
        } else if line.is_empty() {
            past_header = true;
        } else if let Some(value) = line.strip_prefix("# Duration:") {
            duration_seconds = parse_duration(value);
        }
    }

    TranscriptContent {
        transcript: transcript_lines.join("\n").trim().to_string(),
        duration_seconds,
        words: None,
        has_timestamps: false,
    }
}
