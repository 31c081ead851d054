pub mod json;
pub mod text;

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::TranscribeError;
use crate::{Accuracy, Word};

pub const TEXT_SUFFIX: &str = ".transcript.txt";
pub const JSON_SUFFIX: &str = ".transcript.json";

/// Borrowed view of a completed outcome, ready for persistence.
#[derive(Debug, Clone, Copy)]
pub struct TranscriptView<'a> {
    pub media_path: &'a Path,
    pub transcript: &'a str,
    pub words: Option<&'a [Word]>,
    pub duration_seconds: f64,
    pub accuracy: Accuracy,
}

/// A transcript parsed back from disk, independent of on-disk format.
#[derive(Debug, Clone)]
pub struct TranscriptContent {
    pub transcript: String,
    pub duration_seconds: Option<f64>,
    pub words: Option<Vec<Word>>,
    pub has_timestamps: bool,
}

/// Where the transcript for a media file lives, per format variant.
pub fn transcript_path(media_path: &Path, with_timestamps: bool) -> PathBuf {
    let suffix = if with_timestamps {
        JSON_SUFFIX
    } else {
        TEXT_SUFFIX
    };
    append_suffix(media_path, suffix)
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut joined = path.as_os_str().to_os_string();
    joined.push(suffix);
    PathBuf::from(joined)
}

/// Probes both suffix variants beside the media file.
pub fn find_transcript(media_path: &Path) -> Option<PathBuf> {
    [TEXT_SUFFIX, JSON_SUFFIX]
        .iter()
        .map(|suffix| append_suffix(media_path, suffix))
        .find(|candidate| candidate.exists())
}

/// Resolves a caller-supplied path — either a media file or a transcript
/// file — to `(transcript_path, source_media_path)`.
pub fn resolve_transcript(path: &Path) -> Result<(PathBuf, PathBuf), TranscribeError> {
    let raw = path.as_os_str().to_string_lossy();
    for suffix in [TEXT_SUFFIX, JSON_SUFFIX] {
        if let Some(media) = raw.strip_suffix(suffix) {
            return Ok((path.to_path_buf(), PathBuf::from(media)));
        }
    }
    let transcript = find_transcript(path)
        .ok_or_else(|| TranscribeError::TranscriptNotFound(path.display().to_string()))?;
    Ok((transcript, path.to_path_buf()))
}

/// Writes the transcript beside its media file and returns the path.
pub fn write_transcript(
    view: &TranscriptView<'_>,
    with_timestamps: bool,
) -> Result<PathBuf, TranscribeError> {
    if with_timestamps {
        json::write(view)
    } else {
        text::write(view)
    }
}

/// Reads a transcript file, sniffing the format from the path suffix.
pub fn read_transcript(path: &Path) -> Result<TranscriptContent, TranscribeError> {
    if !path.exists() {
        return Err(TranscribeError::TranscriptNotFound(
            path.display().to_string(),
        ));
    }
    if path.as_os_str().to_string_lossy().ends_with(JSON_SUFFIX) {
        json::read(path)
    } else {
        text::read(path)
    }
}

/// `H:MM:SS` when hours > 0, else `M:SS`. Whole seconds only; the JSON
/// format keeps the original precision instead.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Parses `M:SS` or `H:MM:SS` back to seconds.
pub fn parse_duration(text: &str) -> Option<f64> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    match parts.as_slice() {
        [minutes, seconds] => {
            let minutes: u64 = minutes.parse().ok()?;
            let seconds: u64 = seconds.parse().ok()?;
            Some((minutes * 60 + seconds) as f64)
        }
        [hours, minutes, seconds] => {
            let hours: u64 = hours.parse().ok()?;
            let minutes: u64 = minutes.parse().ok()?;
            let seconds: u64 = seconds.parse().ok()?;
            Some((hours * 3600 + minutes * 60 + seconds) as f64)
        }
        _ => None,
    }
}

/// Temp-file-then-rename in the destination directory, so a crashed write
/// never leaves a truncated transcript behind.
fn write_atomic(path: &Path, contents: &str) -> Result<(), TranscribeError> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut file = tempfile::NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))
        .map_err(|e| TranscribeError::Unknown(format!("failed to write transcript: {e}")))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| TranscribeError::Unknown(format!("failed to write transcript: {e}")))?;
    file.persist(path)
        .map_err(|e| TranscribeError::Unknown(format!("failed to write transcript: {e}")))?;
    Ok(())
}
