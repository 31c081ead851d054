use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use crate::error::TranscribeError;

/// Port for obtaining a media file's playback duration.
#[async_trait]
pub trait DurationProbe: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<f64, TranscribeError>;
}

/// Probes duration by running `ffprobe` with a bounded timeout.
pub struct FfprobeDurationProbe {
    timeout: Duration,
}

#[derive(Deserialize)]
struct FfprobeOutput {
    format: Option<FfprobeFormat>,
}

#[derive(Deserialize)]
struct FfprobeFormat {
    /// ffprobe prints the duration as a decimal string.
    duration: Option<String>,
}

impl FfprobeDurationProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for FfprobeDurationProbe {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

#[async_trait]
impl DurationProbe for FfprobeDurationProbe {
    async fn probe(&self, path: &Path) -> Result<f64, TranscribeError> {
        let run = Command::new("ffprobe")
            .arg("-v")
            .arg("quiet")
            .arg("-print_format")
            .arg("json")
            .arg("-show_format")
            .arg(path)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| TranscribeError::DurationProbeFailed("ffprobe timed out".to_string()))?
            .map_err(|e| {
                TranscribeError::DurationProbeFailed(format!("failed to run ffprobe: {e}"))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TranscribeError::DurationProbeFailed(format!(
                "ffprobe exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        parse_ffprobe_output(&output.stdout)
    }
}

fn parse_ffprobe_output(stdout: &[u8]) -> Result<f64, TranscribeError> {
    let parsed: FfprobeOutput = serde_json::from_slice(stdout)
        .map_err(|e| TranscribeError::DurationProbeFailed(format!("unparseable output: {e}")))?;

    let duration = parsed
        .format
        .and_then(|f| f.duration)
        .ok_or_else(|| {
            TranscribeError::DurationProbeFailed(
                "output carries no duration field".to_string(),
            )
        })?;

    duration.parse::<f64>().map_err(|e| {
        TranscribeError::DurationProbeFailed(format!("bad duration value '{duration}': {e}"))
    })
}
