use std::path::PathBuf;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::Serialize;

use crate::provider::JobSummary;
use crate::{OutcomeStatus, TranscriptionOutcome};

/// Aggregate view of one batch, in input order.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub files_processed: usize,
    pub files_failed: usize,
    pub transcripts: Vec<BatchEntry>,
    pub total_duration_seconds: f64,
}

#[derive(Debug, Serialize)]
pub struct BatchEntry {
    pub file: String,
    pub transcript_path: Option<String>,
    pub duration_seconds: f64,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl BatchReport {
    /// Folds outcomes into summary counts. `transcript_paths` is aligned
    /// with `outcomes`; successes that could not be persisted carry `None`.
    /// Every outcome contributes its known duration to the total — duration
    /// probing is independent of transcription success.
    pub fn from_outcomes(
        outcomes: &[TranscriptionOutcome],
        transcript_paths: &[Option<PathBuf>],
    ) -> Self {
        let mut files_processed = 0;
        let mut files_failed = 0;
        let mut total_duration_seconds = 0.0;
        let mut transcripts = Vec::with_capacity(outcomes.len());

        for (index, outcome) in outcomes.iter().enumerate() {
            total_duration_seconds += outcome.duration_seconds;
            let transcript_path = transcript_paths
                .get(index)
                .and_then(|p| p.as_ref())
                .map(|p| p.display().to_string());

            match &outcome.status {
                OutcomeStatus::Completed { .. } => {
                    files_processed += 1;
                    transcripts.push(BatchEntry {
                        file: outcome.file_path.display().to_string(),
                        transcript_path,
                        duration_seconds: outcome.duration_seconds,
                        status: "success",
                        error: None,
                        error_message: None,
                    });
                }
                OutcomeStatus::Failed(error) => {
                    files_failed += 1;
                    transcripts.push(BatchEntry {
                        file: outcome.file_path.display().to_string(),
                        transcript_path: None,
                        duration_seconds: outcome.duration_seconds,
                        status: "error",
                        error: Some(error.kind()),
                        error_message: Some(error.to_string()),
                    });
                }
            }
        }

        Self {
            files_processed,
            files_failed,
            transcripts,
            total_duration_seconds,
        }
    }
}

/// Provider usage for the current UTC month.
#[derive(Debug, Serialize)]
pub struct UsageReport {
    pub jobs_this_month: usize,
    pub hours_used_this_month: f64,
}

/// Counts jobs created on or after the first instant of `now`'s UTC month
/// and sums their durations. Jobs without a creation timestamp are ignored.
pub fn monthly_usage(jobs: &[JobSummary], now: DateTime<Utc>) -> UsageReport {
    let month_start = Utc
        .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .expect("first instant of a UTC month is representable");

    let mut jobs_this_month = 0;
    let mut total_seconds = 0.0;
    for job in jobs {
        let Some(created_at) = job.created_at else {
            continue;
        };
        if created_at >= month_start {
            jobs_this_month += 1;
            total_seconds += job.duration_seconds.unwrap_or(0.0);
        }
    }

    UsageReport {
        jobs_this_month,
        hours_used_this_month: (total_seconds / 3600.0 * 100.0).round() / 100.0,
    }
}
