use chrono::{Duration, Utc};
use serde_json::Value;
use uuid::Uuid;

use scribekit_transcription::provider::JobSummary;

use crate::fixtures::test_app::{ScriptedProbe, ScriptedProvider, TestApp};

fn job(created_days_ago: Option<i64>, duration_seconds: Option<f64>) -> JobSummary {
    JobSummary {
        id: Uuid::new_v4().to_string(),
        created_at: created_days_ago.map(|days| Utc::now() - Duration::days(days)),
        duration_seconds,
    }
}

#[tokio::test]
async fn usage_counts_only_jobs_from_the_current_utc_month() {
    let provider = ScriptedProvider::new().with_jobs(vec![
        // Created "now": always inside the current month.
        job(Some(0), Some(7200.0)),
        // 40 days back is always in an earlier month.
        job(Some(40), Some(3600.0)),
        // No creation timestamp: ignored.
        job(None, Some(3600.0)),
    ]);
    let app = TestApp::spawn_with(provider, ScriptedProbe::default()).await;

    let resp = app.get("/api/usage", &[]).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["jobs_this_month"], 1);
    assert_eq!(body["hours_used_this_month"], 2.0);
}

#[tokio::test]
async fn empty_job_history_reports_zero_usage() {
    let app = TestApp::spawn().await;

    let resp = app.get("/api/usage", &[]).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["jobs_this_month"], 0);
    assert_eq!(body["hours_used_this_month"], 0.0);
}

#[tokio::test]
async fn provider_listing_failure_is_a_structured_error() {
    let provider = ScriptedProvider::new().with_failing_job_listing();
    let app = TestApp::spawn_with(provider, ScriptedProbe::default()).await;

    let resp = app.get("/api/usage", &[]).await;

    assert_eq!(resp.status().as_u16(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "internal");
}
