use serde_json::{Value, json};

use crate::fixtures::test_app::{ScriptedProbe, ScriptedProvider, TestApp};
use crate::fixtures::{punctuation, touch, word};

#[tokio::test]
async fn transcribes_one_file_to_plain_text() {
    let dir = tempfile::tempdir().unwrap();
    let media = touch(dir.path(), "talk.mp3");

    let provider = ScriptedProvider::new().succeed("talk.mp3", "Hello there.");
    let app = TestApp::spawn_with(provider, ScriptedProbe::default()).await;

    let resp = app
        .post(
            "/api/transcription/file",
            &json!({
                "file_path": media.to_string_lossy(),
                "accuracy": "enhanced",
            }),
        )
        .await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["duration_seconds"], 125.0);
    assert_eq!(body["duration_formatted"], "2:05");
    assert_eq!(body["accuracy"], "enhanced");

    let transcript_path = body["transcript_path"].as_str().unwrap();
    assert!(transcript_path.ends_with("talk.mp3.transcript.txt"));

    let written = std::fs::read_to_string(transcript_path).unwrap();
    assert!(written.contains("# Source: talk.mp3"));
    assert!(written.contains("# Duration: 2:05"));
    assert!(written.contains("# Accuracy: enhanced"));
    assert!(written.ends_with("Hello there."));
}

#[tokio::test]
async fn transcribes_with_timestamps_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let media = touch(dir.path(), "talk.mp3");

    let provider = ScriptedProvider::new().succeed_with_items(
        "talk.mp3",
        "Hello there.",
        vec![
            word("Hello", 0.1, 0.5),
            word("there", 0.6, 0.9),
            punctuation(".", 0.9),
        ],
    );
    let app = TestApp::spawn_with(provider, ScriptedProbe::default()).await;

    let resp = app
        .post(
            "/api/transcription/file",
            &json!({
                "file_path": media.to_string_lossy(),
                "with_timestamps": true,
            }),
        )
        .await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    let transcript_path = body["transcript_path"].as_str().unwrap();
    assert!(transcript_path.ends_with("talk.mp3.transcript.json"));

    let document: Value =
        serde_json::from_str(&std::fs::read_to_string(transcript_path).unwrap()).unwrap();
    assert_eq!(document["transcript"], "Hello there.");
    assert_eq!(document["metadata"]["source"], "talk.mp3");
    assert_eq!(document["metadata"]["duration_seconds"], 125.0);
    // Punctuation items carry no timing entry; only the two words do.
    assert_eq!(document["words"].as_array().unwrap().len(), 2);
    assert_eq!(document["words"][0]["word"], "Hello");
}

#[tokio::test]
async fn formats_hour_long_durations() {
    let dir = tempfile::tempdir().unwrap();
    let media = touch(dir.path(), "long.mp3");

    let provider = ScriptedProvider::new().succeed("long.mp3", "a very long talk");
    let app = TestApp::spawn_with(provider, ScriptedProbe::fixed(3725.0)).await;

    let resp = app
        .post(
            "/api/transcription/file",
            &json!({ "file_path": media.to_string_lossy() }),
        )
        .await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["duration_formatted"], "1:02:05");

    let written =
        std::fs::read_to_string(body["transcript_path"].as_str().unwrap()).unwrap();
    assert!(written.contains("# Duration: 1:02:05"));
}

#[tokio::test]
async fn missing_file_is_rejected_without_a_remote_call() {
    let app = TestApp::spawn().await;

    let resp = app
        .post(
            "/api/transcription/file",
            &json!({ "file_path": "/no/such/file.mp3" }),
        )
        .await;

    assert_eq!(resp.status().as_u16(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn provider_rate_limiting_surfaces_as_429() {
    let dir = tempfile::tempdir().unwrap();
    let media = touch(dir.path(), "talk.mp3");

    let provider = ScriptedProvider::new().fail_with_status("talk.mp3", 429, "slow down");
    let app = TestApp::spawn_with(provider, ScriptedProbe::default()).await;

    let resp = app
        .post(
            "/api/transcription/file",
            &json!({ "file_path": media.to_string_lossy() }),
        )
        .await;

    assert_eq!(resp.status().as_u16(), 429);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "rate_limited");
}

#[tokio::test]
async fn invalid_credentials_surface_as_401() {
    let dir = tempfile::tempdir().unwrap();
    let media = touch(dir.path(), "talk.mp3");

    let provider = ScriptedProvider::new().fail_with_status("talk.mp3", 401, "bad key");
    let app = TestApp::spawn_with(provider, ScriptedProbe::default()).await;

    let resp = app
        .post(
            "/api/transcription/file",
            &json!({ "file_path": media.to_string_lossy() }),
        )
        .await;

    assert_eq!(resp.status().as_u16(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn probe_failure_is_an_error_for_a_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let media = touch(dir.path(), "talk.mp3");

    let provider = ScriptedProvider::new().succeed("talk.mp3", "never reached");
    let probe = ScriptedProbe::default().failing_for("talk.mp3");
    let app = TestApp::spawn_with(provider, probe).await;

    let resp = app
        .post(
            "/api/transcription/file",
            &json!({ "file_path": media.to_string_lossy() }),
        )
        .await;

    assert_eq!(resp.status().as_u16(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "internal");
    assert!(body["message"].as_str().unwrap().contains("duration"));
}
