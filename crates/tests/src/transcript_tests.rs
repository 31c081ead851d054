use serde_json::{Value, json};

use crate::fixtures::test_app::{ScriptedProbe, ScriptedProvider, TestApp};
use crate::fixtures::{touch, word};

async fn transcribe(app: &TestApp, media: &std::path::Path, with_timestamps: bool) {
    let resp = app
        .post(
            "/api/transcription/file",
            &json!({
                "file_path": media.to_string_lossy(),
                "with_timestamps": with_timestamps,
            }),
        )
        .await;
    assert_eq!(resp.status().as_u16(), 200);
}

#[tokio::test]
async fn reads_back_plain_text_by_media_path() {
    let dir = tempfile::tempdir().unwrap();
    let media = touch(dir.path(), "talk.mp3");

    let provider = ScriptedProvider::new().succeed("talk.mp3", "Hello again.");
    let app = TestApp::spawn_with(provider, ScriptedProbe::default()).await;
    transcribe(&app, &media, false).await;

    let resp = app
        .get(
            "/api/transcript",
            &[("file_path", media.to_string_lossy().as_ref())],
        )
        .await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["transcript"], "Hello again.");
    assert_eq!(body["duration_seconds"], 125.0);
    assert_eq!(body["has_timestamps"], false);
    assert!(body.get("word_count").is_none());
    assert!(
        body["source_media"]
            .as_str()
            .unwrap()
            .ends_with("talk.mp3")
    );
}

#[tokio::test]
async fn reads_back_json_with_word_count() {
    let dir = tempfile::tempdir().unwrap();
    let media = touch(dir.path(), "talk.mp3");

    let provider = ScriptedProvider::new().succeed_with_items(
        "talk.mp3",
        "one two",
        vec![word("one", 0.0, 0.4), word("two", 0.5, 0.8)],
    );
    let app = TestApp::spawn_with(provider, ScriptedProbe::default()).await;
    transcribe(&app, &media, true).await;

    let resp = app
        .get(
            "/api/transcript",
            &[("file_path", media.to_string_lossy().as_ref())],
        )
        .await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["transcript"], "one two");
    assert_eq!(body["has_timestamps"], true);
    assert_eq!(body["word_count"], 2);
}

#[tokio::test]
async fn a_wordless_json_transcript_reads_back_with_zero_words() {
    let dir = tempfile::tempdir().unwrap();
    let media = touch(dir.path(), "talk.mp3");

    // Provider returned no usable word timings; the JSON codec still
    // writes a words array.
    let provider = ScriptedProvider::new().succeed("talk.mp3", "untimed text");
    let app = TestApp::spawn_with(provider, ScriptedProbe::default()).await;
    transcribe(&app, &media, true).await;

    let resp = app
        .get(
            "/api/transcript",
            &[("file_path", media.to_string_lossy().as_ref())],
        )
        .await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["has_timestamps"], true);
    assert_eq!(body["word_count"], 0);
}

#[tokio::test]
async fn accepts_a_direct_transcript_path() {
    let dir = tempfile::tempdir().unwrap();
    let media = touch(dir.path(), "talk.mp3");

    let provider = ScriptedProvider::new().succeed("talk.mp3", "direct read");
    let app = TestApp::spawn_with(provider, ScriptedProbe::default()).await;
    transcribe(&app, &media, false).await;

    let transcript_path = format!("{}.transcript.txt", media.to_string_lossy());
    let resp = app
        .get("/api/transcript", &[("file_path", transcript_path.as_str())])
        .await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["transcript"], "direct read");
    assert!(
        body["source_media"]
            .as_str()
            .unwrap()
            .ends_with("talk.mp3")
    );
}

#[tokio::test]
async fn missing_transcript_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let media = touch(dir.path(), "untranscribed.mp3");
    let app = TestApp::spawn().await;

    let resp = app
        .get(
            "/api/transcript",
            &[("file_path", media.to_string_lossy().as_ref())],
        )
        .await;

    assert_eq!(resp.status().as_u16(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
}
