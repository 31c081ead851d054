use serde_json::Value;

use crate::fixtures::test_app::TestApp;

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = TestApp::spawn().await;

    let resp = app.get("/health", &[]).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].as_str().is_some());
}
