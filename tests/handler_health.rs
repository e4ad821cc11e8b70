mod common;

use std::time::Duration;

use common::{StubFetcher, StubTransformer, create_test_state, test_server};
use serde_json::json;

#[tokio::test]
async fn test_health_reports_component_counters() {
    let state = create_test_state(
        StubFetcher::ok(b"raw".to_vec()),
        StubTransformer,
        Duration::from_secs(1),
    );
    let server = test_server(state);

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["cache"]["status"], "ok");
    assert_eq!(body["checks"]["cache"]["message"], "0 entries");
    assert_eq!(body["checks"]["in_flight"]["status"], "ok");
    assert_eq!(body["checks"]["in_flight"]["message"], "0 attempts running");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_health_counts_cached_entries() {
    let state = create_test_state(
        StubFetcher::ok(b"raw".to_vec()),
        StubTransformer,
        Duration::from_secs(1),
    );
    let server = test_server(state);

    server
        .post("/v1/resize")
        .json(&json!({ "urls": ["http://x/a.jpg"], "width": 100, "height": 0 }))
        .await;

    let response = server.get("/health").await;
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["checks"]["cache"]["message"], "1 entry");
}
