// Health endpoint
use super::test_utils::{body_string, StubSource, TestServer};
use ad_dashboard::models::campaign::FetchResult;
use axum::http::StatusCode;
use serde_json::Value;
use std::sync::Arc;

#[tokio::test]
async fn test_health_endpoint() {
    let source = Arc::new(StubSource::new(FetchResult::default()));
    let server = TestServer::with_source(source.clone());

    let response = server.call(TestServer::get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("cache-control")
            .and_then(|v| v.to_str().ok()),
        Some("no-cache, no-store, must-revalidate")
    );

    let json: Value =
        serde_json::from_str(&body_string(response).await).expect("Health response is not JSON");
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["ad_api"]["configured"], true);
    assert!(json.get("timestamp").is_some());
    // Health never hits the ad API.
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_health_reports_unconfigured_api() {
    let server = TestServer::with_source(Arc::new(StubSource::unconfigured(
        FetchResult::default(),
    )));

    let response = server.call(TestServer::get("/health")).await;
    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["ad_api"]["configured"], false);
}
