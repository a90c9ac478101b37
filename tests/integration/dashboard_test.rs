// Dashboard page rendering, plain and Inertia visits
use super::test_utils::{body_string, embedded_page, StubSource, TestServer, TEST_BODY_LIMIT};
use ad_dashboard::models::campaign::{FetchResult, MetricTotals, GENERIC_FETCH_MESSAGE};
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;

fn loaded() -> FetchResult {
    FetchResult::loaded(MetricTotals::from([
        ("clicks".to_string(), 17.0),
        ("spend".to_string(), 8.0),
    ]))
}

#[tokio::test]
async fn renders_html_document_with_page_object() {
    let source = Arc::new(StubSource::new(loaded()));
    let server = TestServer::with_source(source.clone());

    let response = server.call(TestServer::get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"), "got {content_type}");

    let html = body_string(response).await;
    assert!(html.contains(r#"<div id="app""#));
    assert!(html.contains("/assets/app.js"));

    let page = embedded_page(&html);
    assert_eq!(page["component"], "Dashboard");
    assert_eq!(page["url"], "/");
    assert_eq!(page["props"]["metrics"], json!({"clicks": 17.0, "spend": 8.0}));
    assert_eq!(page["props"]["error"], Value::Null);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn dashboard_alias_route() {
    let server = TestServer::with_source(Arc::new(StubSource::new(loaded())));

    let response = server.call(TestServer::get("/dashboard")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = embedded_page(&body_string(response).await);
    assert_eq!(page["url"], "/dashboard");
}

#[tokio::test]
async fn error_is_passed_through_as_prop() {
    let server = TestServer::with_source(Arc::new(StubSource::new(FetchResult::failed(
        GENERIC_FETCH_MESSAGE,
    ))));

    let response = server.call(TestServer::get("/")).await;
    // The page itself still renders; the error is shown inside it.
    assert_eq!(response.status(), StatusCode::OK);
    let page = embedded_page(&body_string(response).await);
    assert_eq!(page["props"]["metrics"], json!({}));
    assert_eq!(page["props"]["error"], GENERIC_FETCH_MESSAGE);
}

#[tokio::test]
async fn inertia_visit_returns_json_page() {
    let server = TestServer::with_source(Arc::new(StubSource::new(loaded())));

    let req = TestServer::inertia_get("/", Some(env!("CARGO_PKG_VERSION")));
    let response = server.call(req).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-inertia").and_then(|v| v.to_str().ok()),
        Some("true")
    );
    assert_eq!(
        response.headers().get("vary").and_then(|v| v.to_str().ok()),
        Some("X-Inertia")
    );

    let bytes = axum::body::to_bytes(response.into_body(), TEST_BODY_LIMIT)
        .await
        .expect("Failed to read body");
    let page: Value = serde_json::from_slice(&bytes).expect("page is not JSON");
    assert_eq!(
        page,
        json!({
            "component": "Dashboard",
            "props": {"metrics": {"clicks": 17.0, "spend": 8.0}, "error": null},
            "url": "/",
            "version": env!("CARGO_PKG_VERSION")
        })
    );
}

#[tokio::test]
async fn stale_asset_version_forces_reload() {
    let source = Arc::new(StubSource::new(loaded()));
    let server = TestServer::with_source(source.clone());

    let response = server
        .call(TestServer::inertia_get("/dashboard", Some("0.0.0-stale")))
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        response
            .headers()
            .get("x-inertia-location")
            .and_then(|v| v.to_str().ok()),
        Some("/dashboard")
    );
    // No upstream fetch for a page the client is about to reload.
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn serves_client_bootstrap() {
    let server = TestServer::with_source(Arc::new(StubSource::new(loaded())));

    let response = server.call(TestServer::get("/assets/app.js")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/javascript; charset=utf-8")
    );
    let script = body_string(response).await;
    assert!(script.contains("getElementById"));
    assert!(script.contains("Root element not found"));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let server = TestServer::with_source(Arc::new(StubSource::new(loaded())));
    let response = server.call(TestServer::get("/nonexistent")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
