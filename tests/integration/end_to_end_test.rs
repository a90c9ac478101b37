// Full path: router -> AdDataService -> mocked ad API
use super::test_utils::{body_string, embedded_page, fast_ad_api, TestServer};
use ad_dashboard::config::AdApiConfig;
use ad_dashboard::models::campaign::{GENERIC_FETCH_MESSAGE, NOT_CONFIGURED_MESSAGE};
use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

async fn dashboard_props(server: &TestServer) -> Value {
    let response = server.call(TestServer::get("/")).await;
    let page = embedded_page(&body_string(response).await);
    page["props"].clone()
}

#[tokio::test]
async fn aggregates_campaigns_from_api() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/campaigns"))
        .and(header("Authorization", "Bearer e2e-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 1, "name": "Spring", "clicks": "10", "spend": 5.5},
                {"id": 2, "name": "Summer", "clicks": 7, "spend": 2.5, "conversions": 3}
            ]
        })))
        .expect(1)
        .mount(&api)
        .await;

    let server = TestServer::with_ad_api(fast_ad_api(
        format!("{}/v1/campaigns", api.uri()),
        "e2e-token",
    ));

    let props = dashboard_props(&server).await;
    assert_eq!(props["metrics"], json!({"clicks": 17.0, "spend": 8.0}));
    assert_eq!(props["error"], Value::Null);
}

#[tokio::test]
async fn bare_empty_list_renders_without_error() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&api)
        .await;

    let server = TestServer::with_ad_api(fast_ad_api(api.uri(), "token"));
    let props = dashboard_props(&server).await;
    assert_eq!(props, json!({"metrics": {}, "error": null}));
}

#[tokio::test]
async fn upstream_outage_shows_generic_error() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream is down"))
        .expect(6)
        .mount(&api)
        .await;

    let server = TestServer::with_ad_api(fast_ad_api(api.uri(), "token"));
    let props = dashboard_props(&server).await;
    assert_eq!(props["metrics"], json!({}));
    assert_eq!(props["error"], GENERIC_FETCH_MESSAGE);
}

#[tokio::test]
async fn unauthorized_is_not_retried() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .expect(1)
        .mount(&api)
        .await;

    let server = TestServer::with_ad_api(fast_ad_api(api.uri(), "token"));
    let props = dashboard_props(&server).await;
    assert_eq!(props["error"], GENERIC_FETCH_MESSAGE);
}

#[tokio::test]
async fn missing_token_shows_configuration_error() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&api)
        .await;

    let server = TestServer::with_ad_api(AdApiConfig {
        url: Some(api.uri()),
        ..AdApiConfig::default()
    });
    let props = dashboard_props(&server).await;
    assert_eq!(props["metrics"], json!({}));
    assert_eq!(props["error"], NOT_CONFIGURED_MESSAGE);
}
