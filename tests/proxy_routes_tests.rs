//! Integration tests for the resource proxy routes.
//!
//! These tests verify the JSONP stock lookup and the JSON product listing
//! against a mock provider, including every soft-failure path.

use imweb_proxy::server::{handlers, router, AppState, JAVASCRIPT_CONTENT_TYPE};
use imweb_proxy::{AccessToken, ProviderEndpoints, ProxyConfig, SiteCode};
use serde_json::json;
use tokio::net::TcpListener;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a configuration pointed at the given provider URL
fn create_test_config(provider_uri: &str) -> ProxyConfig {
    ProxyConfig::builder()
        .site_code(SiteCode::new("S-TEST"))
        .endpoints(ProviderEndpoints::single_host(provider_uri).unwrap())
        .build()
        .unwrap()
}

/// Starts the app and returns its base URL and shared state
async fn spawn_app(config: ProxyConfig) -> (String, AppState) {
    let state = AppState::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), state)
}

/// Fetches a URL and returns (status, content-type, body)
async fn fetch(url: &str) -> (u16, String, String) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();
    let body = response.text().await.unwrap();
    (status, content_type, body)
}

fn missing_input(callback: &str) -> String {
    format!("{callback}({})", handlers::MISSING_INPUT_PAYLOAD)
}

fn stock_failed(callback: &str) -> String {
    format!("{callback}({})", handlers::STOCK_FAILED_PAYLOAD)
}

// ============================================================================
// /stock soft failures
// ============================================================================

#[tokio::test]
async fn test_stock_without_token_is_soft_failure() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&provider)
        .await;

    let (base, _state) = spawn_app(create_test_config(&provider.uri())).await;

    let (status, content_type, body) = fetch(&format!("{base}/stock?prodNo=123&callback=cb")).await;

    assert_eq!(status, 200);
    assert_eq!(content_type, JAVASCRIPT_CONTENT_TYPE);
    assert_eq!(body, "cb({ error: 'Missing prodNo or accessToken' })");
}

#[tokio::test]
async fn test_stock_without_prod_no_is_soft_failure() {
    let provider = MockServer::start().await;
    let (base, state) = spawn_app(create_test_config(&provider.uri())).await;
    state.tokens().store(AccessToken::new("tok")).await;

    for query in ["callback=cb", "callback=cb&prodNo=", "callback=cb&other=1&prodno=5"] {
        let (status, content_type, body) = fetch(&format!("{base}/stock?{query}")).await;
        assert_eq!(status, 200);
        assert_eq!(content_type, JAVASCRIPT_CONTENT_TYPE);
        assert_eq!(body, missing_input("cb"), "query: {query}");
    }
}

#[tokio::test]
async fn test_stock_defaults_callback_name() {
    let provider = MockServer::start().await;
    let (base, _state) = spawn_app(create_test_config(&provider.uri())).await;

    let (_, _, body) = fetch(&format!("{base}/stock")).await;
    assert_eq!(body, missing_input("callback"));

    let (_, _, body) = fetch(&format!("{base}/stock?callback=")).await;
    assert_eq!(body, missing_input("callback"));
}

#[tokio::test]
async fn test_stock_replaces_unsafe_callback_name() {
    let provider = MockServer::start().await;
    let (base, _state) = spawn_app(create_test_config(&provider.uri())).await;

    let (status, _, body) = fetch(&format!(
        "{base}/stock?prodNo=1&callback=alert(document.cookie)%3Bcb"
    ))
    .await;

    assert_eq!(status, 200);
    assert_eq!(body, missing_input("callback"));
    assert!(!body.contains("alert"));
}

// ============================================================================
// /stock provider paths
// ============================================================================

#[tokio::test]
async fn test_stock_returns_counts() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/shop/products/123"))
        .and(query_param("site_code", "S-TEST"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statusCode": 200,
            "data": {"prodNo": 123, "stockCount": 5, "totalCount": 20}
        })))
        .expect(1)
        .mount(&provider)
        .await;

    let (base, state) = spawn_app(create_test_config(&provider.uri())).await;
    state.tokens().store(AccessToken::new("tok")).await;

    let (status, content_type, body) = fetch(&format!("{base}/stock?prodNo=123&callback=cb")).await;

    assert_eq!(status, 200);
    assert_eq!(content_type, JAVASCRIPT_CONTENT_TYPE);
    assert_eq!(body, r#"cb({"stock":5,"total":20})"#);
}

#[tokio::test]
async fn test_stock_defaults_missing_counts_to_zero() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/shop/products/77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"name": "mug"}})))
        .mount(&provider)
        .await;

    let (base, state) = spawn_app(create_test_config(&provider.uri())).await;
    state.tokens().store(AccessToken::new("tok")).await;

    let (_, _, body) = fetch(&format!("{base}/stock?prodNo=77&callback=cb")).await;

    assert_eq!(body, r#"cb({"stock":0,"total":0})"#);
}

#[tokio::test]
async fn test_stock_provider_500_is_jsonp_failure_with_200() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&provider)
        .await;

    let (base, state) = spawn_app(create_test_config(&provider.uri())).await;
    state.tokens().store(AccessToken::new("tok")).await;

    let (status, content_type, body) = fetch(&format!("{base}/stock?prodNo=1&callback=cb")).await;

    assert_eq!(status, 200);
    assert_eq!(content_type, JAVASCRIPT_CONTENT_TYPE);
    assert_eq!(body, "cb({ error: '재고 불러오기 실패' })");
}

#[tokio::test]
async fn test_stock_network_error_is_jsonp_failure() {
    let (base, state) = spawn_app(create_test_config("http://127.0.0.1:1")).await;
    state.tokens().store(AccessToken::new("tok")).await;

    let (status, _, body) = fetch(&format!("{base}/stock?prodNo=1&callback=handleStock")).await;

    assert_eq!(status, 200);
    assert_eq!(body, stock_failed("handleStock"));
}

// ============================================================================
// /products
// ============================================================================

#[tokio::test]
async fn test_products_without_token_is_401() {
    let provider = MockServer::start().await;
    let (base, _state) = spawn_app(create_test_config(&provider.uri())).await;

    let response = reqwest::get(format!("{base}/products")).await.unwrap();

    assert_eq!(response.status(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": handlers::MISSING_TOKEN_ERROR}));
}

#[tokio::test]
async fn test_products_relays_provider_payload() {
    let payload = json!({"statusCode": 200, "data": {"list": [{"prodNo": 1}], "pagenation": {"total": 1}}});
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/shop/products"))
        .and(query_param("site_code", "S-TEST"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .expect(1)
        .mount(&provider)
        .await;

    let (base, state) = spawn_app(create_test_config(&provider.uri())).await;
    state.tokens().store(AccessToken::new("tok")).await;

    let response = reqwest::get(format!("{base}/products")).await.unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, payload);
}

#[tokio::test]
async fn test_products_provider_failure_is_502() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&provider)
        .await;

    let (base, state) = spawn_app(create_test_config(&provider.uri())).await;
    state.tokens().store(AccessToken::new("tok")).await;

    let response = reqwest::get(format!("{base}/products")).await.unwrap();

    assert_eq!(response.status(), 502);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": handlers::PRODUCTS_FAILED_ERROR}));
}

// ============================================================================
// Layers
// ============================================================================

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let provider = MockServer::start().await;
    let (base, _state) = spawn_app(create_test_config(&provider.uri())).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/stock"))
        .header("origin", "https://shop.example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}
