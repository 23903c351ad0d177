//! Tests for the HTTP module

use super::*;
use crate::error::Error;
use crate::pagination::OffsetPaginator;
use pretty_assertions::assert_eq;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde_json::json;
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// HttpResponse
// ============================================================================

#[test]
fn test_response_json_decodes_body() {
    let response = HttpResponse::new(
        StatusCode::OK,
        HeaderMap::new(),
        json!({"total": 20}).to_string(),
    );

    let body = response.json().unwrap();
    assert_eq!(body["total"], 20);

    // Cached: a second access returns the same decoded value.
    let again = response.json().unwrap();
    assert!(std::ptr::eq(body, again));
}

#[test]
fn test_response_json_decode_failure() {
    let response = HttpResponse::new(StatusCode::OK, HeaderMap::new(), "definitely not json");
    let err = response.json().unwrap_err();
    assert!(matches!(err, Error::ResponseDecode(_)));
}

#[test_case("<http://example.com/p2>; rel=\"next\"", Some("http://example.com/p2") ; "double quoted rel")]
#[test_case("<http://example.com/p2>; rel='next'", Some("http://example.com/p2") ; "single quoted rel")]
#[test_case("<http://example.com/p2>; rel=next", Some("http://example.com/p2") ; "bare rel")]
#[test_case("<http://example.com/p1>; rel=\"prev\", <http://example.com/p2>; rel=\"next\"", Some("http://example.com/p2") ; "multiple relations")]
#[test_case("<http://example.com/p1>; rel=\"prev\"", None ; "no next relation")]
#[test_case("", None ; "empty header")]
fn test_response_link_parsing(header: &'static str, expected: Option<&str>) {
    let mut headers = HeaderMap::new();
    headers.insert("link", HeaderValue::from_static(header));
    let response = HttpResponse::new(StatusCode::OK, headers, "{}");

    assert_eq!(response.link("next").as_deref(), expected);
}

#[test]
fn test_response_links_merges_multiple_headers() {
    let mut headers = HeaderMap::new();
    headers.append(
        "link",
        HeaderValue::from_static("<http://example.com/p2>; rel=\"next\""),
    );
    headers.append(
        "link",
        HeaderValue::from_static("<http://example.com/p1>; rel=\"prev\""),
    );
    let response = HttpResponse::new(StatusCode::OK, headers, "{}");

    let links = response.links();
    assert_eq!(links.get("next"), Some(&"http://example.com/p2".to_string()));
    assert_eq!(links.get("prev"), Some(&"http://example.com/p1".to_string()));
}

// ============================================================================
// ClientConfig
// ============================================================================

#[test]
fn test_client_config_default() {
    let config = ClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 3);
    assert!(config.base_url.is_none());
}

#[test]
fn test_client_config_builder() {
    let config = ClientConfig::builder()
        .base_url("https://api.example.com")
        .timeout(Duration::from_secs(60))
        .max_retries(5)
        .backoff(Duration::from_millis(200), Duration::from_secs(30))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, Some("https://api.example.com".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.initial_backoff, Duration::from_millis(200));
    assert_eq!(config.max_backoff, Duration::from_secs(30));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

// ============================================================================
// RestClient
// ============================================================================

fn test_client(base_url: String) -> RestClient {
    RestClient::with_config(
        ClientConfig::builder()
            .base_url(base_url)
            .backoff(Duration::from_millis(1), Duration::from_millis(10))
            .build(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_client_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 1}]
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let response = client.get("/api/items").await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.json().unwrap()["items"][0]["id"], 1);
}

#[tokio::test]
async fn test_client_get_client_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let err = client.get("/missing").await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_client_retries_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let response = client.get("/flaky").await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_client_gives_up_after_max_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = RestClient::with_config(
        ClientConfig::builder()
            .base_url(mock_server.uri())
            .max_retries(1)
            .backoff(Duration::from_millis(1), Duration::from_millis(2))
            .build(),
    )
    .unwrap();

    let err = client.get("/down").await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_client_sends_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 5})))
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let mut pages = client.paginate("/items", OffsetPaginator::new(0, 10));

    let page = pages.next_page().await.unwrap().unwrap();
    assert_eq!(page.json().unwrap()["total"], 5);
}

#[tokio::test]
async fn test_check_connection_ok() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let (ok, message) = client.check_connection("/ping").await;

    assert!(ok);
    assert!(message.is_empty());
}

#[tokio::test]
async fn test_check_connection_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let (ok, message) = client.check_connection("/ping").await;

    assert!(!ok);
    assert!(message.contains("401"));
}
