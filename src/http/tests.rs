//! Tests for the HTTP transport module

use super::*;
use crate::options::RequestOptions;
use crate::types::Method;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .header("X-Engage-Api-Key", "secret")
        .build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert!(config.default_headers.is_empty());
    assert!(!config.verbose);
    assert!(config.user_agent.starts_with("engage-api/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://example.campuslabs.com/engage/api")
        .timeout(Duration::from_secs(60))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .verbose(true)
        .build();

    assert_eq!(
        config.base_url,
        Some("https://example.campuslabs.com/engage/api".to_string())
    );
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
    assert!(config.verbose);
}

#[test]
fn test_build_url() {
    let config = HttpClientConfig::builder()
        .base_url("https://example.com/engage/api/")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(
        client.build_url("Events"),
        "https://example.com/engage/api/Events"
    );
    assert_eq!(
        client.build_url("/Events/12"),
        "https://example.com/engage/api/Events/12"
    );
    assert_eq!(
        client.build_url("https://other.example.com/x"),
        "https://other.example.com/x"
    );
}

#[test]
fn test_debug_hides_headers() {
    let config = HttpClientConfig::builder()
        .header("X-Engage-Api-Key", "super-secret")
        .build();
    let client = HttpClient::with_config(config).unwrap();
    assert!(!format!("{client:?}").contains("super-secret"));
}

#[tokio::test]
async fn test_send_get_with_query_and_api_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Events"))
        .and(header("X-Engage-Api-Key", "secret"))
        .and(query_param("pageSize", "500"))
        .and(query_param("status", "Approved"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = RequestOptions::new()
        .page_size(500)
        .param("status", "Approved");
    let response = client_for(&mock_server)
        .send(Method::GET, "Events", &options)
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, r#"{"items":[]}"#);
}

#[tokio::test]
async fn test_send_post_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Memberships"))
        .and(body_json(json!({"userId": 7, "organizationId": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = RequestOptions::new()
        .param("userId", 7)
        .param("organizationId", 3);
    let response = client_for(&mock_server)
        .send(Method::POST, "Memberships", &options)
        .await
        .unwrap();

    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_send_returns_error_statuses_as_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/Memberships/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"Not found"}"#))
        .mount(&mock_server)
        .await;

    let response = client_for(&mock_server)
        .send(Method::DELETE, "Memberships/99", &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(response.status, 404);
    assert_eq!(response.body, r#"{"message":"Not found"}"#);
}

#[tokio::test]
async fn test_send_connection_refused_is_http_error() {
    let config = HttpClientConfig::builder()
        .base_url("http://127.0.0.1:1")
        .timeout(Duration::from_secs(2))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let err = client
        .send(Method::GET, "Users", &RequestOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, crate::Error::Http(_)));
}
