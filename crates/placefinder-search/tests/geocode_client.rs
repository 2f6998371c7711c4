//! Integration tests for `GeocodeClient` using wiremock HTTP mocks.

use placefinder_search::{ClientError, GeocodeClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str, api_key: Option<&str>) -> GeocodeClient {
    GeocodeClient::with_base_url(base_url, api_key, 30, "placefinder-test")
        .expect("client construction should not fail")
}

#[tokio::test]
async fn search_returns_places_in_provider_order() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "display_name": "Kigali, Rwanda",
            "lat": "-1.9500",
            "lon": "30.0588",
            "boundingbox": ["-2.1", "-1.8", "29.9", "30.3"],
            "type": "city",
            "importance": 0.71
        },
        {
            "display_name": "Kigali Province, Rwanda",
            "lat": -1.9,
            "lon": 30.1,
            "type": "state"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Kigali"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), None);
    let places = client.search("Kigali", None).await.expect("should parse places");

    assert_eq!(places.len(), 2);
    let first = places[0].to_location();
    assert_eq!(first.short_name(), "Kigali");
    assert!((first.latitude + 1.95).abs() < 1e-9);
    let bbox = first.bounding_box.expect("bbox should parse");
    assert!((bbox.west - 29.9).abs() < 1e-9);
    assert!(places[1].bounding_box().is_none());
}

#[tokio::test]
async fn search_sends_limit_and_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("limit", "5"))
        .and(query_param("api_key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), Some("secret"));
    let places = client.search("Kig", Some(5)).await.expect("should succeed");
    assert!(places.is_empty());
}

#[tokio::test]
async fn base_url_with_path_prefix_is_preserved() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/v1", server.uri()), None);
    client.search("Kigali", None).await.expect("should succeed");
}

#[tokio::test]
async fn non_success_status_is_reported_without_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), Some("secret"));
    let err = client.search("Kigali", None).await.unwrap_err();
    match err {
        ClientError::UnexpectedStatus { status, url } => {
            assert_eq!(status, 401);
            assert!(!url.contains("secret"), "api key leaked into error: {url}");
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), None);
    let err = client.search("Kigali", None).await.unwrap_err();
    assert!(matches!(err, ClientError::Deserialize { .. }), "{err:?}");
}
