//! Integration tests for `OverpassClient` using wiremock HTTP mocks.

use placefinder_search::{ClientError, OverpassClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(endpoint: &str) -> OverpassClient {
    OverpassClient::with_endpoint(endpoint, 30, "placefinder-test")
        .expect("client construction should not fail")
}

#[tokio::test]
async fn fetch_elements_sends_query_as_data_param() {
    let server = MockServer::start().await;
    let ql = "[out:json][timeout:25];\nnwr[\"amenity\"=\"restaurant\"](around:2000,-1.95,30.06);\nout tags;";

    let body = serde_json::json!({
        "version": 0.6,
        "elements": [
            {
                "type": "node",
                "id": 42,
                "lat": -1.95,
                "lon": 30.06,
                "tags": {
                    "amenity": "restaurant",
                    "name": "Repub Lounge",
                    "cuisine": "african",
                    "contact:website": "republounge.rw"
                }
            },
            { "type": "way", "id": 43 }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/interpreter"))
        .and(query_param("data", ql))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/api/interpreter", server.uri()));
    let elements = client.fetch_elements(ql).await.expect("should parse elements");

    assert_eq!(elements.len(), 2);
    let poi = elements[0].to_point_of_interest("cuisine");
    assert_eq!(poi.name.as_deref(), Some("Repub Lounge"));
    assert_eq!(poi.category.as_deref(), Some("african"));
    assert_eq!(poi.website.as_deref(), Some("republounge.rw"));
    assert!(elements[1].tags.is_empty());
}

#[tokio::test]
async fn overloaded_server_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_elements("out;").await.unwrap_err();
    assert!(
        matches!(err, ClientError::UnexpectedStatus { status: 429, .. }),
        "{err:?}"
    );
}

#[test]
fn invalid_endpoint_is_rejected() {
    let result = OverpassClient::with_endpoint("not a url", 30, "placefinder-test");
    assert!(matches!(result, Err(ClientError::InvalidBaseUrl { .. })));
}
