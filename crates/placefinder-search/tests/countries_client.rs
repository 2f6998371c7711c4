//! Integration tests for `CountriesClient` using wiremock HTTP mocks.

use placefinder_search::normalize::normalize_country;
use placefinder_search::{ClientError, CountriesClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> CountriesClient {
    CountriesClient::with_base_url(base_url, 30, "placefinder-test")
        .expect("client construction should not fail")
}

#[tokio::test]
async fn fetch_all_parses_nested_country_objects() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "name": { "common": "Rwanda", "official": "Republic of Rwanda" },
            "capital": ["Kigali"],
            "region": "Africa",
            "population": 12952209,
            "currencies": { "RWF": { "name": "Rwandan franc", "symbol": "Fr" } },
            "languages": { "eng": "English", "fra": "French", "kin": "Kinyarwanda" },
            "flags": { "png": "https://flagcdn.com/w320/rw.png", "svg": "https://flagcdn.com/rw.svg" }
        },
        {
            "name": { "common": "Antarctica", "official": "Antarctica" },
            "region": "Antarctic",
            "population": 1000
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/v3.1", server.uri()));
    let raw = client.fetch_all().await.expect("should parse countries");
    assert_eq!(raw.len(), 2);

    let rwanda = normalize_country(&raw[0]).expect("named country");
    assert_eq!(rwanda.capital.as_deref(), Some("Kigali"));
    assert_eq!(rwanda.languages.as_deref(), Some("English, French, Kinyarwanda"));
    assert_eq!(rwanda.currencies.as_deref(), Some("Rwandan franc (Fr)"));

    let antarctica = normalize_country(&raw[1]).expect("named country");
    assert!(antarctica.capital.is_none());

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests[0].url.query(), None, "bulk fetch takes no parameters");
}

#[tokio::test]
async fn server_error_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_all().await.unwrap_err();
    assert!(matches!(err, ClientError::UnexpectedStatus { status: 500, .. }));
}
