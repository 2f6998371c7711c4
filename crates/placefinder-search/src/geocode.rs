//! HTTP client for a Nominatim-compatible geocoding API (`geocode.maps.co`
//! by default).

use reqwest::{Client, Url};

use crate::error::ClientError;
use crate::http::{build_client, get_json, join, parse_base_url};
use crate::types::GeocodePlace;

const DEFAULT_BASE_URL: &str = "https://geocode.maps.co/";

/// Client for the geocoder's `/search` endpoint.
///
/// Use [`GeocodeClient::new`] for production or
/// [`GeocodeClient::with_base_url`] to point at a mock server in tests.
pub struct GeocodeClient {
    client: Client,
    search_endpoint: Url,
    api_key: Option<String>,
}

impl GeocodeClient {
    /// Creates a client pointed at the public geocoder.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, timeout_secs, user_agent)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`ClientError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        base_url: &str,
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let client = build_client(timeout_secs, user_agent)?;
        let search_endpoint = join(&parse_base_url(base_url)?, "search")?;
        Ok(Self {
            client,
            search_endpoint,
            api_key: api_key.map(str::to_owned),
        })
    }

    /// Geocodes free text. Results come back in the provider's relevance
    /// order; an empty vector means nothing matched.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::UnexpectedStatus`] on a non-2xx status.
    /// - [`ClientError::Deserialize`] if the body is not an array of places.
    pub async fn search(
        &self,
        text: &str,
        limit: Option<u32>,
    ) -> Result<Vec<GeocodePlace>, ClientError> {
        let url = self.search_url(text, limit);
        let places: Vec<GeocodePlace> =
            get_json(&self.client, url, &format!("geocode(q={text})")).await?;
        tracing::debug!(query = text, count = places.len(), "geocoder responded");
        Ok(places)
    }

    fn search_url(&self, text: &str, limit: Option<u32>) -> Url {
        let mut url = self.search_endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", text);
            pairs.append_pair("format", "json");
            if let Some(limit) = limit {
                pairs.append_pair("limit", &limit.to_string());
            }
            if let Some(key) = &self.api_key {
                pairs.append_pair("api_key", key);
            }
        }
        url
    }
}
