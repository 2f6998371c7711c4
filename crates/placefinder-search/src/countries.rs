//! HTTP client for the REST Countries bulk feed.

use reqwest::{Client, Url};

use crate::error::ClientError;
use crate::http::{build_client, get_json, join, parse_base_url};
use crate::types::RawCountry;

const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1/";

/// Client for `GET {base}/all`, fetched in one call with no query parameters.
pub struct CountriesClient {
    client: Client,
    all_endpoint: Url,
}

impl CountriesClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, user_agent)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ClientError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            all_endpoint: join(&parse_base_url(base_url)?, "all")?,
        })
    }

    /// Fetches every country.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::UnexpectedStatus`] on a non-2xx status.
    /// - [`ClientError::Deserialize`] if the body is not an array of countries.
    pub async fn fetch_all(&self) -> Result<Vec<RawCountry>, ClientError> {
        let countries: Vec<RawCountry> =
            get_json(&self.client, self.all_endpoint.clone(), "countries/all").await?;
        tracing::debug!(count = countries.len(), "countries feed responded");
        Ok(countries)
    }
}
