//! Shared `reqwest` plumbing for the geocoding, Overpass and countries clients.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::ClientError;

pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, ClientError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Parses a base URL, normalising it to end with exactly one slash so that
/// [`Url::join`] appends to the path instead of replacing its last segment.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, ClientError> {
    let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })
}

/// Parses an endpoint URL exactly as given (no trailing-slash normalisation).
pub(crate) fn parse_endpoint(url: &str) -> Result<Url, ClientError> {
    Url::parse(url.trim()).map_err(|e| ClientError::InvalidBaseUrl {
        url: url.to_owned(),
        reason: e.to_string(),
    })
}

/// Joins `segment` onto a normalised base URL.
pub(crate) fn join(base: &Url, segment: &str) -> Result<Url, ClientError> {
    base.join(segment).map_err(|e| ClientError::InvalidBaseUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })
}

/// URL with the query string removed, safe to log or embed in errors even
/// when the query carries an API key.
pub(crate) fn redacted(url: &Url) -> String {
    let mut shown = url.clone();
    shown.set_query(None);
    shown.to_string()
}

/// Sends a GET request, asserts a 2xx status, and deserializes the JSON body.
///
/// # Errors
///
/// - [`ClientError::Http`] on network failure.
/// - [`ClientError::UnexpectedStatus`] on a non-2xx status.
/// - [`ClientError::Deserialize`] if the body does not match `T`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: Url,
    context: &str,
) -> Result<T, ClientError> {
    tracing::debug!(url = %redacted(&url), context, "sending request");

    let response = client
        .get(url.clone())
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            url: redacted(&url),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}
