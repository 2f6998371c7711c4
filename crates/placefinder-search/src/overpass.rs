//! Overpass QL query building and the interpreter HTTP client.

use placefinder_core::{GeoLocation, PoiTag, ScopePolicy};
use reqwest::{Client, Url};

use crate::error::ClientError;
use crate::http::{build_client, get_json, parse_endpoint};
use crate::types::{OverpassElement, OverpassResponse};

const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Server-side timeout embedded in every query, in seconds.
const QUERY_TIMEOUT_SECS: u64 = 25;

/// Geographic scope of a candidate query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryScope {
    /// `(south, west, north, east)` in Overpass order.
    BoundingBox {
        south: f64,
        west: f64,
        north: f64,
        east: f64,
    },
    Around {
        radius_m: u32,
        latitude: f64,
        longitude: f64,
    },
}

impl QueryScope {
    /// Picks the scope for `location`: its bounding box when the policy
    /// allows and one exists, otherwise a radius around the point.
    #[must_use]
    pub fn for_location(location: &GeoLocation, policy: ScopePolicy, radius_m: u32) -> Self {
        match (policy, location.bounding_box) {
            (ScopePolicy::BoundingBox, Some(bbox)) => QueryScope::BoundingBox {
                south: bbox.south,
                west: bbox.west,
                north: bbox.north,
                east: bbox.east,
            },
            _ => QueryScope::Around {
                radius_m,
                latitude: location.latitude,
                longitude: location.longitude,
            },
        }
    }

    fn to_ql(self) -> String {
        match self {
            QueryScope::BoundingBox {
                south,
                west,
                north,
                east,
            } => format!("({south},{west},{north},{east})"),
            QueryScope::Around {
                radius_m,
                latitude,
                longitude,
            } => format!("(around:{radius_m},{latitude},{longitude})"),
        }
    }
}

/// Escapes a value for use inside a double-quoted Overpass QL string.
fn ql_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Builds the Overpass QL for `tag` within `scope`.
///
/// When `filter` is `Some((tag_key, text))`, elements must also have
/// `tag_key` matching `text` case-insensitively. The text is matched
/// literally: regex metacharacters are escaped.
#[must_use]
pub fn build_query(tag: &PoiTag, filter: Option<(&str, &str)>, scope: QueryScope) -> String {
    let mut selector = format!(
        "[\"{}\"=\"{}\"]",
        ql_string(&tag.key),
        ql_string(&tag.value)
    );
    if let Some((filter_key, text)) = filter {
        let pattern = ql_string(&regex::escape(text));
        selector.push_str(&format!("[\"{}\"~\"{pattern}\",i]", ql_string(filter_key)));
    }

    format!(
        "[out:json][timeout:{QUERY_TIMEOUT_SECS}];\n(\n  nwr{selector}{};\n);\nout tags;",
        scope.to_ql()
    )
}

/// Client for the Overpass interpreter endpoint.
pub struct OverpassClient {
    client: Client,
    endpoint: Url,
}

impl OverpassClient {
    /// Creates a client pointed at the public Overpass instance.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        Self::with_endpoint(DEFAULT_ENDPOINT, timeout_secs, user_agent)
    }

    /// Creates a client for a specific interpreter URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ClientError::InvalidBaseUrl`] if `endpoint` does not parse.
    pub fn with_endpoint(
        endpoint: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            endpoint: parse_endpoint(endpoint)?,
        })
    }

    /// Runs an Overpass QL query and returns the raw elements.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::UnexpectedStatus`] on a non-2xx status (Overpass
    ///   answers 429/504 when overloaded).
    /// - [`ClientError::Deserialize`] if the body is not an element envelope.
    pub async fn fetch_elements(&self, query: &str) -> Result<Vec<OverpassElement>, ClientError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("data", query);

        let response: OverpassResponse = get_json(&self.client, url, "overpass query").await?;
        tracing::debug!(count = response.elements.len(), "overpass responded");
        Ok(response.elements)
    }
}
