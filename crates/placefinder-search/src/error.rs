use thiserror::Error;

/// Errors raised by the HTTP clients for the remote collaborators.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Which remote collaborator a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Geocoding,
    PointsOfInterest,
    Countries,
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Service::Geocoding => write!(f, "geocoding"),
            Service::PointsOfInterest => write!(f, "points-of-interest"),
            Service::Countries => write!(f, "countries"),
        }
    }
}

/// Terminal outcomes of a search other than a populated result list.
///
/// Every variant maps to exactly one user-facing message via
/// [`SearchError::user_message`].
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid query: {reason}")]
    Validation { reason: String },

    #[error("no location found for \"{query}\"")]
    LocationNotFound { query: String },

    #[error("{service} service unavailable: {source}")]
    ServiceUnavailable {
        service: Service,
        #[source]
        source: ClientError,
    },

    #[error("no results near {location}")]
    NoResults { location: String },

    #[error("no results match filter \"{filter}\"")]
    FilterNoMatch { filter: String },

    /// A newer search started before this one completed.
    #[error("search superseded by a newer request")]
    Superseded,
}

impl SearchError {
    /// Message suitable for showing to an end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SearchError::Validation { .. } => "Please enter a location.".to_string(),
            SearchError::LocationNotFound { .. } => {
                "Location not found. Please try a different name.".to_string()
            }
            SearchError::ServiceUnavailable { .. } => {
                "An error occurred. Please try again later.".to_string()
            }
            SearchError::NoResults { .. } => {
                "No results found. Try a different location or filter.".to_string()
            }
            SearchError::FilterNoMatch { filter } => {
                format!("No results for \"{filter}\". Try a different filter.")
            }
            SearchError::Superseded => "A newer search replaced this one.".to_string(),
        }
    }
}
