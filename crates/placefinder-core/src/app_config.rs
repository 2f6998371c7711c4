use std::path::PathBuf;

/// How candidate queries are scoped around a geocoded place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopePolicy {
    /// Use the geocoder's bounding box when it has one, else fall back to a radius.
    BoundingBox,
    /// Always search a fixed radius around the geocoded point.
    Radius,
}

impl std::fmt::Display for ScopePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopePolicy::BoundingBox => write!(f, "bbox"),
            ScopePolicy::Radius => write!(f, "radius"),
        }
    }
}

/// An OSM tag selector such as `amenity=restaurant`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoiTag {
    pub key: String,
    pub value: String,
}

impl std::fmt::Display for PoiTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub geocode_url: String,
    pub geocode_api_key: Option<String>,
    pub overpass_url: String,
    pub countries_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub scope: ScopePolicy,
    pub search_radius_m: u32,
    pub poi_tag: PoiTag,
    pub filter_tag: String,
    pub suggest_limit: u32,
    pub overrides_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("geocode_url", &self.geocode_url)
            .field(
                "geocode_api_key",
                &self.geocode_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("overpass_url", &self.overpass_url)
            .field("countries_url", &self.countries_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("scope", &self.scope)
            .field("search_radius_m", &self.search_radius_m)
            .field("poi_tag", &self.poi_tag)
            .field("filter_tag", &self.filter_tag)
            .field("suggest_limit", &self.suggest_limit)
            .field("overrides_path", &self.overrides_path)
            .finish()
    }
}
