use crate::app_config::{AppConfig, PoiTag, ScopePolicy};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let log_level = or_default("PLACEFINDER_LOG_LEVEL", "info");
    let geocode_url = or_default("PLACEFINDER_GEOCODE_URL", "https://geocode.maps.co");
    let geocode_api_key = lookup("PLACEFINDER_GEOCODE_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());
    let overpass_url = or_default(
        "PLACEFINDER_OVERPASS_URL",
        "https://overpass-api.de/api/interpreter",
    );
    let countries_url = or_default("PLACEFINDER_COUNTRIES_URL", "https://restcountries.com/v3.1");

    let request_timeout_secs = parse_u64("PLACEFINDER_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "PLACEFINDER_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let user_agent = or_default("PLACEFINDER_USER_AGENT", "placefinder/0.1 (poi-search)");

    let scope = parse_scope(&or_default("PLACEFINDER_SCOPE", "bbox"))?;
    let search_radius_m = parse_u32("PLACEFINDER_SEARCH_RADIUS_M", "2000")?;
    if search_radius_m == 0 {
        return Err(invalid(
            "PLACEFINDER_SEARCH_RADIUS_M",
            "must be greater than zero".to_string(),
        ));
    }

    let poi_tag = parse_poi_tag(&or_default("PLACEFINDER_POI_TAG", "amenity=restaurant"))?;
    let filter_tag = or_default("PLACEFINDER_FILTER_TAG", "cuisine");
    if !is_valid_tag_key(&filter_tag) {
        return Err(invalid(
            "PLACEFINDER_FILTER_TAG",
            format!("'{filter_tag}' is not a valid tag key"),
        ));
    }
    let suggest_limit = parse_u32("PLACEFINDER_SUGGEST_LIMIT", "5")?;
    let overrides_path = lookup("PLACEFINDER_OVERRIDES_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        log_level,
        geocode_url,
        geocode_api_key,
        overpass_url,
        countries_url,
        request_timeout_secs,
        user_agent,
        scope,
        search_radius_m,
        poi_tag,
        filter_tag,
        suggest_limit,
        overrides_path,
    })
}

fn parse_scope(s: &str) -> Result<ScopePolicy, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "bbox" => Ok(ScopePolicy::BoundingBox),
        "radius" => Ok(ScopePolicy::Radius),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PLACEFINDER_SCOPE".to_string(),
            reason: format!("unrecognized scope '{other}'; expected bbox or radius"),
        }),
    }
}

/// Parse a `key=value` OSM tag selector.
fn parse_poi_tag(s: &str) -> Result<PoiTag, ConfigError> {
    let invalid = || ConfigError::InvalidEnvVar {
        var: "PLACEFINDER_POI_TAG".to_string(),
        reason: format!("'{s}' is not of the form key=value"),
    };

    let (key, value) = s.split_once('=').ok_or_else(invalid)?;
    let (key, value) = (key.trim(), value.trim());
    if !is_valid_tag_key(key) || value.is_empty() || value.contains('"') {
        return Err(invalid());
    }

    Ok(PoiTag {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// OSM keys are plain identifiers with `:` namespaces, e.g. `addr:city`.
fn is_valid_tag_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '-'))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
