use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_when_env_is_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.geocode_url, "https://geocode.maps.co");
    assert!(cfg.geocode_api_key.is_none());
    assert_eq!(cfg.overpass_url, "https://overpass-api.de/api/interpreter");
    assert_eq!(cfg.countries_url, "https://restcountries.com/v3.1");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "placefinder/0.1 (poi-search)");
    assert_eq!(cfg.scope, ScopePolicy::BoundingBox);
    assert_eq!(cfg.search_radius_m, 2000);
    assert_eq!(cfg.poi_tag.to_string(), "amenity=restaurant");
    assert_eq!(cfg.filter_tag, "cuisine");
    assert_eq!(cfg.suggest_limit, 5);
    assert!(cfg.overrides_path.is_none());
}

#[test]
fn scope_accepts_radius_case_insensitively() {
    let mut map = HashMap::new();
    map.insert("PLACEFINDER_SCOPE", "Radius");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scope, ScopePolicy::Radius);
}

#[test]
fn scope_rejects_unknown_value() {
    let mut map = HashMap::new();
    map.insert("PLACEFINDER_SCOPE", "polygon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PLACEFINDER_SCOPE"),
        "expected InvalidEnvVar(PLACEFINDER_SCOPE), got: {result:?}"
    );
}

#[test]
fn poi_tag_override_is_parsed() {
    let mut map = HashMap::new();
    map.insert("PLACEFINDER_POI_TAG", "amenity = cafe");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.poi_tag.key, "amenity");
    assert_eq!(cfg.poi_tag.value, "cafe");
}

#[test]
fn poi_tag_without_equals_is_invalid() {
    let mut map = HashMap::new();
    map.insert("PLACEFINDER_POI_TAG", "restaurant");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PLACEFINDER_POI_TAG"),
        "expected InvalidEnvVar(PLACEFINDER_POI_TAG), got: {result:?}"
    );
}

#[test]
fn poi_tag_with_quote_is_invalid() {
    let mut map = HashMap::new();
    map.insert("PLACEFINDER_POI_TAG", "amenity=re\"staurant");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn filter_tag_must_be_a_plain_key() {
    let mut map = HashMap::new();
    map.insert("PLACEFINDER_FILTER_TAG", "cuisine\"]");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PLACEFINDER_FILTER_TAG"),
        "expected InvalidEnvVar(PLACEFINDER_FILTER_TAG), got: {result:?}"
    );
}

#[test]
fn search_radius_override() {
    let mut map = HashMap::new();
    map.insert("PLACEFINDER_SEARCH_RADIUS_M", "5000");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.search_radius_m, 5000);
}

#[test]
fn search_radius_invalid() {
    let mut map = HashMap::new();
    map.insert("PLACEFINDER_SEARCH_RADIUS_M", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PLACEFINDER_SEARCH_RADIUS_M"),
        "expected InvalidEnvVar(PLACEFINDER_SEARCH_RADIUS_M), got: {result:?}"
    );
}

#[test]
fn search_radius_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("PLACEFINDER_SEARCH_RADIUS_M", "0");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("PLACEFINDER_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PLACEFINDER_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(PLACEFINDER_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn blank_api_key_is_treated_as_absent() {
    let mut map = HashMap::new();
    map.insert("PLACEFINDER_GEOCODE_API_KEY", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.geocode_api_key.is_none());
}

#[test]
fn debug_output_redacts_api_key() {
    let mut map = HashMap::new();
    map.insert("PLACEFINDER_GEOCODE_API_KEY", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn overrides_path_is_read_when_set() {
    let mut map = HashMap::new();
    map.insert("PLACEFINDER_OVERRIDES_PATH", "./config/overrides.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.overrides_path.as_deref(),
        Some(std::path::Path::new("./config/overrides.yaml"))
    );
}
