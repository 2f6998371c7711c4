//! Shared domain types and configuration for placefinder.

pub mod app_config;
pub mod config;
pub mod overrides;
pub mod records;

use thiserror::Error;

pub use app_config::{AppConfig, PoiTag, ScopePolicy};
pub use config::{load_app_config, load_app_config_from_env};
pub use overrides::{load_overrides, parse_overrides, OverrideEntry, OverrideMode, OverridesFile};
pub use records::{BoundingBox, CountryRecord, DisplayRecord, GeoLocation, PointOfInterest, Query};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read overrides file {path}: {source}")]
    OverridesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse overrides file: {0}")]
    OverridesFileParse(#[source] serde_yaml::Error),

    #[error("invalid override table: {0}")]
    Validation(String),
}
