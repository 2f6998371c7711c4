//! `search` and `suggest` command handlers.

use std::process::ExitCode;

use anyhow::Context;
use placefinder_core::{load_overrides, AppConfig, OverridesFile, Query};
use placefinder_search::{
    GeocodeClient, OverpassClient, PipelineSettings, SearchPipeline, SortKey,
};

use crate::render;

fn build_pipeline(config: &AppConfig) -> anyhow::Result<SearchPipeline<GeocodeClient, OverpassClient>> {
    let overrides = match &config.overrides_path {
        Some(path) => load_overrides(path)?,
        None => OverridesFile::default(),
    };
    tracing::debug!(entries = overrides.overrides.len(), "override table loaded");

    let geocoder = GeocodeClient::with_base_url(
        &config.geocode_url,
        config.geocode_api_key.as_deref(),
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build geocoding client")?;
    let pois = OverpassClient::with_endpoint(
        &config.overpass_url,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build Overpass client")?;

    Ok(SearchPipeline::new(
        geocoder,
        pois,
        PipelineSettings::from_app_config(config, overrides),
    ))
}

/// Runs one search and prints the results.
///
/// Search outcomes without results (not found, no match, service failure)
/// print a user-facing message to stderr and exit non-zero.
///
/// # Errors
///
/// Returns an error if the override table or the HTTP clients cannot be set up.
pub(crate) async fn run_search(
    config: &AppConfig,
    location: String,
    cuisine: Option<String>,
    sort: SortKey,
    ascending: bool,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let pipeline = build_pipeline(config)?;
    let query = Query::new(location, cuisine);

    match pipeline.search(&query, sort, ascending).await {
        Ok(results) => {
            let output = if json {
                render::search_json(&results)?
            } else {
                render::search_text(&results)
            };
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "search ended without results");
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Prints autocomplete suggestions, one per line.
///
/// # Errors
///
/// Returns an error if the override table or the HTTP clients cannot be set up.
pub(crate) async fn run_suggest(config: &AppConfig, text: &str) -> anyhow::Result<ExitCode> {
    let pipeline = build_pipeline(config)?;
    for name in pipeline.suggest(text).await {
        println!("{name}");
    }
    Ok(ExitCode::SUCCESS)
}
