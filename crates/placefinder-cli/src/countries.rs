//! `countries` command handler.

use std::process::ExitCode;

use anyhow::Context;
use placefinder_core::AppConfig;
use placefinder_search::{CountriesClient, CountryCatalog, SortKey};

use crate::render;

/// Fetches the countries feed once and prints the filtered, sorted view.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or JSON output fails.
pub(crate) async fn run_countries(
    config: &AppConfig,
    filter: &str,
    sort: SortKey,
    ascending: bool,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let client = CountriesClient::with_base_url(
        &config.countries_url,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build countries client")?;

    let mut catalog = CountryCatalog::new(client);
    let view = catalog
        .refresh()
        .await
        .and_then(|_| catalog.view(filter, sort, ascending));

    match view {
        Ok(countries) => {
            let output = if json {
                render::countries_json(&countries)?
            } else {
                render::countries_text(&countries)
            };
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "countries view ended without results");
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}
