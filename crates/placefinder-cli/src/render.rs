//! Plain-text and JSON rendering of search and countries results.

use placefinder_core::{CountryRecord, DisplayRecord};
use placefinder_search::{ResultSource, SearchResults};

/// Title, count line, then one card per record separated by blank lines.
pub(crate) fn search_text(results: &SearchResults) -> String {
    let note = match &results.source {
        ResultSource::Live => "",
        ResultSource::Override { .. } => " (curated)",
        ResultSource::OverrideAfterFailure { .. } => " (curated; live search unavailable)",
    };
    let mut out = format!(
        "{}\n{} found{note}\n",
        results.title,
        results.records.len()
    );

    for record in &results.records {
        out.push('\n');
        out.push_str(&card(record));
    }
    out
}

fn card(record: &DisplayRecord) -> String {
    let mut out = format!("{}\n", record.name);
    let fields = [
        ("Cuisine", record.category_label.as_deref()),
        (
            "Address",
            Some(record.formatted_address.as_str()).filter(|a| !a.is_empty()),
        ),
        ("Website", record.website_url.as_deref()),
        ("Phone", record.phone.as_deref()),
        ("Hours", record.opening_hours.as_deref()),
        ("Smoking", record.smoking.as_deref()),
        ("Wheelchair", record.wheelchair.as_deref()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            out.push_str(&format!("  {label:<11}{value}\n"));
        }
    }
    out
}

pub(crate) fn search_json(results: &SearchResults) -> anyhow::Result<String> {
    let value = serde_json::json!({
        "title": results.title,
        "count": results.records.len(),
        "source": results.source,
        "records": results.records,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

/// One row per country, truncating long names the way table output does.
pub(crate) fn countries_text(countries: &[CountryRecord]) -> String {
    let mut out = format!(
        "{:<32}{:<20}{:<12}{:>14}\n",
        "NAME", "CAPITAL", "REGION", "POPULATION"
    );
    for country in countries {
        out.push_str(&format!(
            "{:<32}{:<20}{:<12}{:>14}\n",
            truncate(&country.name, 30),
            truncate(country.capital.as_deref().unwrap_or("-"), 18),
            country.region.as_deref().unwrap_or("-"),
            country.population
        ));
    }
    out.push_str(&format!("{} countries", countries.len()));
    out
}

pub(crate) fn countries_json(countries: &[CountryRecord]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(countries)?)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars - 3).collect::<String>())
    } else {
        text.to_owned()
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
