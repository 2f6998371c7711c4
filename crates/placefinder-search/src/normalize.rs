//! Normalization from raw source records into display-ready records.

use placefinder_core::{CountryRecord, DisplayRecord, PointOfInterest};

use crate::types::RawCountry;

/// Converts a [`PointOfInterest`] into a [`DisplayRecord`].
///
/// Returns `None` when the record has no usable name.
#[must_use]
pub fn normalize_poi(raw: &PointOfInterest) -> Option<DisplayRecord> {
    let name = raw
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())?;

    Some(DisplayRecord {
        name: name.to_owned(),
        category_label: raw.category.as_deref().map(category_label),
        formatted_address: format_address(raw),
        website_url: raw.website.as_deref().and_then(normalize_website),
        phone: raw.phone.clone(),
        opening_hours: raw.opening_hours.clone(),
        country: raw.country.clone(),
        smoking: raw.smoking.clone(),
        wheelchair: raw.wheelchair.clone(),
    })
}

/// Builds a single-line address: `"<house number> <street>"`, city, country,
/// joined with `", "` and skipping empty parts.
#[must_use]
pub fn format_address(raw: &PointOfInterest) -> String {
    let part = |v: &Option<String>| {
        v.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    };

    let line1 = [part(&raw.house_number), part(&raw.street)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

    [Some(line1), part(&raw.city), part(&raw.country)]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Makes a website link absolute, prefixing `https://` when no scheme is
/// present. Returns `None` for blank input.
#[must_use]
pub fn normalize_website(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if has_scheme(trimmed) {
        return Some(trimmed.to_owned());
    }
    let without_slashes = trimmed.trim_start_matches('/');
    Some(format!("https://{without_slashes}"))
}

/// `scheme://` per RFC 3986: a letter followed by letters, digits, `+`, `-` or `.`.
fn has_scheme(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// OSM stores multiple cuisines as `a;b`; show them as `a, b`.
pub(crate) fn category_label(raw: &str) -> String {
    raw.split(';')
        .map(|s| s.trim().replace('_', " "))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Converts a bulk-feed country into a [`CountryRecord`].
///
/// Returns `None` when the country has no common name.
#[must_use]
pub fn normalize_country(raw: &RawCountry) -> Option<CountryRecord> {
    let name_block = raw.name.as_ref()?;
    let name = name_block
        .common
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())?;

    let join_non_empty = |items: Vec<String>| {
        let joined = items
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        (!joined.is_empty()).then_some(joined)
    };

    let currencies: Vec<String> = raw
        .currencies
        .iter()
        .map(|(code, currency)| {
            let label = currency.name.clone().unwrap_or_else(|| code.clone());
            match currency.symbol.as_deref().filter(|s| !s.is_empty()) {
                Some(symbol) => format!("{label} ({symbol})"),
                None => label,
            }
        })
        .collect();

    Some(CountryRecord {
        name: name.to_owned(),
        official_name: name_block.official.clone(),
        capital: join_non_empty(raw.capital.clone()),
        region: raw.region.clone().filter(|r| !r.is_empty()),
        population: raw.population,
        currencies: join_non_empty(currencies),
        languages: join_non_empty(raw.languages.values().cloned().collect()),
        flag_url: raw
            .flags
            .as_ref()
            .and_then(|f| f.png.clone().or_else(|| f.svg.clone())),
    })
}
