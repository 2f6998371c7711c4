//! Search inputs and display-ready records.
//!
//! [`PointOfInterest`] is the raw shape pulled out of an Overpass element's
//! tags; [`DisplayRecord`] is what renderers receive. Display records are
//! derived once per search and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// A user search: free-text location plus an optional cuisine/country filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub location_text: String,
    pub filter: Option<String>,
}

impl Query {
    #[must_use]
    pub fn new(location_text: impl Into<String>, filter: Option<String>) -> Self {
        Self {
            location_text: location_text.into(),
            filter,
        }
    }

    /// Location text with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed_location(&self) -> &str {
        self.location_text.trim()
    }

    /// Filter text, trimmed, or `None` when absent or blank.
    #[must_use]
    pub fn trimmed_filter(&self) -> Option<&str> {
        self.filter
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
    }
}

/// Bounding box of a geocoded place, in geocoder order: south, north, west, east.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

/// A geocoded place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub bounding_box: Option<BoundingBox>,
}

impl GeoLocation {
    /// First comma-separated component of the display name, e.g. `"Kigali"`
    /// for `"Kigali, Rwanda"`.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.display_name
            .split(',')
            .next()
            .map_or("", str::trim)
    }
}

/// A candidate point of interest as returned by the data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub opening_hours: Option<String>,
    pub smoking: Option<String>,
    pub wheelchair: Option<String>,
}

/// Normalized point of interest handed to the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub name: String,
    #[serde(default)]
    pub category_label: Option<String>,
    #[serde(default)]
    pub formatted_address: String,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub smoking: Option<String>,
    #[serde(default)]
    pub wheelchair: Option<String>,
}

/// Normalized country from the bulk countries feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub name: String,
    pub official_name: Option<String>,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: u64,
    pub currencies: Option<String>,
    pub languages: Option<String>,
    pub flag_url: Option<String>,
}
