//! Wire types for the geocoding, Overpass and REST Countries APIs.

use std::collections::{BTreeMap, HashMap};

use placefinder_core::{BoundingBox, GeoLocation, PointOfInterest};
use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Geocoding
// ---------------------------------------------------------------------------

/// One match from the Nominatim-compatible `/search` endpoint.
///
/// `lat`, `lon` and the bounding box are sent as numeric strings by most
/// providers; plain numbers are accepted too.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodePlace {
    pub display_name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub lat: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub lon: f64,
    /// `[south, north, west, east]`.
    #[serde(default)]
    pub boundingbox: Option<Vec<serde_json::Value>>,
    #[serde(default, rename = "type")]
    pub place_type: Option<String>,
}

impl GeocodePlace {
    /// Parsed bounding box, or `None` unless all four edges are numeric.
    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let edges = self.boundingbox.as_ref()?;
        let [south, north, west, east] = edges.as_slice() else {
            return None;
        };
        Some(BoundingBox {
            south: value_as_f64(south)?,
            north: value_as_f64(north)?,
            west: value_as_f64(west)?,
            east: value_as_f64(east)?,
        })
    }

    #[must_use]
    pub fn to_location(&self) -> GeoLocation {
        GeoLocation {
            display_name: self.display_name.clone(),
            latitude: self.lat,
            longitude: self.lon,
            bounding_box: self.bounding_box(),
        }
    }

    /// Whether the geocoder classified this match as a settlement.
    #[must_use]
    pub fn is_settlement(&self) -> bool {
        matches!(self.place_type.as_deref(), Some("city" | "town"))
    }
}

fn value_as_f64(value: &serde_json::Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
        .filter(|v| v.is_finite())
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    value_as_f64(&value).ok_or_else(|| {
        serde::de::Error::custom(format!("expected a number or numeric string, got {value}"))
    })
}

// ---------------------------------------------------------------------------
// Overpass
// ---------------------------------------------------------------------------

/// Envelope returned by the Overpass interpreter: `{ "elements": [...] }`.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

/// A node, way or relation. Only the tags matter downstream; elements
/// emitted by skeleton output have none.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverpassElement {
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl OverpassElement {
    fn tag(&self, key: &str) -> Option<String> {
        self.tags
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    }

    fn tag_or(&self, key: &str, fallback: &str) -> Option<String> {
        self.tag(key).or_else(|| self.tag(fallback))
    }

    /// Lifts the element's tags into a [`PointOfInterest`]. `category_tag`
    /// names the tag used as the category label (usually `cuisine`).
    #[must_use]
    pub fn to_point_of_interest(&self, category_tag: &str) -> PointOfInterest {
        PointOfInterest {
            name: self.tag("name"),
            category: self.tag(category_tag),
            street: self.tag("addr:street"),
            house_number: self.tag("addr:housenumber"),
            city: self.tag("addr:city"),
            country: self.tag("addr:country"),
            website: self.tag_or("website", "contact:website"),
            phone: self.tag_or("phone", "contact:phone"),
            opening_hours: self.tag("opening_hours"),
            smoking: self.tag("smoking"),
            wheelchair: self.tag("wheelchair"),
        }
    }
}

// ---------------------------------------------------------------------------
// REST Countries
// ---------------------------------------------------------------------------

/// One entry of the bulk `/all` countries response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCountry {
    #[serde(default)]
    pub name: Option<RawCountryName>,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub population: u64,
    /// Keyed by ISO 4217 code.
    #[serde(default)]
    pub currencies: BTreeMap<String, RawCurrency>,
    /// Keyed by ISO 639-3 code.
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
    #[serde(default)]
    pub flags: Option<RawFlags>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCountryName {
    #[serde(default)]
    pub common: Option<String>,
    #[serde(default)]
    pub official: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCurrency {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFlags {
    #[serde(default)]
    pub png: Option<String>,
    #[serde(default)]
    pub svg: Option<String>,
}
