//! Local filtering and sorting over an already-fetched result list.
//!
//! Both operations are pure: they take the current list explicitly and
//! return a new one, so the outcome never depends on fetch order.

use std::cmp::Reverse;
use std::str::FromStr;

use placefinder_core::{CountryRecord, DisplayRecord};

/// Field a filter string is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Name,
    /// Cuisine for points of interest, region for countries.
    Category,
    Country,
}

/// Accessors shared by every record type that can be filtered and sorted.
pub trait Refinable {
    fn field(&self, field: FilterField) -> Option<&str>;

    fn sort_name(&self) -> &str;

    /// Numeric population, for record types that carry one.
    fn population(&self) -> Option<u64> {
        None
    }
}

impl Refinable for DisplayRecord {
    fn field(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Name => Some(&self.name),
            FilterField::Category => self.category_label.as_deref(),
            FilterField::Country => self.country.as_deref(),
        }
    }

    fn sort_name(&self) -> &str {
        &self.name
    }
}

impl Refinable for CountryRecord {
    fn field(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Name | FilterField::Country => Some(&self.name),
            FilterField::Category => self.region.as_deref(),
        }
    }

    fn sort_name(&self) -> &str {
        &self.name
    }

    fn population(&self) -> Option<u64> {
        Some(self.population)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStatus {
    /// No filter text was given; the list is returned as-is.
    Unfiltered,
    /// At least one record matched.
    Matched,
    /// A filter was given and nothing matched. Distinct from "no results at all".
    NoMatch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filtered<T> {
    pub records: Vec<T>,
    pub status: FilterStatus,
}

/// Keeps the records whose `field` contains `filter_text`, ignoring case.
///
/// Blank filter text is the identity.
#[must_use]
pub fn apply_filter<T: Refinable + Clone>(
    records: &[T],
    filter_text: &str,
    field: FilterField,
) -> Filtered<T> {
    let needle = filter_text.trim().to_lowercase();
    if needle.is_empty() {
        return Filtered {
            records: records.to_vec(),
            status: FilterStatus::Unfiltered,
        };
    }

    let matched: Vec<T> = records
        .iter()
        .filter(|r| {
            r.field(field)
                .is_some_and(|value| value.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();

    let status = if matched.is_empty() {
        FilterStatus::NoMatch
    } else {
        FilterStatus::Matched
    };

    Filtered {
        records: matched,
        status,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Keep fetch order.
    #[default]
    Unsorted,
    /// Alphabetical, case-insensitive.
    Name,
    /// Numeric; only country records carry a population.
    Population,
    /// Reserved. No rating source exists yet, so this keeps the current order.
    Rating,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(SortKey::Unsorted),
            "name" => Ok(SortKey::Name),
            "population" => Ok(SortKey::Population),
            "rating" => Ok(SortKey::Rating),
            other => Err(format!(
                "unknown sort key '{other}'; expected name, population, rating or none"
            )),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Unsorted => write!(f, "none"),
            SortKey::Name => write!(f, "name"),
            SortKey::Population => write!(f, "population"),
            SortKey::Rating => write!(f, "rating"),
        }
    }
}

/// Stable sort of `records` by `key`.
///
/// `Unsorted` and `Rating` return the input order unchanged, as does
/// `Population` for record types without a population.
#[must_use]
pub fn sort_records<T: Refinable>(mut records: Vec<T>, key: SortKey, ascending: bool) -> Vec<T> {
    match key {
        SortKey::Unsorted => {}
        SortKey::Rating => {
            tracing::debug!("rating sort requested but no rating source exists; order unchanged");
        }
        SortKey::Name => {
            if ascending {
                records.sort_by_cached_key(|r| name_key(r.sort_name()));
            } else {
                records.sort_by_cached_key(|r| Reverse(name_key(r.sort_name())));
            }
        }
        SortKey::Population => {
            if ascending {
                records.sort_by_key(|r| r.population());
            } else {
                records.sort_by_key(|r| Reverse(r.population()));
            }
        }
    }
    records
}

/// Case-folded comparison key, so `"apple"` and `"Apple"` sort together.
fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
