//! The search pipeline: geocode, fetch candidates, normalize, refine.

use placefinder_core::{
    AppConfig, CountryRecord, DisplayRecord, GeoLocation, OverrideEntry, OverrideMode,
    OverridesFile, PoiTag, PointOfInterest, Query, ScopePolicy,
};

use serde::Serialize;

use crate::error::{ClientError, SearchError, Service};
use crate::normalize::{category_label, normalize_country, normalize_poi};
use crate::overpass::{build_query, QueryScope};
use crate::refine::{apply_filter, sort_records, FilterField, FilterStatus, SortKey};
use crate::source::{CountrySource, Geocoder, PoiSource};
use crate::tracker::{RequestToken, RequestTracker};

/// Minimum trimmed length before autocomplete queries the geocoder.
const SUGGEST_MIN_CHARS: usize = 3;

/// Everything that varies between variants of the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub poi_tag: PoiTag,
    /// Tag the user's filter text is matched against (`cuisine`).
    pub filter_tag: String,
    pub scope: ScopePolicy,
    pub radius_m: u32,
    pub suggest_limit: u32,
    /// Plural noun used in result titles, e.g. `Restaurants`.
    pub subject_label: String,
    pub overrides: Vec<OverrideEntry>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        let poi_tag = PoiTag {
            key: "amenity".to_owned(),
            value: "restaurant".to_owned(),
        };
        Self {
            subject_label: subject_label(&poi_tag),
            poi_tag,
            filter_tag: "cuisine".to_owned(),
            scope: ScopePolicy::BoundingBox,
            radius_m: 2000,
            suggest_limit: 5,
            overrides: Vec::new(),
        }
    }
}

impl PipelineSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig, overrides: OverridesFile) -> Self {
        Self {
            poi_tag: config.poi_tag.clone(),
            filter_tag: config.filter_tag.clone(),
            scope: config.scope,
            radius_m: config.search_radius_m,
            suggest_limit: config.suggest_limit,
            subject_label: subject_label(&config.poi_tag),
            overrides: overrides.overrides,
        }
    }
}

/// `amenity=fast_food` becomes `Fast foods`.
fn subject_label(tag: &PoiTag) -> String {
    let words = tag.value.trim().replace('_', " ");
    let mut chars = words.chars();
    let Some(first) = chars.next() else {
        return "Places".to_owned();
    };
    let mut label: String = first.to_uppercase().chain(chars).collect();
    if !label.ends_with('s') {
        label.push('s');
    }
    label
}

/// Where a result list came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultSource {
    Live,
    /// A `bypass` override answered without touching the network.
    Override { pattern: String },
    /// A `fallback` override replaced a failed collaborator call.
    OverrideAfterFailure { pattern: String },
}

#[derive(Debug, Clone)]
pub struct SearchResults {
    pub title: String,
    /// `None` when an override answered before geocoding.
    pub location: Option<GeoLocation>,
    pub records: Vec<DisplayRecord>,
    pub source: ResultSource,
}

pub struct SearchPipeline<G, P> {
    geocoder: G,
    pois: P,
    settings: PipelineSettings,
    tracker: RequestTracker,
}

impl<G: Geocoder, P: PoiSource> SearchPipeline<G, P> {
    pub fn new(geocoder: G, pois: P, settings: PipelineSettings) -> Self {
        Self {
            geocoder,
            pois,
            settings,
            tracker: RequestTracker::new(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Geocodes `text` and returns the best match, or `None` when the
    /// geocoder knows nothing by that name. Blank text never reaches the
    /// network.
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] from the geocoding call.
    pub async fn resolve_location(&self, text: &str) -> Result<Option<GeoLocation>, ClientError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let places = self.geocoder.geocode(text, None).await?;
        Ok(places.first().map(|p| p.to_location()))
    }

    /// Fetches raw points of interest around `location`, narrowed by
    /// `filter` on the configured filter tag.
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] from the Overpass call.
    pub async fn fetch_candidates(
        &self,
        location: &GeoLocation,
        filter: Option<&str>,
    ) -> Result<Vec<PointOfInterest>, ClientError> {
        let scope = QueryScope::for_location(location, self.settings.scope, self.settings.radius_m);
        let filter = filter
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(|f| (self.settings.filter_tag.as_str(), f));
        let ql = build_query(&self.settings.poi_tag, filter, scope);

        let elements = self.pois.fetch_elements(&ql).await?;
        Ok(elements
            .iter()
            .map(|e| e.to_point_of_interest(&self.settings.filter_tag))
            .collect())
    }

    /// First override entry whose pattern occurs in the query's location
    /// text or filter, ignoring case.
    #[must_use]
    pub fn special_case_override(&self, query: &Query) -> Option<&OverrideEntry> {
        let candidates: Vec<&str> = std::iter::once(query.trimmed_location())
            .chain(query.trimmed_filter())
            .collect();
        self.settings
            .overrides
            .iter()
            .find(|entry| entry.matches(candidates.iter().copied()))
    }

    /// Autocomplete: settlement names matching `text`, best first. Never
    /// fails; geocoder errors are logged and yield an empty list.
    pub async fn suggest(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.chars().count() < SUGGEST_MIN_CHARS {
            return Vec::new();
        }

        let places = match self
            .geocoder
            .geocode(text, Some(self.settings.suggest_limit))
            .await
        {
            Ok(places) => places,
            Err(e) => {
                tracing::warn!(query = text, error = %e, "autocomplete lookup failed");
                return Vec::new();
            }
        };

        let mut names: Vec<String> = Vec::new();
        for place in places.iter().filter(|p| p.is_settlement()) {
            let name = place.to_location().short_name().to_owned();
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Runs a full search. Starting a search makes any search still in
    /// flight on this pipeline stale; a stale search returns
    /// [`SearchError::Superseded`].
    ///
    /// # Errors
    ///
    /// See [`SearchError`] for the outcomes other than a populated list.
    pub async fn search(
        &self,
        query: &Query,
        sort: SortKey,
        ascending: bool,
    ) -> Result<SearchResults, SearchError> {
        let location_text = query.trimmed_location();
        if location_text.is_empty() {
            return Err(SearchError::Validation {
                reason: "location text is empty".to_owned(),
            });
        }
        let token = self.tracker.begin();

        let special = self.special_case_override(query);
        if let Some(entry) = special.filter(|e| e.mode == OverrideMode::Bypass) {
            tracing::info!(pattern = %entry.pattern, "serving override without network lookup");
            self.ensure_current(token)?;
            return Ok(self.override_results(
                entry,
                location_text,
                sort,
                ascending,
                ResultSource::Override {
                    pattern: entry.pattern.clone(),
                },
            ));
        }
        let fallback = special.filter(|e| e.mode == OverrideMode::Fallback);

        // A stale search reports `Superseded`, never its own outcome.
        let outcome = self
            .search_live(query, token, sort, ascending)
            .await
            .or_else(|e| self.ensure_current(token).and(Err(e)));
        match (outcome, fallback) {
            (Err(SearchError::ServiceUnavailable { service, source }), Some(entry)) => {
                tracing::warn!(
                    %service,
                    error = %source,
                    pattern = %entry.pattern,
                    "collaborator failed; serving fallback override"
                );
                self.ensure_current(token)?;
                Ok(self.override_results(
                    entry,
                    location_text,
                    sort,
                    ascending,
                    ResultSource::OverrideAfterFailure {
                        pattern: entry.pattern.clone(),
                    },
                ))
            }
            (outcome, _) => outcome,
        }
    }

    async fn search_live(
        &self,
        query: &Query,
        token: RequestToken,
        sort: SortKey,
        ascending: bool,
    ) -> Result<SearchResults, SearchError> {
        let location_text = query.trimmed_location();
        let filter = query.trimmed_filter();

        let location = self
            .resolve_location(location_text)
            .await
            .map_err(|source| SearchError::ServiceUnavailable {
                service: Service::Geocoding,
                source,
            })?
            .ok_or_else(|| SearchError::LocationNotFound {
                query: location_text.to_owned(),
            })?;
        self.ensure_current(token)?;

        tracing::debug!(
            location = %location.display_name,
            filter = filter.unwrap_or(""),
            "location resolved"
        );

        let candidates = self.fetch_candidates(&location, filter).await.map_err(|source| {
            SearchError::ServiceUnavailable {
                service: Service::PointsOfInterest,
                source,
            }
        })?;

        let records: Vec<DisplayRecord> = candidates.iter().filter_map(normalize_poi).collect();
        if records.is_empty() {
            return Err(SearchError::NoResults {
                location: location.display_name,
            });
        }

        // Labels are display-formatted, so format the filter text the same way.
        let local_filter = filter.map(category_label).unwrap_or_default();
        let filtered = apply_filter(&records, &local_filter, FilterField::Category);
        if filtered.status == FilterStatus::NoMatch {
            return Err(SearchError::FilterNoMatch {
                filter: filter.unwrap_or_default().to_owned(),
            });
        }

        let records = sort_records(filtered.records, sort, ascending);
        self.ensure_current(token)?;

        tracing::debug!(count = records.len(), "search complete");
        Ok(SearchResults {
            title: format!("{} in {}", self.settings.subject_label, location.short_name()),
            location: Some(location),
            records,
            source: ResultSource::Live,
        })
    }

    fn override_results(
        &self,
        entry: &OverrideEntry,
        location_text: &str,
        sort: SortKey,
        ascending: bool,
        source: ResultSource,
    ) -> SearchResults {
        let title = entry
            .title
            .clone()
            .unwrap_or_else(|| format!("{} in {location_text}", self.settings.subject_label));
        SearchResults {
            title,
            location: None,
            records: sort_records(entry.records.clone(), sort, ascending),
            source,
        }
    }

    fn ensure_current(&self, token: RequestToken) -> Result<(), SearchError> {
        if self.tracker.is_current(token) {
            Ok(())
        } else {
            tracing::debug!("search superseded; discarding");
            Err(SearchError::Superseded)
        }
    }
}

/// Cached countries list. The list is replaced wholesale on refresh and
/// filtered/sorted from the cache on every view.
pub struct CountryCatalog<C> {
    source: C,
    countries: Vec<CountryRecord>,
}

impl<C: CountrySource> CountryCatalog<C> {
    pub fn new(source: C) -> Self {
        Self {
            source,
            countries: Vec::new(),
        }
    }

    #[must_use]
    pub fn countries(&self) -> &[CountryRecord] {
        &self.countries
    }

    /// Replaces the cache with a fresh bulk fetch and returns its size.
    /// On failure the previous cache is kept.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::ServiceUnavailable`] if the feed cannot be fetched.
    pub async fn refresh(&mut self) -> Result<usize, SearchError> {
        let raw = self
            .source
            .fetch_all()
            .await
            .map_err(|source| SearchError::ServiceUnavailable {
                service: Service::Countries,
                source,
            })?;
        self.countries = raw.iter().filter_map(normalize_country).collect();
        tracing::debug!(count = self.countries.len(), "country catalog refreshed");
        Ok(self.countries.len())
    }

    /// Filters the cache by country name and sorts the result.
    ///
    /// # Errors
    ///
    /// - [`SearchError::NoResults`] if the cache is empty.
    /// - [`SearchError::FilterNoMatch`] if `filter` matches no country.
    pub fn view(
        &self,
        filter: &str,
        sort: SortKey,
        ascending: bool,
    ) -> Result<Vec<CountryRecord>, SearchError> {
        if self.countries.is_empty() {
            return Err(SearchError::NoResults {
                location: "the countries catalog".to_owned(),
            });
        }
        let filtered = apply_filter(&self.countries, filter, FilterField::Country);
        if filtered.status == FilterStatus::NoMatch {
            return Err(SearchError::FilterNoMatch {
                filter: filter.trim().to_owned(),
            });
        }
        Ok(sort_records(filtered.records, sort, ascending))
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
