//! Collaborator seams. The HTTP clients implement these; tests substitute fakes.

use std::future::Future;
use std::pin::Pin;

use crate::countries::CountriesClient;
use crate::error::ClientError;
use crate::geocode::GeocodeClient;
use crate::overpass::OverpassClient;
use crate::types::{GeocodePlace, OverpassElement, RawCountry};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Resolves free text to candidate places, best match first.
pub trait Geocoder: Send + Sync {
    fn geocode<'a>(
        &'a self,
        text: &'a str,
        limit: Option<u32>,
    ) -> BoxFuture<'a, Result<Vec<GeocodePlace>, ClientError>>;
}

/// Runs an Overpass QL query.
pub trait PoiSource: Send + Sync {
    fn fetch_elements<'a>(
        &'a self,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<OverpassElement>, ClientError>>;
}

/// Bulk feed of every country.
pub trait CountrySource: Send + Sync {
    fn fetch_all(&self) -> BoxFuture<'_, Result<Vec<RawCountry>, ClientError>>;
}

impl Geocoder for GeocodeClient {
    fn geocode<'a>(
        &'a self,
        text: &'a str,
        limit: Option<u32>,
    ) -> BoxFuture<'a, Result<Vec<GeocodePlace>, ClientError>> {
        Box::pin(self.search(text, limit))
    }
}

impl PoiSource for OverpassClient {
    fn fetch_elements<'a>(
        &'a self,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<OverpassElement>, ClientError>> {
        Box::pin(OverpassClient::fetch_elements(self, query))
    }
}

impl CountrySource for CountriesClient {
    fn fetch_all(&self) -> BoxFuture<'_, Result<Vec<RawCountry>, ClientError>> {
        Box::pin(CountriesClient::fetch_all(self))
    }
}
