//! Place search: geocoding, Overpass candidate fetch, normalization and
//! local refinement, plus the REST Countries catalog.

pub mod countries;
pub mod error;
pub mod geocode;
mod http;
pub mod normalize;
pub mod overpass;
pub mod pipeline;
pub mod refine;
pub mod source;
pub mod tracker;
pub mod types;

pub use countries::CountriesClient;
pub use error::{ClientError, SearchError, Service};
pub use geocode::GeocodeClient;
pub use overpass::{build_query, OverpassClient, QueryScope};
pub use pipeline::{CountryCatalog, PipelineSettings, ResultSource, SearchPipeline, SearchResults};
pub use refine::{apply_filter, sort_records, FilterField, FilterStatus, Filtered, SortKey};
pub use source::{CountrySource, Geocoder, PoiSource};
pub use tracker::{RequestToken, RequestTracker};
