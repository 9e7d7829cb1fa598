//! Geo-radius search and ranking over published listings.
//!
//! Dependency order, leaves first: parameter validation ([`filter`]),
//! the geographic distance predicate ([`geo`]), query evaluation
//! ([`query`]), the store seam ([`store`]), and the service and HTTP
//! surface composing them ([`service`], [`router`]).

pub mod domain;
pub mod filter;
pub mod geo;
pub mod query;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    GeoPoint, Listing, ListingId, ListingStatus, ListingSummary, OperationType, Pagination,
    SearchFilter, SearchPage, SortKey,
};
pub use filter::{
    FieldError, FilterValidator, RawSearchQuery, SearchLimits, ValidationFailure,
    DEFAULT_RADIUS_KM,
};
pub use geo::{haversine_km, EARTH_RADIUS_KM};
pub use query::{RadiusQuery, RankedListing};
pub use router::radius_search_router;
pub use service::{RadiusSearchService, SearchError};
pub use store::{ListingStore, StoreError};
