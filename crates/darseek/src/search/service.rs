use std::sync::Arc;

use tracing::error;

use super::domain::{ListingSummary, Pagination, SearchFilter, SearchPage, SortKey};
use super::filter::{FilterValidator, RawSearchQuery, SearchLimits, ValidationFailure};
use super::query::RadiusQuery;
use super::store::{ListingStore, StoreError};

/// Service composing the filter validator, radius query evaluation, and
/// the listings store seam. Stateless per request: a filter is built,
/// executed once, and discarded.
pub struct RadiusSearchService<S> {
    validator: FilterValidator,
    store: Arc<S>,
}

impl<S> RadiusSearchService<S>
where
    S: ListingStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_limits(store, SearchLimits::default())
    }

    pub fn with_limits(store: Arc<S>, limits: SearchLimits) -> Self {
        Self {
            validator: FilterValidator::with_limits(limits),
            store,
        }
    }

    /// Validate raw wire parameters and run the radius search.
    ///
    /// Validation failures never reach the store layer.
    pub fn search(&self, raw: &RawSearchQuery) -> Result<SearchPage, SearchError> {
        let filter = self.validator.validate(raw)?;
        self.search_filtered(&filter)
    }

    /// Run the radius search for an already validated filter.
    pub fn search_filtered(&self, filter: &SearchFilter) -> Result<SearchPage, SearchError> {
        let rows = self.store.listings().map_err(|source| {
            // log with normalized filter context; the caller only ever
            // sees a generic failure
            error!(
                lat = filter.center.lat,
                lng = filter.center.lng,
                radius_km = filter.radius_km,
                sort_by = filter.sort_by.label(),
                limit = filter.limit,
                offset = filter.offset,
                %source,
                "radius search failed against the listings store"
            );
            source
        })?;

        let ranked = RadiusQuery::from_filter(filter).execute(rows);

        // distance is always computed for the radius predicate but only
        // exposed when the caller ranked by it
        let expose_distance = filter.sort_by == SortKey::DistanceAsc;
        let data: Vec<ListingSummary> = ranked
            .iter()
            .map(|row| {
                ListingSummary::from_row(&row.listing, expose_distance.then_some(row.distance_km))
            })
            .collect();

        let pagination = Pagination {
            limit: filter.limit,
            offset: filter.offset,
            count: data.len(),
        };

        Ok(SearchPage { data, pagination })
    }
}

/// Error raised by the radius search service.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error(transparent)]
    Store(#[from] StoreError),
}
