use std::cmp::Ordering;

use super::domain::{GeoPoint, Listing, ListingStatus, OperationType, SearchFilter, SortKey};
use super::geo::haversine_km;

/// Executable form of a validated [`SearchFilter`].
///
/// Evaluation is read-only: filter to published, priced rows inside the
/// radius, apply every optional bound conjunctively, order, then window.
#[derive(Debug, Clone)]
pub struct RadiusQuery {
    center: GeoPoint,
    radius_km: f64,
    min_price: Option<f64>,
    max_price: Option<f64>,
    min_rooms: Option<u32>,
    max_rooms: Option<u32>,
    min_surface: Option<f64>,
    max_surface: Option<f64>,
    op_type: Option<OperationType>,
    sort_by: SortKey,
    limit: u32,
    offset: u32,
}

/// A candidate row that passed every predicate, with its distance to
/// the search center.
#[derive(Debug, Clone)]
pub struct RankedListing {
    pub listing: Listing,
    pub distance_km: f64,
}

impl RadiusQuery {
    pub fn from_filter(filter: &SearchFilter) -> Self {
        Self {
            center: filter.center,
            radius_km: filter.radius_km,
            min_price: filter.min_price,
            max_price: filter.max_price,
            min_rooms: filter.min_rooms,
            max_rooms: filter.max_rooms,
            min_surface: filter.min_surface,
            max_surface: filter.max_surface,
            op_type: filter.op_type,
            sort_by: filter.sort_by,
            limit: filter.limit,
            offset: filter.offset,
        }
    }

    /// Filter, rank, and window candidate rows from the store.
    pub fn execute<I>(&self, rows: I) -> Vec<RankedListing>
    where
        I: IntoIterator<Item = Listing>,
    {
        let mut matches: Vec<RankedListing> = rows
            .into_iter()
            .filter_map(|listing| {
                self.admit(&listing)
                    .map(|distance_km| RankedListing {
                        listing,
                        distance_km,
                    })
            })
            .collect();

        self.rank(&mut matches);

        matches
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .collect()
    }

    /// Distance to the center when the listing satisfies every
    /// predicate; `None` otherwise. The radius boundary is inclusive.
    fn admit(&self, listing: &Listing) -> Option<f64> {
        if listing.status != ListingStatus::Published {
            return None;
        }
        // unpriced rows are incomplete and never surface
        let price = listing.price?;

        if let Some(min) = self.min_price {
            if price < min {
                return None;
            }
        }
        if let Some(max) = self.max_price {
            if price > max {
                return None;
            }
        }
        if let Some(min) = self.min_rooms {
            if listing.rooms < min {
                return None;
            }
        }
        if let Some(max) = self.max_rooms {
            if listing.rooms > max {
                return None;
            }
        }
        if let Some(min) = self.min_surface {
            if listing.surface < min {
                return None;
            }
        }
        if let Some(max) = self.max_surface {
            if listing.surface > max {
                return None;
            }
        }
        if let Some(op_type) = self.op_type {
            if listing.op_type != op_type {
                return None;
            }
        }

        let distance_km = haversine_km(listing.location, self.center);
        (distance_km <= self.radius_km).then_some(distance_km)
    }

    fn rank(&self, matches: &mut [RankedListing]) {
        match self.sort_by {
            SortKey::DateDesc => matches.sort_by(|a, b| recency(&a.listing, &b.listing)),
            SortKey::PriceAsc => matches.sort_by(|a, b| {
                price_of(a)
                    .total_cmp(&price_of(b))
                    .then_with(|| recency(&a.listing, &b.listing))
            }),
            SortKey::PriceDesc => matches.sort_by(|a, b| {
                price_of(b)
                    .total_cmp(&price_of(a))
                    .then_with(|| recency(&a.listing, &b.listing))
            }),
            SortKey::DistanceAsc => matches.sort_by(|a, b| {
                a.distance_km
                    .total_cmp(&b.distance_km)
                    .then_with(|| recency(&a.listing, &b.listing))
            }),
        }
    }
}

/// Newest first, then id, so identical filters over identical data
/// always return the same ordered page.
fn recency(a: &Listing, b: &Listing) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

fn price_of(row: &RankedListing) -> f64 {
    // admit() only passes priced rows
    row.listing.price.unwrap_or_default()
}
