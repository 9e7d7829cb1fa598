use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for listings owned by the external listings store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ListingId(pub String);

/// Geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Transaction advertised by a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Sale,
    Rent,
}

impl OperationType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::Rent => "rent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sale" => Some(Self::Sale),
            "rent" => Some(Self::Rent),
            _ => None,
        }
    }
}

/// Publication lifecycle of a listing; only `Published` rows are searchable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Draft,
    Published,
    Unpublished,
}

impl ListingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Unpublished => "unpublished",
        }
    }
}

/// Ordering requested for a search result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    DateDesc,
    PriceAsc,
    PriceDesc,
    DistanceAsc,
}

impl SortKey {
    pub const fn label(self) -> &'static str {
        match self {
            Self::DateDesc => "date_desc",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::DistanceAsc => "distance_asc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "date_desc" => Some(Self::DateDesc),
            "price_asc" => Some(Self::PriceAsc),
            "price_desc" => Some(Self::PriceDesc),
            "distance_asc" => Some(Self::DistanceAsc),
            _ => None,
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self::DateDesc
    }
}

/// Listing row as exposed by the listings store.
///
/// Rows are read-only from the search subsystem's perspective. A `None`
/// price marks an incomplete listing, which never surfaces in results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub location: GeoPoint,
    pub price: Option<f64>,
    pub rooms: u32,
    pub surface: f64,
    pub op_type: OperationType,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
}

/// Fully validated parameters for one radius search. Built per request
/// by the filter validator and discarded once the query completes.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilter {
    pub center: GeoPoint,
    pub radius_km: f64,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rooms: Option<u32>,
    pub max_rooms: Option<u32>,
    pub min_surface: Option<f64>,
    pub max_surface: Option<f64>,
    pub op_type: Option<OperationType>,
    pub sort_by: SortKey,
    pub limit: u32,
    pub offset: u32,
}

/// Result row shaped for API responses. `distance_km` is attached only
/// when the caller ranked by distance.
#[derive(Debug, Clone, Serialize)]
pub struct ListingSummary {
    pub id: ListingId,
    pub location: GeoPoint,
    pub price: f64,
    pub rooms: u32,
    pub surface: f64,
    pub op_type: OperationType,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl ListingSummary {
    pub(crate) fn from_row(listing: &Listing, distance_km: Option<f64>) -> Self {
        Self {
            id: listing.id.clone(),
            location: listing.location,
            // query evaluation never admits unpriced rows
            price: listing.price.unwrap_or_default(),
            rooms: listing.rooms,
            surface: listing.surface,
            op_type: listing.op_type,
            created_at: listing.created_at,
            distance_km,
        }
    }
}

/// Window metadata for one returned page. `count` is the number of rows
/// in this page, not a total across pages: an exact total under the
/// store's row-level security would need a second query with different
/// visibility semantics, so it is deliberately not computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
    pub count: usize,
}

/// Assembled search response.
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    pub data: Vec<ListingSummary>,
    pub pagination: Pagination,
}
