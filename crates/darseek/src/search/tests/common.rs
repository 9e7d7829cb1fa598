use std::f64::consts::PI;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::search::domain::{GeoPoint, Listing, ListingId, ListingStatus, OperationType};
use crate::search::filter::RawSearchQuery;
use crate::search::geo::EARTH_RADIUS_KM;
use crate::search::store::{ListingStore, StoreError};

pub(super) const NOUAKCHOTT: GeoPoint = GeoPoint {
    lat: 18.0735,
    lng: -15.9582,
};

pub(super) fn created(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Point exactly `km` north of the Nouakchott center; a pure latitude
/// offset follows a meridian, so the haversine distance equals `km`.
pub(super) fn km_north(km: f64) -> GeoPoint {
    GeoPoint {
        lat: NOUAKCHOTT.lat + km / (EARTH_RADIUS_KM * PI / 180.0),
        lng: NOUAKCHOTT.lng,
    }
}

pub(super) fn km_south(km: f64) -> GeoPoint {
    GeoPoint {
        lat: NOUAKCHOTT.lat - km / (EARTH_RADIUS_KM * PI / 180.0),
        lng: NOUAKCHOTT.lng,
    }
}

pub(super) fn published(id: &str, location: GeoPoint, price: f64, day: u32) -> Listing {
    Listing {
        id: ListingId(id.to_string()),
        location,
        price: Some(price),
        rooms: 3,
        surface: 80.0,
        op_type: OperationType::Sale,
        status: ListingStatus::Published,
        created_at: created(day),
    }
}

/// Mixed fixture around the Nouakchott center: published rows at known
/// distances plus rows each predicate should reject.
pub(super) fn nouakchott_rows() -> Vec<Listing> {
    let mut rental = published("ksar-rental", km_north(2.0), 40_000.0, 3);
    rental.op_type = OperationType::Rent;
    rental.rooms = 2;
    rental.surface = 55.0;

    let mut draft = published("draft-villa", km_north(1.0), 9_000_000.0, 9);
    draft.status = ListingStatus::Draft;

    let mut unpublished = published("pulled-flat", km_south(1.0), 3_000_000.0, 8);
    unpublished.status = ListingStatus::Unpublished;

    let mut unpriced = published("incomplete-plot", km_north(0.5), 0.0, 7);
    unpriced.price = None;

    vec![
        published("tevragh-zeina-apt", km_north(3.0), 5_500_000.0, 5),
        published("medina-house", km_south(4.0), 2_800_000.0, 6),
        published("ksar-plot", km_north(4.9), 1_200_000.0, 2),
        published("rosso-farm", km_north(200.0), 800_000.0, 4),
        rental,
        draft,
        unpublished,
        unpriced,
    ]
}

pub(super) fn center_query() -> RawSearchQuery {
    RawSearchQuery {
        lat: Some("18.0735".to_string()),
        lng: Some("-15.9582".to_string()),
        ..RawSearchQuery::default()
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    rows: Arc<Mutex<Vec<Listing>>>,
    calls: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub(super) fn with_rows(rows: Vec<Listing>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ListingStore for MemoryStore {
    fn listings(&self) -> Result<Vec<Listing>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().expect("store mutex poisoned").clone())
    }
}

pub(super) struct UnavailableStore;

impl ListingStore for UnavailableStore {
    fn listings(&self) -> Result<Vec<Listing>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

pub(super) async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}
