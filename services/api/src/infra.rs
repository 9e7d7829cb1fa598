use chrono::{TimeZone, Utc};
use darseek::search::{
    GeoPoint, Listing, ListingId, ListingStatus, ListingStore, OperationType, StoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Listing store backed by process memory, used for demos and tests.
/// The production deployment points the service at the hosted listings
/// store instead.
#[derive(Default, Clone)]
pub(crate) struct InMemoryListingStore {
    rows: Arc<Mutex<Vec<Listing>>>,
}

impl InMemoryListingStore {
    pub(crate) fn with_rows(rows: Vec<Listing>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
        }
    }
}

impl ListingStore for InMemoryListingStore {
    fn listings(&self) -> Result<Vec<Listing>, StoreError> {
        Ok(self.rows.lock().expect("store mutex poisoned").clone())
    }
}

fn listing(
    id: &str,
    lat: f64,
    lng: f64,
    price: Option<f64>,
    rooms: u32,
    surface: f64,
    op_type: OperationType,
    status: ListingStatus,
    day: u32,
) -> Listing {
    Listing {
        id: ListingId(id.to_string()),
        location: GeoPoint { lat, lng },
        price,
        rooms,
        surface,
        op_type,
        status,
        created_at: Utc
            .with_ymd_and_hms(2025, 8, day, 9, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

/// Demo rows spread across Nouakchott districts, plus a draft, an
/// incomplete listing, and an out-of-town row so every predicate has
/// something to reject.
pub(crate) fn seed_listings() -> Vec<Listing> {
    use ListingStatus::{Draft, Published};
    use OperationType::{Rent, Sale};

    vec![
        listing(
            "tevragh-zeina-apt",
            18.0994,
            -15.9874,
            Some(5_500_000.0),
            4,
            140.0,
            Sale,
            Published,
            21,
        ),
        listing(
            "ksar-family-house",
            18.0931,
            -15.9530,
            Some(3_200_000.0),
            5,
            210.0,
            Sale,
            Published,
            19,
        ),
        listing(
            "sebkha-flat",
            18.0689,
            -15.9905,
            Some(45_000.0),
            2,
            60.0,
            Rent,
            Published,
            24,
        ),
        listing(
            "riyadh-plot",
            18.0301,
            -15.9201,
            Some(900_000.0),
            1,
            300.0,
            Sale,
            Published,
            15,
        ),
        listing(
            "dar-naim-villa",
            18.1302,
            -15.9198,
            Some(7_800_000.0),
            6,
            320.0,
            Sale,
            Published,
            22,
        ),
        listing(
            "toujounine-rental",
            18.0899,
            -15.8801,
            Some(60_000.0),
            3,
            95.0,
            Rent,
            Published,
            23,
        ),
        listing(
            "medina-draft",
            18.0802,
            -15.9651,
            Some(2_000_000.0),
            3,
            100.0,
            Sale,
            Draft,
            25,
        ),
        listing(
            "incomplete-plot",
            18.0755,
            -15.9610,
            None,
            0,
            0.0,
            Sale,
            Published,
            26,
        ),
        listing(
            "rosso-farmhouse",
            16.5130,
            -15.8050,
            Some(1_500_000.0),
            4,
            400.0,
            Sale,
            Published,
            18,
        ),
    ]
}
