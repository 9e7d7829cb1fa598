use super::domain::GeoPoint;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points using the haversine formula.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);

    // rounding can nudge h a hair past 1.0 for antipodal points
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const NOUAKCHOTT: GeoPoint = GeoPoint {
        lat: 18.0735,
        lng: -15.9582,
    };

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(haversine_km(NOUAKCHOTT, NOUAKCHOTT), 0.0);
    }

    #[test]
    fn one_degree_of_latitude_spans_the_meridian_arc() {
        let north = GeoPoint {
            lat: NOUAKCHOTT.lat + 1.0,
            lng: NOUAKCHOTT.lng,
        };
        let expected = EARTH_RADIUS_KM * PI / 180.0;
        assert!((haversine_km(NOUAKCHOTT, north) - expected).abs() < 1e-6);
    }

    #[test]
    fn distance_is_symmetric() {
        let other = GeoPoint {
            lat: 18.1,
            lng: -15.9,
        };
        let forward = haversine_km(NOUAKCHOTT, other);
        let backward = haversine_km(other, NOUAKCHOTT);
        assert!((forward - backward).abs() < 1e-12);
    }

    #[test]
    fn antipodal_points_stay_finite() {
        let a = GeoPoint { lat: 0.0, lng: 0.0 };
        let b = GeoPoint {
            lat: 0.0,
            lng: 180.0,
        };
        let half_circumference = EARTH_RADIUS_KM * PI;
        assert!((haversine_km(a, b) - half_circumference).abs() < 1e-6);
    }
}
