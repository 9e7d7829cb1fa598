use serde::{Deserialize, Serialize};

use super::domain::{GeoPoint, OperationType, SearchFilter, SortKey};

/// Radius applied when the caller supplies none.
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

const DEFAULT_MAX_RADIUS_KM: f64 = 100.0;
const DEFAULT_MAX_PAGE_SIZE: u32 = 50;

/// Raw, untyped query parameters exactly as received on the wire.
///
/// Every field is an optional string so validation can coerce and
/// range-check each one itself, reporting all violations at once
/// instead of letting deserialization fail on the first bad value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub radius: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<String>,
    #[serde(rename = "minRooms")]
    pub min_rooms: Option<String>,
    #[serde(rename = "maxRooms")]
    pub max_rooms: Option<String>,
    #[serde(rename = "minSurface")]
    pub min_surface: Option<String>,
    #[serde(rename = "maxSurface")]
    pub max_surface: Option<String>,
    #[serde(rename = "opType")]
    pub op_type: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// One violated field with a caller-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Aggregate of every violation found in one raw query.
#[derive(Debug, Clone, thiserror::Error)]
#[error("search filter rejected with {} violation(s)", violations.len())]
pub struct ValidationFailure {
    pub violations: Vec<FieldError>,
}

impl ValidationFailure {
    pub fn violates(&self, field: &str) -> bool {
        self.violations.iter().any(|error| error.field == field)
    }
}

/// Ceilings bounding what a single search may cost the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchLimits {
    max_radius_km: f64,
    max_page_size: u32,
}

impl SearchLimits {
    pub fn new(max_radius_km: f64, max_page_size: u32) -> Self {
        let max_radius_km = if max_radius_km.is_finite() && max_radius_km > 0.0 {
            max_radius_km
        } else {
            DEFAULT_MAX_RADIUS_KM
        };
        let max_page_size = if max_page_size == 0 {
            DEFAULT_MAX_PAGE_SIZE
        } else {
            max_page_size
        };

        Self {
            max_radius_km,
            max_page_size,
        }
    }

    pub fn max_radius_km(&self) -> f64 {
        self.max_radius_km
    }

    pub fn max_page_size(&self) -> u32 {
        self.max_page_size
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RADIUS_KM, DEFAULT_MAX_PAGE_SIZE)
    }
}

/// Validator turning raw wire parameters into a typed [`SearchFilter`].
#[derive(Debug, Clone, Default)]
pub struct FilterValidator {
    limits: SearchLimits,
}

impl FilterValidator {
    pub fn with_limits(limits: SearchLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Coerce and range-check every parameter, collecting all violations.
    pub fn validate(&self, raw: &RawSearchQuery) -> Result<SearchFilter, ValidationFailure> {
        let mut violations = Vec::new();

        let lat = require_float(&mut violations, "centerLat", raw.lat.as_deref());
        let lng = require_float(&mut violations, "centerLng", raw.lng.as_deref());

        if let Some(lat) = lat {
            if !(-90.0..=90.0).contains(&lat) {
                violations.push(FieldError::new(
                    "centerLat",
                    "latitude must be between -90 and 90",
                ));
            }
        }
        if let Some(lng) = lng {
            if !(-180.0..=180.0).contains(&lng) {
                violations.push(FieldError::new(
                    "centerLng",
                    "longitude must be between -180 and 180",
                ));
            }
        }

        let radius_km = parse_float(&mut violations, "radiusKm", raw.radius.as_deref())
            .unwrap_or(DEFAULT_RADIUS_KM);
        if radius_km <= 0.0 {
            violations.push(FieldError::new("radiusKm", "radius must be greater than 0"));
        } else if radius_km > self.limits.max_radius_km {
            violations.push(FieldError::new(
                "radiusKm",
                format!("radius must not exceed {} km", self.limits.max_radius_km),
            ));
        }

        let min_price = parse_amount(&mut violations, "minPrice", raw.min_price.as_deref());
        let max_price = parse_amount(&mut violations, "maxPrice", raw.max_price.as_deref());
        check_pair(&mut violations, "minPrice", "maxPrice", min_price, max_price);

        let min_rooms = parse_count(&mut violations, "minRooms", raw.min_rooms.as_deref());
        let max_rooms = parse_count(&mut violations, "maxRooms", raw.max_rooms.as_deref());
        check_pair(&mut violations, "minRooms", "maxRooms", min_rooms, max_rooms);

        let min_surface = parse_amount(&mut violations, "minSurface", raw.min_surface.as_deref());
        let max_surface = parse_amount(&mut violations, "maxSurface", raw.max_surface.as_deref());
        check_pair(
            &mut violations,
            "minSurface",
            "maxSurface",
            min_surface,
            max_surface,
        );

        let op_type = match present(raw.op_type.as_deref()) {
            Some(value) => {
                let parsed = OperationType::parse(value);
                if parsed.is_none() {
                    violations.push(FieldError::new(
                        "opType",
                        format!("unknown operation type '{value}'"),
                    ));
                }
                parsed
            }
            None => None,
        };

        let sort_by = match present(raw.sort_by.as_deref()) {
            Some(value) => match SortKey::parse(value) {
                Some(key) => key,
                None => {
                    violations.push(FieldError::new(
                        "sortBy",
                        format!(
                            "unknown sort key '{value}' (expected date_desc, price_asc, price_desc, or distance_asc)"
                        ),
                    ));
                    SortKey::default()
                }
            },
            None => SortKey::default(),
        };

        // an oversized limit is clamped, never served unbounded; only an
        // unparsable one is a violation
        let limit = parse_count(&mut violations, "limit", raw.limit.as_deref())
            .unwrap_or(self.limits.max_page_size)
            .clamp(1, self.limits.max_page_size);
        let offset = parse_count(&mut violations, "offset", raw.offset.as_deref()).unwrap_or(0);

        match (lat, lng) {
            (Some(lat), Some(lng)) if violations.is_empty() => Ok(SearchFilter {
                center: GeoPoint { lat, lng },
                radius_km,
                min_price,
                max_price,
                min_rooms,
                max_rooms,
                min_surface,
                max_surface,
                op_type,
                sort_by,
                limit,
                offset,
            }),
            _ => Err(ValidationFailure { violations }),
        }
    }
}

/// Treat missing and empty parameters the same; HTML forms submit
/// untouched fields as `name=`.
fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn require_float(
    violations: &mut Vec<FieldError>,
    field: &'static str,
    raw: Option<&str>,
) -> Option<f64> {
    match present(raw) {
        Some(value) => parse_finite(violations, field, value),
        None => {
            violations.push(FieldError::new(field, "required"));
            None
        }
    }
}

fn parse_float(
    violations: &mut Vec<FieldError>,
    field: &'static str,
    raw: Option<&str>,
) -> Option<f64> {
    present(raw).and_then(|value| parse_finite(violations, field, value))
}

fn parse_finite(violations: &mut Vec<FieldError>, field: &'static str, value: &str) -> Option<f64> {
    match value.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Some(parsed),
        _ => {
            violations.push(FieldError::new(
                field,
                format!("'{value}' is not a finite number"),
            ));
            None
        }
    }
}

fn parse_amount(
    violations: &mut Vec<FieldError>,
    field: &'static str,
    raw: Option<&str>,
) -> Option<f64> {
    let parsed = parse_float(violations, field, raw)?;
    if parsed < 0.0 {
        violations.push(FieldError::new(field, "must not be negative"));
        return None;
    }
    Some(parsed)
}

fn parse_count(
    violations: &mut Vec<FieldError>,
    field: &'static str,
    raw: Option<&str>,
) -> Option<u32> {
    let value = present(raw)?;
    match value.parse::<u32>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            violations.push(FieldError::new(
                field,
                format!("'{value}' is not a non-negative integer"),
            ));
            None
        }
    }
}

fn check_pair<T: PartialOrd>(
    violations: &mut Vec<FieldError>,
    min_field: &'static str,
    max_field: &'static str,
    min: Option<T>,
    max: Option<T>,
) {
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            violations.push(FieldError::new(
                min_field,
                format!("must not exceed {max_field}"),
            ));
        }
    }
}
