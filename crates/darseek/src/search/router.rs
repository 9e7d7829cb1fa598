use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use super::filter::RawSearchQuery;
use super::service::{RadiusSearchService, SearchError};
use super::store::ListingStore;

/// Router builder exposing the radius search endpoint.
pub fn radius_search_router<S>(service: Arc<RadiusSearchService<S>>) -> Router
where
    S: ListingStore + 'static,
{
    Router::new()
        .route("/search/radius", get(radius_search_handler::<S>))
        .with_state(service)
}

pub(crate) async fn radius_search_handler<S>(
    State(service): State<Arc<RadiusSearchService<S>>>,
    Query(raw): Query<RawSearchQuery>,
) -> Response
where
    S: ListingStore + 'static,
{
    match service.search(&raw) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(SearchError::Validation(failure)) => {
            let payload = json!({
                "error": "invalid search parameters",
                "details": failure.violations,
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(SearchError::Store(_)) => {
            // store detail stays in server logs
            let payload = json!({ "error": "search failed" });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
