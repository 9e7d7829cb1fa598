use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use darseek::search::{radius_search_router, ListingStore, RadiusSearchService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_search_routes<S>(service: Arc<RadiusSearchService<S>>) -> axum::Router
where
    S: ListingStore + 'static,
{
    radius_search_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{seed_listings, InMemoryListingStore};
    use tower::ServiceExt;

    fn seeded_app() -> axum::Router {
        let store = Arc::new(InMemoryListingStore::with_rows(seed_listings()));
        with_search_routes(Arc::new(RadiusSearchService::new(store)))
    }

    async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(payload) = healthcheck().await;
        assert_eq!(payload.get("status").and_then(|v| v.as_str()), Some("ok"));
    }

    #[tokio::test]
    async fn search_route_serves_seeded_listings() {
        let response = seeded_app()
            .oneshot(
                axum::http::Request::get("/search/radius?lat=18.0735&lng=-15.9582&radius=5")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        let ids: Vec<_> = payload["data"]
            .as_array()
            .expect("data array")
            .iter()
            .map(|row| row["id"].as_str().expect("id").to_string())
            .collect();

        assert!(ids.contains(&"sebkha-flat".to_string()));
        assert!(!ids.contains(&"medina-draft".to_string()));
        assert!(!ids.contains(&"incomplete-plot".to_string()));
        assert!(!ids.contains(&"rosso-farmhouse".to_string()));
    }

    #[tokio::test]
    async fn search_route_rejects_bad_coordinates() {
        let response = seeded_app()
            .oneshot(
                axum::http::Request::get("/search/radius?lat=1000&lng=-15.9582")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
