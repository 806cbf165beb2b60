//! HTTP quote API.
//!
//! Upstream-unavailable and unknown-location conditions never surface here;
//! only validation failures and unexpected computation errors produce
//! non-2xx responses.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use lanequote_core::domain::quote::QuoteResponse;
use lanequote_core::domain::shipment::ShipmentRequest;
use lanequote_core::errors::{ApplicationError, InterfaceError};
use lanequote_core::geo::GeocodeTable;
use lanequote_core::service::QuoteService;
use serde::Serialize;
use tracing::{error, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct ApiState {
    pub quote_service: Arc<QuoteService>,
    pub table: Arc<GeocodeTable>,
    pub routing_configured: bool,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(service_status))
        .route("/health", get(service_status))
        .route("/api/v1/quotes", post(create_quote))
        .route("/api/v1/zips", get(list_zips))
        .with_state(state)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub routing: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct ZipListing {
    pub postal_codes: Vec<String>,
    pub count: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub correlation_id: String,
}

async fn service_status(State(state): State<ApiState>) -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: "online",
        service: "lanequote",
        version: env!("CARGO_PKG_VERSION"),
        routing: if state.routing_configured { "configured" } else { "fallback" },
    })
}

async fn list_zips(State(state): State<ApiState>) -> Json<ZipListing> {
    let postal_codes: Vec<String> =
        state.table.postal_codes().into_iter().map(str::to_owned).collect();
    let count = postal_codes.len();
    Json(ZipListing { postal_codes, count })
}

async fn create_quote(
    State(state): State<ApiState>,
    Json(request): Json<ShipmentRequest>,
) -> Result<Json<QuoteResponse>, (StatusCode, Json<ErrorBody>)> {
    let correlation_id = Uuid::new_v4().to_string();

    if let Err(validation) = request.validate() {
        warn!(
            event_name = "api.quote_rejected",
            correlation_id = %correlation_id,
            error = %validation,
            "quote request failed validation"
        );
        return Err(reject(ApplicationError::from(validation).into_interface(correlation_id)));
    }

    match state.quote_service.create_quote(&request).await {
        Ok(quote) => Ok(Json(QuoteResponse::from(&quote))),
        Err(failure) => {
            error!(
                event_name = "api.quote_failed",
                correlation_id = %correlation_id,
                error = %failure,
                "quote creation failed"
            );
            Err(reject(failure.into_interface(correlation_id)))
        }
    }
}

fn reject(interface: InterfaceError) -> (StatusCode, Json<ErrorBody>) {
    let status = match &interface {
        InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let correlation_id = match &interface {
        InterfaceError::BadRequest { correlation_id, .. }
        | InterfaceError::ServiceUnavailable { correlation_id, .. }
        | InterfaceError::Internal { correlation_id, .. } => correlation_id.clone(),
    };

    (status, Json(ErrorBody { error: interface.user_message().to_owned(), correlation_id }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use lanequote_core::distance::DistanceResolver;
    use lanequote_core::geo::GeocodeTable;
    use lanequote_core::service::QuoteService;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use super::{router, ApiState};

    fn offline_state() -> ApiState {
        let table = Arc::new(GeocodeTable::builtin());
        let resolver = DistanceResolver::offline(table.clone());
        ApiState {
            quote_service: Arc::new(QuoteService::new(table.clone(), resolver, None)),
            table,
            routing_configured: false,
        }
    }

    fn quote_request_body() -> Value {
        json!({
            "origin_postal_code": "90021",
            "destination_postal_code": "60601",
            "weight_lbs": 800.0,
            "piece_count": 2,
            "dimensions": {"length": 48.0, "width": 40.0, "height": 60.0},
            "special_services": ["liftgate"],
            "commodity": "electronics"
        })
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn health_reports_fallback_when_unconfigured() {
        let response = router(offline_state())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["status"], "online");
        assert_eq!(body["routing"], "fallback");
    }

    #[tokio::test]
    async fn quote_endpoint_returns_rounded_response() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/quotes")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(quote_request_body().to_string()))
            .expect("request");

        let response = router(offline_state()).oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert!(body["quote_id"].as_str().expect("id").starts_with("QT-"));
        assert_eq!(body["breakdown"]["liftgate_fee"], 75.0);
        assert_eq!(body["breakdown"]["climate_control_fee"], 0.0);
        assert_eq!(body["equipment_type"], "dry_van");
        assert!(body.get("route_map_url").is_none());

        let total = body["total_cost"].as_f64().expect("total");
        let sum = ["base_rate", "fuel_surcharge", "liftgate_fee", "climate_control_fee", "insurance"]
            .iter()
            .map(|field| body["breakdown"][field].as_f64().expect("amount"))
            .sum::<f64>();
        assert!((total - sum).abs() <= 0.01, "total {total} vs breakdown sum {sum}");
    }

    #[tokio::test]
    async fn invalid_weight_yields_bad_request_with_correlation_id() {
        let mut payload = quote_request_body();
        payload["weight_lbs"] = json!(0.0);

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/quotes")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request");

        let response = router(offline_state()).oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_json(response).await;
        assert!(!body["correlation_id"].as_str().expect("correlation id").is_empty());
    }

    #[tokio::test]
    async fn unknown_zips_still_quote_via_placeholder() {
        let mut payload = quote_request_body();
        payload["origin_postal_code"] = json!("00001");
        payload["destination_postal_code"] = json!("00002");

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/quotes")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request");

        let response = router(offline_state()).oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["distance_miles"], 1000.0);
        assert_eq!(body["duration_hours"], 16.0);
        assert_eq!(body["transit_days"], 2);
    }

    #[tokio::test]
    async fn zip_listing_is_sorted_and_counted() {
        let response = router(offline_state())
            .oneshot(Request::builder().uri("/api/v1/zips").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        let body = response_json(response).await;
        let codes = body["postal_codes"].as_array().expect("codes");
        assert_eq!(body["count"], codes.len() as u64);
        assert_eq!(codes.first().and_then(Value::as_str), Some("02108"));
    }
}
