use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", post(log_consumption).get(list_consumption))
}

/// Log a consumption event: decrements the item's stock and records an
/// immutable log entry.
pub async fn log_consumption(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LogConsumptionRequest>,
) -> axum::response::Response {
    match services.log_consumption(body.into_new_consumption()).await {
        Ok(log) => (StatusCode::OK, Json(dto::consumption_receipt_to_json(&log))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_consumption(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ConsumptionListQuery>,
) -> axum::response::Response {
    match services.list_consumption(query.item_name.as_deref()).await {
        Ok(logs) => (StatusCode::OK, Json(logs)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
