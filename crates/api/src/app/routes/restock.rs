use std::sync::Arc;

use axum::{
    Json, Router, extract::Extension, http::StatusCode, response::IntoResponse, routing::get,
};

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/alerts", get(restock_alerts))
        .route("/calendar", get(restock_calendar))
}

/// Items predicted to run out within the 3-day alert horizon.
pub async fn restock_alerts(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.restock_alerts().await {
        Ok(alerts) => (StatusCode::OK, Json(alerts)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// Weekly restock calendar: due items dated `today + predicted days`.
pub async fn restock_calendar(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.restock_calendar().await {
        Ok(calendar) => (StatusCode::OK, Json(calendar)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
