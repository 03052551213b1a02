use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use crate::app::services::{AddItemOutcome, AppServices};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", post(add_item).get(list_items))
}

/// Add stock. A repeated name tops up the existing item's quantity instead of
/// creating a duplicate.
pub async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::AddItemRequest>,
) -> axum::response::Response {
    match services.add_item(body.into_new_item()).await {
        Ok(AddItemOutcome::Created(item)) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "Item added successfully",
                "item": dto::item_to_json(&item),
                "action": "item_created",
            })),
        )
            .into_response(),
        Ok(AddItemOutcome::QuantityUpdated(item)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "Item quantity updated successfully",
                "item": dto::item_to_json(&item),
                "action": "quantity_updated",
            })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_items().await {
        Ok(items) => {
            let items: Vec<serde_json::Value> = items.iter().map(dto::item_to_json).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}
