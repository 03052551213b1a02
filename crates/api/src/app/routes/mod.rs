use axum::Router;

pub mod consumption;
pub mod items;
pub mod restock;
pub mod system;

/// Router for all inventory endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/items", items::router())
        .nest("/consumption", consumption::router())
        .nest("/restock", restock::router())
}
