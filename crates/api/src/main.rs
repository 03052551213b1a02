#[tokio::main]
async fn main() {
    // Local development reads DATABASE_URL etc. from .env when present.
    dotenvy::dotenv().ok();
    stocktrack_observability::init();

    let app = stocktrack_api::app::build_app().await;

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {bind_addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
