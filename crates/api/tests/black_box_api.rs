use chrono::{Duration as ChronoDuration, Utc};
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = stocktrack_api::app::build_app().await;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn add_item(
    client: &reqwest::Client,
    base_url: &str,
    name: &str,
    quantity: i64,
    restock_threshold: i64,
    daily_consumption: f64,
) -> (StatusCode, serde_json::Value) {
    let res = client
        .post(format!("{}/items", base_url))
        .json(&json!({
            "name": name,
            "quantity": quantity,
            "restock_threshold": restock_threshold,
            "daily_consumption": daily_consumption,
        }))
        .send()
        .await
        .unwrap();

    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn health_is_available() {
    let srv = TestServer::spawn().await;

    let res = reqwest::Client::new()
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn adding_an_existing_name_tops_up_quantity() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = add_item(&client, &srv.base_url, "PC", 5, 10, 2.0).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["action"], "item_created");
    assert_eq!(body["item"]["quantity"], 5);
    let id = body["item"]["id"].as_str().unwrap().to_string();

    let (status, body) = add_item(&client, &srv.base_url, "PC", 3, 10, 2.0).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], "quantity_updated");
    assert_eq!(body["item"]["quantity"], 8);
    // Same record, not a duplicate.
    assert_eq!(body["item"]["id"].as_str().unwrap(), id);
}

#[tokio::test]
async fn add_item_rejects_invalid_payloads() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = add_item(&client, &srv.base_url, "PC", 5, 0, 2.0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, _) = add_item(&client, &srv.base_url, "   ", 5, 10, 2.0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = add_item(&client, &srv.base_url, "PC", -1, 10, 2.0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = add_item(&client, &srv.base_url, "PC", 5, 10, 0.0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listing_classifies_stock_status() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    add_item(&client, &srv.base_url, "Empty", 0, 10, 1.0).await;
    add_item(&client, &srv.base_url, "Low", 10, 10, 1.0).await;
    add_item(&client, &srv.base_url, "Full", 11, 10, 1.0).await;

    let res = client
        .get(format!("{}/items", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let items: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(items.len(), 3);

    let status_of = |name: &str| {
        items
            .iter()
            .find(|i| i["name"] == name)
            .unwrap_or_else(|| panic!("item {name} missing from listing"))["status"]
            .clone()
    };
    assert_eq!(status_of("Empty"), "out-of-stock");
    assert_eq!(status_of("Low"), "low-stock");
    assert_eq!(status_of("Full"), "in-stock");
}

#[tokio::test]
async fn consumption_decrements_stock_and_appends_a_log() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    add_item(&client, &srv.base_url, "Laptop", 10, 4, 1.5).await;

    // Unknown item.
    let res = client
        .post(format!("{}/consumption", srv.base_url))
        .json(&json!({
            "item_name": "Ghost",
            "quantity_used": 1,
            "date": Utc::now().to_rfc3339(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // More than is on hand.
    let res = client
        .post(format!("{}/consumption", srv.base_url))
        .json(&json!({
            "item_name": "Laptop",
            "quantity_used": 11,
            "date": Utc::now().to_rfc3339(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "insufficient_stock");

    // A valid event.
    let res = client
        .post(format!("{}/consumption", srv.base_url))
        .json(&json!({
            "item_name": "Laptop",
            "quantity_used": 4,
            "date": Utc::now().to_rfc3339(),
            "notes": "issued to new hire",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let receipt: serde_json::Value = res.json().await.unwrap();
    assert_eq!(receipt["message"], "Consumption logged");
    assert_eq!(receipt["item_name"], "Laptop");
    assert_eq!(receipt["quantity_used"], 4);

    // Stock went down.
    let res = client
        .get(format!("{}/items", srv.base_url))
        .send()
        .await
        .unwrap();
    let items: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(items[0]["quantity"], 6);

    // And the log is queryable, including by item name.
    let res = client
        .get(format!("{}/consumption", srv.base_url))
        .send()
        .await
        .unwrap();
    let logs: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["notes"], "issued to new hire");

    let res = client
        .get(format!("{}/consumption?item_name=Ghost", srv.base_url))
        .send()
        .await
        .unwrap();
    let logs: Vec<serde_json::Value> = res.json().await.unwrap();
    assert!(logs.is_empty());
}

#[tokio::test]
async fn restock_alerts_cover_items_close_to_stockout() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    add_item(&client, &srv.base_url, "PC", 5, 10, 2.0).await; // 2 days out
    add_item(&client, &srv.base_url, "Desk", 100, 10, 2.0).await; // 50 days out

    let res = client
        .get(format!("{}/restock/alerts", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let alerts: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["item_name"], "PC");
    assert_eq!(alerts[0]["current_stock"], 5);
    assert_eq!(alerts[0]["predicted_days_to_run_out"], 2);
    // max(10 - 5, floor(2.0 * 7)) = 14
    assert_eq!(alerts[0]["recommended_reorder_quantity"], 14);
}

#[tokio::test]
async fn restock_calendar_projects_dated_entries() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    add_item(&client, &srv.base_url, "Paper", 10, 4, 2.0).await; // 5 days out
    add_item(&client, &srv.base_url, "Toner", 80, 4, 2.0).await; // 40 days out

    let before = Utc::now().date_naive();
    let res = client
        .get(format!("{}/restock/calendar", srv.base_url))
        .send()
        .await
        .unwrap();
    let after = Utc::now().date_naive();
    assert_eq!(res.status(), StatusCode::OK);

    let calendar: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(calendar.len(), 1);
    assert_eq!(calendar[0]["item_name"], "Paper");
    assert_eq!(calendar[0]["recommended_quantity"], 14);

    // Tolerate a UTC date rollover between request and assertion.
    let expected: Vec<String> = [before, after]
        .iter()
        .map(|d| (*d + ChronoDuration::days(5)).format("%Y-%m-%d").to_string())
        .collect();
    let date = calendar[0]["restock_date"].as_str().unwrap();
    assert!(expected.iter().any(|e| e == date), "unexpected restock_date {date}");
}
