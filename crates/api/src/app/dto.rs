use chrono::{DateTime, Utc};
use serde::Deserialize;

use stocktrack_inventory::{ConsumptionLog, Item, NewConsumption, NewItem};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub name: String,
    pub quantity: i64,
    pub restock_threshold: i64,
    pub daily_consumption: f64,
}

impl AddItemRequest {
    pub fn into_new_item(self) -> NewItem {
        NewItem {
            name: self.name,
            quantity: self.quantity,
            restock_threshold: self.restock_threshold,
            daily_consumption: self.daily_consumption,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LogConsumptionRequest {
    pub item_name: String,
    pub quantity_used: i64,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
}

impl LogConsumptionRequest {
    pub fn into_new_consumption(self) -> NewConsumption {
        NewConsumption {
            item_name: self.item_name,
            quantity_used: self.quantity_used,
            date: self.date,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConsumptionListQuery {
    pub item_name: Option<String>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn item_to_json(item: &Item) -> serde_json::Value {
    serde_json::json!({
        "id": item.id.to_string(),
        "name": item.name,
        "quantity": item.quantity,
        "status": item.status(),
        "restock_threshold": item.restock_threshold,
        "daily_consumption": item.daily_consumption,
    })
}

pub fn consumption_receipt_to_json(log: &ConsumptionLog) -> serde_json::Value {
    serde_json::json!({
        "message": "Consumption logged",
        "log_id": log.id.to_string(),
        "item_id": log.item_id.to_string(),
        "item_name": log.item_name,
        "quantity_used": log.quantity_used,
        "timestamp": log.date.to_rfc3339(),
    })
}
