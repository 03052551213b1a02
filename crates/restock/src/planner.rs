//! Restock projections over the item set.
//!
//! Pure builders: the caller fetches the items (and supplies today's date for
//! the calendar); these functions only apply the prediction arithmetic and
//! shape the payloads.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use stocktrack_core::ItemId;
use stocktrack_inventory::Item;

use crate::predict::{predict_stock_run_out, recommend_reorder_quantity};

/// Items predicted to run out within this many days raise an alert.
pub const ALERT_HORIZON_DAYS: f64 = 3.0;

/// Items predicted to run out within this many days land on the weekly calendar.
pub const CALENDAR_HORIZON_DAYS: f64 = 7.0;

/// Alert payload for an item close to stockout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestockAlert {
    pub item_id: ItemId,
    pub item_name: String,
    pub current_stock: i64,
    pub predicted_days_to_run_out: i64,
    pub recommended_reorder_quantity: i64,
}

/// Calendar entry projecting when an item should be restocked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestockCalendarEntry {
    pub item_id: ItemId,
    pub item_name: String,
    pub restock_date: String,
    pub recommended_quantity: i64,
}

/// Alerts for every item predicted to run out within [`ALERT_HORIZON_DAYS`].
///
/// Items that never deplete (infinite prediction) are naturally excluded by
/// the horizon filter.
pub fn build_alerts(items: &[Item]) -> Vec<RestockAlert> {
    items
        .iter()
        .filter_map(|item| {
            let days = predict_stock_run_out(item.quantity, item.daily_consumption);
            if days > ALERT_HORIZON_DAYS {
                return None;
            }
            Some(RestockAlert {
                item_id: item.id,
                item_name: item.name.clone(),
                current_stock: item.quantity,
                predicted_days_to_run_out: days as i64,
                recommended_reorder_quantity: recommend_reorder_quantity(
                    item.quantity,
                    item.restock_threshold,
                    item.daily_consumption,
                ),
            })
        })
        .collect()
}

/// Weekly restock calendar: items due within [`CALENDAR_HORIZON_DAYS`], each
/// dated `today + predicted days` (formatted `YYYY-MM-DD`).
pub fn build_calendar(items: &[Item], today: DateTime<Utc>) -> Vec<RestockCalendarEntry> {
    items
        .iter()
        .filter_map(|item| {
            let days = predict_stock_run_out(item.quantity, item.daily_consumption);
            if days > CALENDAR_HORIZON_DAYS {
                return None;
            }
            let restock_date = today + Duration::days(days as i64);
            Some(RestockCalendarEntry {
                item_id: item.id,
                item_name: item.name.clone(),
                restock_date: restock_date.format("%Y-%m-%d").to_string(),
                recommended_quantity: recommend_reorder_quantity(
                    item.quantity,
                    item.restock_threshold,
                    item.daily_consumption,
                ),
            })
        })
        .collect()
}
