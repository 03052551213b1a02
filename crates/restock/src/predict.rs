//! Stock depletion arithmetic.
//!
//! Both functions are pure and total over the validated domain (`quantity >= 0`,
//! `daily_consumption >= 0`): no state, no error paths.

/// Days until the item runs out of stock at the average consumption rate.
///
/// Returns `f64::INFINITY` when `daily_consumption` is zero (the item never
/// depletes under this model). Otherwise the result is a whole number of days,
/// clamped to be non-negative.
pub fn predict_stock_run_out(quantity: i64, daily_consumption: f64) -> f64 {
    if daily_consumption == 0.0 {
        return f64::INFINITY;
    }
    (quantity as f64 / daily_consumption).floor().max(0.0)
}

/// Recommended units to purchase to restore healthy stock.
///
/// Orders enough to both clear the shortfall below the restock threshold and
/// cover a week of projected consumption, whichever is larger.
pub fn recommend_reorder_quantity(quantity: i64, restock_threshold: i64, daily_consumption: f64) -> i64 {
    let weekly_consumption = (daily_consumption * 7.0).floor() as i64;
    (restock_threshold - quantity).max(weekly_consumption)
}
