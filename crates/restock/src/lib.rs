//! Restock prediction domain module.
//!
//! Deterministic stock depletion arithmetic plus the pure builders that turn a
//! set of items into restock alert and calendar payloads. No IO, no clocks of
//! its own (callers supply "today").

pub mod planner;
pub mod predict;

pub use planner::{
    build_alerts, build_calendar, RestockAlert, RestockCalendarEntry, ALERT_HORIZON_DAYS,
    CALENDAR_HORIZON_DAYS,
};
pub use predict::{predict_stock_run_out, recommend_reorder_quantity};
