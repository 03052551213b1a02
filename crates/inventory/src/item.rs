use serde::{Deserialize, Serialize};

use stocktrack_core::{DomainError, DomainResult, Entity, ItemId};

/// Stock level classification reported by item listings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

/// A tracked inventory item.
///
/// `quantity` only changes through the store's atomic increment, tied to a
/// restock (add) or consumption event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub quantity: i64,
    pub restock_threshold: i64,
    pub daily_consumption: f64,
}

impl Item {
    /// Materialize a validated [`NewItem`] with a fresh identifier.
    pub fn new(new: NewItem) -> Self {
        Self {
            id: ItemId::new(),
            name: new.name,
            quantity: new.quantity,
            restock_threshold: new.restock_threshold,
            daily_consumption: new.daily_consumption,
        }
    }

    /// Classify the current stock level against the restock threshold.
    pub fn status(&self) -> StockStatus {
        if self.quantity <= 0 {
            StockStatus::OutOfStock
        } else if self.quantity <= self.restock_threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &ItemId {
        &self.id
    }
}

/// Input for adding stock: creates the item on first use, increments the
/// existing item's quantity on subsequent adds with the same name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub quantity: i64,
    pub restock_threshold: i64,
    pub daily_consumption: f64,
}

impl NewItem {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        if self.restock_threshold <= 0 {
            return Err(DomainError::validation("restock_threshold must be positive"));
        }
        if !(self.daily_consumption.is_finite() && self.daily_consumption > 0.0) {
            return Err(DomainError::validation(
                "daily_consumption must be a positive number",
            ));
        }
        Ok(())
    }
}
