use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stocktrack_core::{ConsumptionLogId, DomainError, DomainResult, Entity, ItemId};

use crate::item::Item;

/// Immutable record of a single consumption event.
///
/// Items are referenced by name; the item id is kept denormalized so log
/// queries never need a join back to the items collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionLog {
    pub id: ConsumptionLogId,
    pub item_id: ItemId,
    pub item_name: String,
    pub quantity_used: i64,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
}

impl ConsumptionLog {
    /// Build the log record for a validated consumption event against `item`.
    pub fn record(item: &Item, event: NewConsumption) -> Self {
        Self {
            id: ConsumptionLogId::new(),
            item_id: item.id,
            item_name: item.name.clone(),
            quantity_used: event.quantity_used,
            date: event.date,
            notes: event.notes,
        }
    }
}

impl Entity for ConsumptionLog {
    type Id = ConsumptionLogId;

    fn id(&self) -> &ConsumptionLogId {
        &self.id
    }
}

/// Input for logging a consumption event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewConsumption {
    pub item_name: String,
    pub quantity_used: i64,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
}

impl NewConsumption {
    pub fn validate(&self) -> DomainResult<()> {
        if self.item_name.trim().is_empty() {
            return Err(DomainError::validation("item_name cannot be empty"));
        }
        if self.quantity_used <= 0 {
            return Err(DomainError::validation("quantity_used must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(quantity_used: i64) -> NewConsumption {
        NewConsumption {
            item_name: "Laptop".to_string(),
            quantity_used,
            date: Utc::now(),
            notes: None,
        }
    }

    #[test]
    fn rejects_non_positive_usage() {
        assert!(event(0).validate().is_err());
        assert!(event(-3).validate().is_err());
        assert!(event(1).validate().is_ok());
    }

    #[test]
    fn record_carries_item_identity() {
        let item = Item {
            id: stocktrack_core::ItemId::new(),
            name: "Laptop".to_string(),
            quantity: 10,
            restock_threshold: 4,
            daily_consumption: 1.5,
        };

        let log = ConsumptionLog::record(&item, event(5));
        assert_eq!(log.item_id, item.id);
        assert_eq!(log.item_name, item.name);
        assert_eq!(log.quantity_used, 5);
    }
}
