//! Document-style stores for items and consumption logs.
//!
//! The contract mirrors what the service layer needs and nothing more: find,
//! insert, list, and an **atomic** quantity increment. The increment is the
//! only primitive guarding concurrent quantity updates; there is no further
//! locking and no transactions.

use async_trait::async_trait;
use thiserror::Error;

use stocktrack_core::ItemId;
use stocktrack_inventory::{ConsumptionLog, Item};

pub mod in_memory;
pub mod postgres;

pub use in_memory::{InMemoryConsumptionLogStore, InMemoryItemStore};
pub use postgres::{PostgresConsumptionLogStore, PostgresItemStore};

/// Storage-level error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An insert collided with the unique item-name key.
    #[error("item '{0}' already exists")]
    DuplicateName(String),

    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Store of [`Item`] records, keyed by id with a unique name index.
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<Item>, StoreError>;

    /// Insert a new item. Fails with [`StoreError::DuplicateName`] if the name
    /// is already taken.
    async fn insert(&self, item: Item) -> Result<Item, StoreError>;

    async fn list(&self) -> Result<Vec<Item>, StoreError>;

    /// Atomically add `delta` (may be negative) to the item's quantity and
    /// return the updated record, or `None` if the item does not exist.
    async fn increment_quantity(&self, id: ItemId, delta: i64) -> Result<Option<Item>, StoreError>;
}

/// Append-only store of [`ConsumptionLog`] records.
#[async_trait]
pub trait ConsumptionLogStore: Send + Sync {
    async fn insert(&self, log: ConsumptionLog) -> Result<ConsumptionLog, StoreError>;

    async fn list(&self) -> Result<Vec<ConsumptionLog>, StoreError>;

    async fn list_for_item(&self, item_name: &str) -> Result<Vec<ConsumptionLog>, StoreError>;
}
