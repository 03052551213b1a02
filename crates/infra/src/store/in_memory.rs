//! In-memory stores for tests/dev.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use stocktrack_core::ItemId;
use stocktrack_inventory::{ConsumptionLog, Item};

use super::{ConsumptionLogStore, ItemStore, StoreError};

/// In-memory item store. Increments are atomic under the write lock.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    inner: RwLock<HashMap<ItemId, Item>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Item>, StoreError> {
        let map = self.inner.read().expect("item store lock poisoned");
        Ok(map.values().find(|item| item.name == name).cloned())
    }

    async fn insert(&self, item: Item) -> Result<Item, StoreError> {
        let mut map = self.inner.write().expect("item store lock poisoned");
        if map.values().any(|existing| existing.name == item.name) {
            return Err(StoreError::DuplicateName(item.name));
        }
        map.insert(item.id, item.clone());
        Ok(item)
    }

    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        let map = self.inner.read().expect("item store lock poisoned");
        let mut items: Vec<Item> = map.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn increment_quantity(&self, id: ItemId, delta: i64) -> Result<Option<Item>, StoreError> {
        let mut map = self.inner.write().expect("item store lock poisoned");
        Ok(map.get_mut(&id).map(|item| {
            item.quantity += delta;
            item.clone()
        }))
    }
}

/// In-memory consumption log store (append-only).
#[derive(Debug, Default)]
pub struct InMemoryConsumptionLogStore {
    inner: RwLock<Vec<ConsumptionLog>>,
}

impl InMemoryConsumptionLogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConsumptionLogStore for InMemoryConsumptionLogStore {
    async fn insert(&self, log: ConsumptionLog) -> Result<ConsumptionLog, StoreError> {
        let mut logs = self.inner.write().expect("log store lock poisoned");
        logs.push(log.clone());
        Ok(log)
    }

    async fn list(&self) -> Result<Vec<ConsumptionLog>, StoreError> {
        let logs = self.inner.read().expect("log store lock poisoned");
        Ok(logs.clone())
    }

    async fn list_for_item(&self, item_name: &str) -> Result<Vec<ConsumptionLog>, StoreError> {
        let logs = self.inner.read().expect("log store lock poisoned");
        Ok(logs
            .iter()
            .filter(|log| log.item_name == item_name)
            .cloned()
            .collect())
    }
}
