//! Store wiring + application services.
//!
//! `build_services` selects the store implementation from the environment
//! (in-memory for dev/test, Postgres when `USE_PERSISTENT_STORES=true`); the
//! methods on [`AppServices`] are the orchestration layer between HTTP
//! handlers and the stores/predictor.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use thiserror::Error;

use stocktrack_core::DomainError;
use stocktrack_infra::store::postgres;
use stocktrack_infra::{
    ConsumptionLogStore, InMemoryConsumptionLogStore, InMemoryItemStore, ItemStore,
    PostgresConsumptionLogStore, PostgresItemStore, StoreError,
};
use stocktrack_inventory::{ConsumptionLog, Item, NewConsumption, NewItem};
use stocktrack_restock::{RestockAlert, RestockCalendarEntry, build_alerts, build_calendar};

/// Error surfaced by the application services (mapped to HTTP in `errors.rs`).
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of an add-item request: the same endpoint creates on first use and
/// tops up the quantity on repeat names.
#[derive(Debug, Clone)]
pub enum AddItemOutcome {
    Created(Item),
    QuantityUpdated(Item),
}

/// Application services shared across handlers via `Extension`.
pub struct AppServices {
    items: Arc<dyn ItemStore>,
    logs: Arc<dyn ConsumptionLogStore>,
}

pub async fn build_services() -> AppServices {
    let use_persistent = std::env::var("USE_PERSISTENT_STORES")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    if use_persistent {
        match std::env::var("DATABASE_URL") {
            Ok(url) => return build_postgres_services(&url).await,
            Err(_) => tracing::warn!(
                "USE_PERSISTENT_STORES=true but DATABASE_URL not set, falling back to in-memory stores"
            ),
        }
    }

    build_in_memory_services()
}

fn build_in_memory_services() -> AppServices {
    AppServices::new(
        Arc::new(InMemoryItemStore::new()),
        Arc::new(InMemoryConsumptionLogStore::new()),
    )
}

async fn build_postgres_services(database_url: &str) -> AppServices {
    let pool = PgPool::connect(database_url)
        .await
        .expect("failed to connect to Postgres");

    postgres::run_migrations(&pool)
        .await
        .expect("failed to create schema");

    AppServices::new(
        Arc::new(PostgresItemStore::new(pool.clone())),
        Arc::new(PostgresConsumptionLogStore::new(pool)),
    )
}

impl AppServices {
    pub fn new(items: Arc<dyn ItemStore>, logs: Arc<dyn ConsumptionLogStore>) -> Self {
        Self { items, logs }
    }

    /// Add stock: create the item, or atomically top up the quantity when an
    /// item with the same name already exists.
    pub async fn add_item(&self, new: NewItem) -> Result<AddItemOutcome, ServiceError> {
        new.validate()?;

        if let Some(existing) = self.items.find_by_name(&new.name).await? {
            let updated = self
                .items
                .increment_quantity(existing.id, new.quantity)
                .await?
                .ok_or(DomainError::NotFound)?;
            tracing::info!(item = %updated.name, quantity = updated.quantity, "item quantity updated");
            return Ok(AddItemOutcome::QuantityUpdated(updated));
        }

        let created = self.items.insert(Item::new(new)).await?;
        tracing::info!(item = %created.name, quantity = created.quantity, "item created");
        Ok(AddItemOutcome::Created(created))
    }

    pub async fn list_items(&self) -> Result<Vec<Item>, ServiceError> {
        Ok(self.items.list().await?)
    }

    /// Log a consumption event: verify stock, atomically decrement the item
    /// quantity, and append the immutable log record.
    pub async fn log_consumption(
        &self,
        event: NewConsumption,
    ) -> Result<ConsumptionLog, ServiceError> {
        event.validate()?;

        let item = self
            .items
            .find_by_name(&event.item_name)
            .await?
            .ok_or(DomainError::NotFound)?;

        if item.quantity < event.quantity_used {
            return Err(DomainError::InsufficientStock {
                available: item.quantity,
                requested: event.quantity_used,
            }
            .into());
        }

        self.items
            .increment_quantity(item.id, -event.quantity_used)
            .await?
            .ok_or(DomainError::NotFound)?;

        let log = self.logs.insert(ConsumptionLog::record(&item, event)).await?;
        tracing::info!(item = %log.item_name, used = log.quantity_used, "consumption logged");
        Ok(log)
    }

    pub async fn list_consumption(
        &self,
        item_name: Option<&str>,
    ) -> Result<Vec<ConsumptionLog>, ServiceError> {
        match item_name {
            Some(name) => Ok(self.logs.list_for_item(name).await?),
            None => Ok(self.logs.list().await?),
        }
    }

    /// Items predicted to run out within the alert horizon.
    pub async fn restock_alerts(&self) -> Result<Vec<RestockAlert>, ServiceError> {
        let items = self.items.list().await?;
        Ok(build_alerts(&items))
    }

    /// Weekly restock calendar anchored at today's date.
    pub async fn restock_calendar(&self) -> Result<Vec<RestockCalendarEntry>, ServiceError> {
        let items = self.items.list().await?;
        Ok(build_calendar(&items, Utc::now()))
    }
}
