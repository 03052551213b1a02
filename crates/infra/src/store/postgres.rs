//! Postgres-backed stores.
//!
//! Queries are built at runtime (`sqlx::query` + `Row::try_get`); the quantity
//! increment is a single `UPDATE ... SET quantity = quantity + $n` statement,
//! which is the store's atomic update primitive.

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use stocktrack_core::{ConsumptionLogId, ItemId};
use stocktrack_inventory::{ConsumptionLog, Item};

use super::{ConsumptionLogStore, ItemStore, StoreError};

/// Create the schema if it does not exist yet.
///
/// Ran once at startup; idempotent.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            quantity BIGINT NOT NULL,
            restock_threshold BIGINT NOT NULL,
            daily_consumption DOUBLE PRECISION NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS consumption_logs (
            id UUID PRIMARY KEY,
            item_id UUID NOT NULL,
            item_name TEXT NOT NULL,
            quantity_used BIGINT NOT NULL,
            date TIMESTAMPTZ NOT NULL,
            notes TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

fn item_from_row(row: &PgRow) -> Result<Item, sqlx::Error> {
    Ok(Item {
        id: ItemId::from_uuid(row.try_get("id")?),
        name: row.try_get("name")?,
        quantity: row.try_get("quantity")?,
        restock_threshold: row.try_get("restock_threshold")?,
        daily_consumption: row.try_get("daily_consumption")?,
    })
}

fn log_from_row(row: &PgRow) -> Result<ConsumptionLog, sqlx::Error> {
    Ok(ConsumptionLog {
        id: ConsumptionLogId::from_uuid(row.try_get("id")?),
        item_id: ItemId::from_uuid(row.try_get("item_id")?),
        item_name: row.try_get("item_name")?,
        quantity_used: row.try_get("quantity_used")?,
        date: row.try_get("date")?,
        notes: row.try_get("notes")?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23505"),
        _ => false,
    }
}

/// Postgres item store.
pub struct PostgresItemStore {
    pool: PgPool,
}

impl PostgresItemStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for PostgresItemStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Item>, StoreError> {
        let row = sqlx::query(
            "SELECT id, name, quantity, restock_threshold, daily_consumption \
             FROM items WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(item_from_row).transpose().map_err(Into::into)
    }

    async fn insert(&self, item: Item) -> Result<Item, StoreError> {
        let result = sqlx::query(
            "INSERT INTO items (id, name, quantity, restock_threshold, daily_consumption) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(item.id.as_uuid())
        .bind(&item.name)
        .bind(item.quantity)
        .bind(item.restock_threshold)
        .bind(item.daily_consumption)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(item),
            Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateName(item.name)),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, name, quantity, restock_threshold, daily_consumption \
             FROM items ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(item_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    async fn increment_quantity(&self, id: ItemId, delta: i64) -> Result<Option<Item>, StoreError> {
        let row = sqlx::query(
            "UPDATE items SET quantity = quantity + $2 WHERE id = $1 \
             RETURNING id, name, quantity, restock_threshold, daily_consumption",
        )
        .bind(id.as_uuid())
        .bind(delta)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(item_from_row).transpose().map_err(Into::into)
    }
}

/// Postgres consumption log store.
pub struct PostgresConsumptionLogStore {
    pool: PgPool,
}

impl PostgresConsumptionLogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConsumptionLogStore for PostgresConsumptionLogStore {
    async fn insert(&self, log: ConsumptionLog) -> Result<ConsumptionLog, StoreError> {
        sqlx::query(
            "INSERT INTO consumption_logs (id, item_id, item_name, quantity_used, date, notes) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(log.id.as_uuid())
        .bind(log.item_id.as_uuid())
        .bind(&log.item_name)
        .bind(log.quantity_used)
        .bind(log.date)
        .bind(&log.notes)
        .execute(&self.pool)
        .await?;

        Ok(log)
    }

    async fn list(&self) -> Result<Vec<ConsumptionLog>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, item_id, item_name, quantity_used, date, notes \
             FROM consumption_logs ORDER BY date DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(log_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    async fn list_for_item(&self, item_name: &str) -> Result<Vec<ConsumptionLog>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, item_id, item_name, quantity_used, date, notes \
             FROM consumption_logs WHERE item_name = $1 ORDER BY date DESC",
        )
        .bind(item_name)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(log_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(Into::into)
    }
}
