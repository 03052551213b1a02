//! Infrastructure adapters: persistence for the inventory domain.
//!
//! The domain crates stay IO-free; this crate owns the store traits and their
//! in-memory (dev/test) and Postgres (persistent) implementations.

pub mod store;

pub use store::{
    ConsumptionLogStore, InMemoryConsumptionLogStore, InMemoryItemStore, ItemStore,
    PostgresConsumptionLogStore, PostgresItemStore, StoreError,
};
