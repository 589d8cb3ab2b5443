//! # Storage Traits
//!
//! Storage abstractions the domain layer depends on. The hosted tables and
//! the browser key-value store are both reached only through these traits,
//! so services can be tested against any implementation.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use shared::{DatedItem, ItemField, ItemKind};
use thiserror::Error;

/// Typed failures a storage implementation reports through `anyhow`
#[derive(Debug, Error, PartialEq)]
pub enum StorageError {
    #[error("No row with id '{id}' in table {table}")]
    NotFound { table: &'static str, id: String },
    #[error("Row with id '{id}' already exists in table {table}")]
    Duplicate { table: &'static str, id: String },
}

/// Table access for press releases, content items and media plans
#[async_trait]
pub trait ItemStorage: Send + Sync {
    /// Fetch all rows of a table in stored order
    async fn list_items(&self, kind: ItemKind) -> Result<Vec<DatedItem>>;

    async fn get_item(&self, kind: ItemKind, id: &str) -> Result<Option<DatedItem>>;

    /// Insert a new row
    async fn store_item(&self, item: &DatedItem) -> Result<()>;

    /// Insert several rows into one table in a single write. Nothing is
    /// stored if any id collides with an existing row or with another
    /// row of the batch.
    async fn store_items(&self, kind: ItemKind, items: &[DatedItem]) -> Result<()>;

    /// Update exactly one field of one row.
    /// Fails with [`StorageError::NotFound`] when the row does not exist.
    async fn update_field(&self, kind: ItemKind, id: &str, field: ItemField, value: &str) -> Result<()>;

    /// Returns true if the row existed
    async fn delete_item(&self, kind: ItemKind, id: &str) -> Result<bool>;
}

/// Key-value persistence for UI preferences (read notifications, KPI
/// targets, column choices)
pub trait PreferenceStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>>;

    fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Returns true if the key existed
    fn remove(&self, key: &str) -> Result<bool>;
}
