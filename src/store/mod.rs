//! Data access layer for items.
//!
//! Handlers talk to an [`ItemStore`]; the process wires in [`PgItemStore`] at startup and tests
//! use [`MemoryItemStore`]. Errors are returned as-is; nothing here retries.

mod memory;
mod postgres;
mod row;

pub use memory::MemoryItemStore;
pub use postgres::PgItemStore;
pub use row::row_to_json;

use crate::error::AppError;
use crate::models::{Item, LoadedItem};
use async_trait::async_trait;

#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Every item with its associations. No ordering, filtering or paging.
    async fn get_all(&self) -> Result<Vec<LoadedItem>, AppError>;

    /// Exact id match with associations. Missing ids are an error.
    async fn get_by_id(&self, id: &str) -> Result<LoadedItem, AppError>;

    /// Insert a new item with all fields as given.
    async fn create(&self, item: &Item) -> Result<(), AppError>;

    /// Full replace keyed by id; inserts when the id is unknown.
    async fn update(&self, item: &Item) -> Result<(), AppError>;

    /// Remove the item's association rows and then the item, atomically.
    /// Deleting an unknown id is an error.
    async fn delete(&self, item: &Item) -> Result<(), AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

pub(crate) fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("item {}", id))
}
