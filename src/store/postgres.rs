//! PostgreSQL-backed item store.

use super::{not_found, row_to_json, ItemStore};
use crate::config::AssociationConfig;
use crate::error::AppError;
use crate::models::{Item, LoadedItem};
use crate::sql::{delete_children, delete_item, insert_item, select_children, select_item_by_id, select_items, upsert_item};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;
use sqlx::PgPool;
use std::collections::HashMap;

pub struct PgItemStore {
    pool: PgPool,
    associations: Vec<AssociationConfig>,
}

impl PgItemStore {
    pub fn new(pool: PgPool, associations: Vec<AssociationConfig>) -> Self {
        PgItemStore { pool, associations }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Attach child rows for every configured association: one query per association covering
    /// all items, never one per item. Items without children get an empty array.
    async fn load_associations(&self, items: Vec<Item>) -> Result<Vec<LoadedItem>, AppError> {
        let mut loaded: Vec<LoadedItem> = items.into_iter().map(LoadedItem::from).collect();
        if self.associations.is_empty() || loaded.is_empty() {
            return Ok(loaded);
        }
        let ids: Vec<String> = loaded.iter().map(|l| l.item.id.clone()).collect();

        for assoc in &self.associations {
            let sql = select_children(assoc);
            tracing::debug!(sql = %sql, ids = ids.len(), "query");
            let rows = sqlx::query(&sql).bind(&ids[..]).fetch_all(&self.pool).await?;

            let mut by_parent: HashMap<String, Vec<Value>> = HashMap::new();
            for row in &rows {
                let child = row_to_json(row);
                let parent = match child.get(&assoc.foreign_key) {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Null) | None => continue,
                    Some(other) => other.to_string(),
                };
                by_parent.entry(parent).or_default().push(child);
            }
            for l in &mut loaded {
                let children = by_parent.remove(&l.item.id).unwrap_or_default();
                l.associations.insert(assoc.name.clone(), children);
            }
        }
        Ok(loaded)
    }
}

fn bind_item<'q>(query: Query<'q, Postgres, PgArguments>, item: &'q Item) -> Query<'q, Postgres, PgArguments> {
    query
        .bind(item.id.as_str())
        .bind(item.name.as_str())
        .bind(item.category_id.as_str())
        .bind(item.active)
        .bind(item.sold_by_type.as_str())
        .bind(item.price)
        .bind(item.cost)
        .bind(item.sku.as_str())
        .bind(item.barcode.as_str())
        .bind(item.track_stock)
        .bind(item.color.as_str())
        .bind(item.image.as_str())
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn get_all(&self) -> Result<Vec<LoadedItem>, AppError> {
        let sql = select_items();
        tracing::debug!(sql = %sql, "query");
        let items: Vec<Item> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        self.load_associations(items).await
    }

    async fn get_by_id(&self, id: &str) -> Result<LoadedItem, AppError> {
        let sql = select_item_by_id();
        tracing::debug!(sql = %sql, id = %id, "query");
        let item: Item = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))?;
        let mut loaded = self.load_associations(vec![item]).await?;
        loaded.pop().ok_or_else(|| not_found(id))
    }

    async fn create(&self, item: &Item) -> Result<(), AppError> {
        let sql = insert_item();
        tracing::debug!(sql = %sql, id = %item.id, "query");
        bind_item(sqlx::query(&sql), item).execute(&self.pool).await?;
        Ok(())
    }

    async fn update(&self, item: &Item) -> Result<(), AppError> {
        let sql = upsert_item();
        tracing::debug!(sql = %sql, id = %item.id, "query");
        bind_item(sqlx::query(&sql), item).execute(&self.pool).await?;
        Ok(())
    }

    async fn delete(&self, item: &Item) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        for assoc in &self.associations {
            let sql = delete_children(assoc);
            let result = sqlx::query(&sql).bind(item.id.as_str()).execute(&mut *tx).await?;
            tracing::debug!(sql = %sql, id = %item.id, rows = result.rows_affected(), "query (tx)");
        }
        let sql = delete_item();
        tracing::debug!(sql = %sql, id = %item.id, "query (tx)");
        let result = sqlx::query(&sql).bind(item.id.as_str()).execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            // Dropping the transaction rolls back the child deletes.
            return Err(not_found(&item.id));
        }
        tx.commit().await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
