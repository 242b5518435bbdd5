//! In-process item store. Keeps insertion order; has no associations.

use super::{not_found, ItemStore};
use crate::error::AppError;
use crate::models::{Item, LoadedItem};
use async_trait::async_trait;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
pub struct MemoryItemStore {
    items: RwLock<Vec<Item>>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Item>>, AppError> {
        self.items
            .read()
            .map_err(|_| AppError::Internal("item store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Item>>, AppError> {
        self.items
            .write()
            .map_err(|_| AppError::Internal("item store lock poisoned".into()))
    }

    fn snapshot(&self) -> Result<Vec<LoadedItem>, AppError> {
        Ok(self.read()?.iter().cloned().map(LoadedItem::from).collect())
    }

    fn find(&self, id: &str) -> Result<LoadedItem, AppError> {
        self.read()?
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .map(LoadedItem::from)
            .ok_or_else(|| not_found(id))
    }

    fn insert(&self, item: &Item) -> Result<(), AppError> {
        let mut items = self.write()?;
        if items.iter().any(|i| i.id == item.id) {
            return Err(AppError::Conflict(format!("item {} already exists", item.id)));
        }
        items.push(item.clone());
        Ok(())
    }

    fn upsert(&self, item: &Item) -> Result<(), AppError> {
        let mut items = self.write()?;
        match items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => *existing = item.clone(),
            None => items.push(item.clone()),
        }
        Ok(())
    }

    fn remove(&self, id: &str) -> Result<(), AppError> {
        let mut items = self.write()?;
        let pos = items.iter().position(|i| i.id == id).ok_or_else(|| not_found(id))?;
        items.remove(pos);
        Ok(())
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn get_all(&self) -> Result<Vec<LoadedItem>, AppError> {
        self.snapshot()
    }

    async fn get_by_id(&self, id: &str) -> Result<LoadedItem, AppError> {
        self.find(id)
    }

    async fn create(&self, item: &Item) -> Result<(), AppError> {
        self.insert(item)
    }

    async fn update(&self, item: &Item) -> Result<(), AppError> {
        self.upsert(item)
    }

    async fn delete(&self, item: &Item) -> Result<(), AppError> {
        self.remove(&item.id)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
