//! In-memory store

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Store;
use crate::{
    error::{AppError, AppResult},
    models::Entity,
};

/// Records of one kind held in a vector behind an async lock
pub struct MemoryStore<E> {
    records: RwLock<Vec<E>>,
}

impl<E: Entity> MemoryStore<E> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<E: Entity> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted<E: Entity>(mut records: Vec<E>) -> Vec<E> {
    records.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
    records
}

#[async_trait]
impl<E: Entity> Store<E> for MemoryStore<E> {
    async fn find_all_sorted(&self) -> AppResult<Vec<E>> {
        Ok(sorted(self.records.read().await.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<E>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn find_where(&self, filter: &E::Filter) -> AppResult<Vec<E>> {
        let records = self.records.read().await;
        Ok(sorted(
            records.iter().filter(|r| r.matches(filter)).cloned().collect(),
        ))
    }

    async fn insert(&self, entity: &E) -> AppResult<E> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id() == entity.id()) {
            return Err(AppError::Internal(format!(
                "{} {} already exists",
                E::KIND.slug(),
                entity.id()
            )));
        }
        records.push(entity.clone());
        Ok(entity.clone())
    }

    async fn remove_by_id(&self, id: Uuid) -> AppResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id() != id);
        Ok(records.len() < before)
    }

    async fn update_by_id(&self, id: Uuid, entity: &E) -> AppResult<Option<E>> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id() == id) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(Some(entity.clone()))
            }
            None => Ok(None),
        }
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.records.read().await.len() as i64)
    }
}
