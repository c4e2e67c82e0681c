use async_trait::async_trait;

use crate::resource::Entity;
use crate::{CoreError, CoreResult};

/// Repository trait for one collection of entities
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// All entities in insertion order.
    async fn list(&self) -> CoreResult<Vec<T>>;

    async fn get(&self, id: &str) -> CoreResult<Option<T>>;

    /// Stores a new entity, assigning the next sequential id.
    async fn insert(&self, entity: T) -> CoreResult<T>;

    /// Replaces the entity carrying the same id.
    async fn update(&self, entity: T) -> CoreResult<T>;

    /// Removes and returns the entity.
    async fn delete(&self, id: &str) -> CoreResult<T>;

    /// Like `get`, but a missing entity is an error.
    async fn find(&self, id: &str) -> CoreResult<T> {
        self.get(id)
            .await?
            .ok_or_else(|| CoreError::not_found(T::KIND, id))
    }

    async fn search(&self, needle: &str) -> CoreResult<Vec<T>> {
        let needle = needle.trim().to_lowercase();
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|entity| entity.matches(&needle))
            .collect())
    }
}
