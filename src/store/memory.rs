use async_trait::async_trait;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use super::{Entities, Entity, EntityStore, StoreResult, decode, encode};

/// In-process entity store.
///
/// Records are held as JSON so reads hand back independent copies, exactly
/// like a round trip through Redis would.
pub struct MemoryStore<T> {
    records: RwLock<HashMap<i64, String>>,
    sequence: AtomicI64,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            sequence: AtomicI64::new(0),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> EntityStore<T> for MemoryStore<T> {
    async fn get_by_id(&self, id: i64) -> StoreResult<Option<T>> {
        let records = self.records.read().await;
        records
            .get(&id)
            .map(|json| decode(&id.to_string(), json))
            .transpose()
    }

    async fn get_all(&self) -> StoreResult<Entities<T>> {
        let records = self.records.read().await;
        let snapshot = records
            .iter()
            .map(|(id, json)| (id.to_string(), json.clone()))
            .collect();
        Ok(Entities::new(snapshot))
    }

    async fn get_next_sequence(&self) -> StoreResult<i64> {
        Ok(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn store(&self, entity: &T) -> StoreResult<()> {
        let json = encode(entity)?;
        self.records.write().await.insert(entity.id(), json);
        tracing::debug!("Stored {} with id: {}", T::TYPE_NAME, entity.id());
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        self.records.write().await.remove(&id);
        tracing::debug!("Deleted {} with id: {}", T::TYPE_NAME, id);
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Todo;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn todo(id: i64, content: &str) -> Todo {
        Todo {
            id,
            content: content.to_string(),
            order: 1,
            done: false,
        }
    }

    #[tokio::test]
    async fn test_store_then_get_by_id() {
        let store = MemoryStore::<Todo>::new();
        let item = todo(7, "water plants");

        store.store(&item).await.unwrap();

        assert_eq!(store.get_by_id(7).await.unwrap(), Some(item));
        assert_eq!(store.get_by_id(8).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_overwrites_wholesale() {
        let store = MemoryStore::<Todo>::new();
        store.store(&todo(1, "first")).await.unwrap();

        let replacement = Todo {
            id: 1,
            content: "second".to_string(),
            order: 9,
            done: true,
        };
        store.store(&replacement).await.unwrap();

        assert_eq!(store.get_by_id(1).await.unwrap(), Some(replacement));
        assert_eq!(store.get_all().await.unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::<Todo>::new();
        store.store(&todo(3, "gone soon")).await.unwrap();

        store.delete_by_id(3).await.unwrap();
        assert_eq!(store.get_by_id(3).await.unwrap(), None);

        store.delete_by_id(3).await.unwrap();
        assert_eq!(store.get_by_id(3).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_all_is_a_snapshot() {
        let store = MemoryStore::<Todo>::new();
        store.store(&todo(1, "a")).await.unwrap();
        store.store(&todo(2, "b")).await.unwrap();

        let entities = store.get_all().await.unwrap();
        store.store(&todo(3, "c")).await.unwrap();

        let mut ids: Vec<i64> = entities.map(|t| t.unwrap().id).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_sequence_is_monotonic() {
        let store = MemoryStore::<Todo>::new();
        let first = store.get_next_sequence().await.unwrap();
        let second = store.get_next_sequence().await.unwrap();

        assert_eq!(first, 1);
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_concurrent_sequence_is_unique() {
        let store = Arc::new(MemoryStore::<Todo>::new());

        let tasks: Vec<_> = (0..64)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.get_next_sequence().await.unwrap() })
            })
            .collect();

        let mut ids = HashSet::new();
        for task in tasks {
            assert!(ids.insert(task.await.unwrap()));
        }
        assert_eq!(ids.len(), 64);
    }
}
