use serde::Serialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::Todo;
use crate::store::{Entity, EntityStore, StoreResult};

/// Outcome of a read: one Todo when an id was given, every Todo otherwise
#[derive(Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum ReadResult {
    One(Todo),
    All(Vec<Todo>),
}

/// The four Todo operations, run against a shared store
#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn EntityStore<Todo>>,
}

impl TodoService {
    pub fn new(store: Arc<dyn EntityStore<Todo>>) -> Self {
        Self { store }
    }

    /// Read one Todo by id, or all of them when `id` is zero.
    pub async fn read(&self, id: i64) -> Result<ReadResult, ApiError> {
        if id == 0 {
            let todos = self
                .store
                .get_all()
                .await?
                .collect::<StoreResult<Vec<Todo>>>()?;
            return Ok(ReadResult::All(todos));
        }

        match self.store.get_by_id(id).await? {
            Some(todo) => Ok(ReadResult::One(todo)),
            None => Err(ApiError::NotFound(id)),
        }
    }

    /// Assign an id when the Todo has none, then upsert it.
    pub async fn create_or_update(&self, mut todo: Todo) -> Result<Todo, ApiError> {
        if todo.id == 0 {
            todo.set_id(self.store.get_next_sequence().await?);
            tracing::info!("Creating todo with id: {}", todo.id);
        } else {
            tracing::info!("Updating todo with id: {}", todo.id);
        }

        self.store.store(&todo).await?;
        Ok(todo)
    }

    /// Same upsert as [`TodoService::create_or_update`].
    pub async fn update(&self, todo: Todo) -> Result<Todo, ApiError> {
        self.create_or_update(todo).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.store.delete_by_id(id).await?;
        tracing::info!("Deleted todo with id: {}", id);
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), ApiError> {
        Ok(self.store.health_check().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn service() -> TodoService {
        TodoService::new(Arc::new(MemoryStore::<Todo>::new()))
    }

    fn new_todo(content: &str) -> Todo {
        Todo {
            content: content.to_string(),
            ..Todo::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_fresh_ids() {
        let service = service();

        let first = service.create_or_update(new_todo("one")).await.unwrap();
        let second = service.create_or_update(new_todo("two")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(service.read(first.id).await.unwrap(), ReadResult::One(first));
    }

    #[tokio::test]
    async fn test_upsert_with_explicit_id() {
        let service = service();
        let todo = Todo {
            id: 40,
            content: "explicit".to_string(),
            order: 2,
            done: true,
        };

        let stored = service.create_or_update(todo.clone()).await.unwrap();
        assert_eq!(stored, todo);

        let changed = Todo {
            content: "changed".to_string(),
            ..todo
        };
        service.update(changed.clone()).await.unwrap();
        assert_eq!(service.read(40).await.unwrap(), ReadResult::One(changed));
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let service = service();
        assert!(matches!(service.read(999).await, Err(ApiError::NotFound(999))));
    }

    #[tokio::test]
    async fn test_read_zero_returns_all() {
        let service = service();
        service.create_or_update(new_todo("a")).await.unwrap();
        service.create_or_update(new_todo("b")).await.unwrap();

        match service.read(0).await.unwrap() {
            ReadResult::All(todos) => assert_eq!(todos.len(), 2),
            other => panic!("expected all todos, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let service = service();
        let todo = service.create_or_update(new_todo("temp")).await.unwrap();

        service.delete(todo.id).await.unwrap();
        assert!(matches!(service.read(todo.id).await, Err(ApiError::NotFound(_))));

        service.delete(todo.id).await.unwrap();
        assert!(matches!(service.read(todo.id).await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_deleted_ids_are_not_reused() {
        let service = service();
        let first = service.create_or_update(new_todo("first")).await.unwrap();
        service.delete(first.id).await.unwrap();

        let second = service.create_or_update(new_todo("second")).await.unwrap();
        assert!(second.id > first.id);
    }
}
