//! Entity persistence keyed by a store-issued integer id.
//!
//! Records are kept as JSON documents. [`RedisStore`] is the production
//! backend and [`MemoryStore`] keeps everything in-process with the same
//! observable behaviour.

mod memory;
mod redis;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

pub use memory::MemoryStore;
pub use redis::{RedisStore, create_pool};

/// A record that can be persisted in an [`EntityStore`].
///
/// An id of `0` means the store has not assigned one yet.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Name used to derive the store keys for this type.
    const TYPE_NAME: &'static str;

    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);
}

/// Failures raised by a store backend
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached, or the pool timed out
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// A stored record could not be decoded
    #[error("stored record {id} is corrupt: {source}")]
    Corrupt {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    /// An entity could not be encoded for storage
    #[error("failed to encode entity: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Typed access to one entity collection.
#[async_trait]
pub trait EntityStore<T: Entity>: Send + Sync {
    /// Fetch a single entity, `Ok(None)` if no record exists for `id`.
    async fn get_by_id(&self, id: i64) -> StoreResult<Option<T>>;

    /// Snapshot every stored entity.
    async fn get_all(&self) -> StoreResult<Entities<T>>;

    /// Issue a fresh id, strictly greater than any id issued before.
    async fn get_next_sequence(&self) -> StoreResult<i64>;

    /// Insert or wholesale overwrite the record for `entity.id()`.
    async fn store(&self, entity: &T) -> StoreResult<()>;

    /// Remove the record for `id`. Absent ids are not an error.
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;

    /// Verify the backend is reachable.
    async fn health_check(&self) -> StoreResult<()>;
}

/// Entities captured by [`EntityStore::get_all`].
///
/// Holds the raw records read at call time and decodes each one only when
/// the iterator reaches it.
pub struct Entities<T> {
    records: std::vec::IntoIter<(String, String)>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Entities<T> {
    /// `records` are `(id, json)` pairs.
    pub(crate) fn new(records: Vec<(String, String)>) -> Self {
        Self {
            records: records.into_iter(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Iterator for Entities<T> {
    type Item = StoreResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let (id, json) = self.records.next()?;
        Some(decode(&id, &json))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

pub(crate) fn encode<T: Entity>(entity: &T) -> StoreResult<String> {
    Ok(serde_json::to_string(entity)?)
}

pub(crate) fn decode<T: Entity>(id: &str, json: &str) -> StoreResult<T> {
    serde_json::from_str(json).map_err(|source| StoreError::Corrupt {
        id: id.to_string(),
        source,
    })
}
