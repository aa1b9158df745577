use anyhow::{Context, Result};
use async_trait::async_trait;
use deadpool_redis::redis::{self, AsyncCommands, RedisError};
use deadpool_redis::{Connection, Pool, PoolConfig, PoolError, Runtime, Timeouts};
use std::marker::PhantomData;

use super::{Entities, Entity, EntityStore, StoreError, StoreResult, decode, encode};
use crate::config::Config;

impl From<RedisError> for StoreError {
    fn from(err: RedisError) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl From<PoolError> for StoreError {
    fn from(err: PoolError) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Build the shared Redis connection pool.
///
/// No connection is opened here; the pool connects on first use. Waiting
/// for a free connection, opening one and recycling one are all bounded by
/// the configured timeout.
pub fn create_pool(config: &Config) -> Result<Pool> {
    let mut pool_config = PoolConfig::new(config.redis_pool_size);
    pool_config.timeouts = Timeouts {
        wait: Some(config.redis_pool_timeout),
        create: Some(config.redis_pool_timeout),
        recycle: Some(config.redis_pool_timeout),
    };

    let mut redis_config = deadpool_redis::Config::from_url(config.redis_url());
    redis_config.pool = Some(pool_config);

    redis_config
        .create_pool(Some(Runtime::Tokio1))
        .context("Failed to create Redis connection pool")
}

/// Entity store backed by Redis.
///
/// Key layout for an entity type named `Todo`:
/// - `urn:todo:<id>` holds the JSON record
/// - `ids:Todo` is the set of every stored id
/// - `seq:Todo` is the id sequence, advanced with `INCR`
pub struct RedisStore<T> {
    pool: Pool,
    record_prefix: String,
    ids_key: String,
    seq_key: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> RedisStore<T> {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool,
            record_prefix: format!("urn:{}:", T::TYPE_NAME.to_lowercase()),
            ids_key: format!("ids:{}", T::TYPE_NAME),
            seq_key: format!("seq:{}", T::TYPE_NAME),
            _entity: PhantomData,
        }
    }

    fn record_key(&self, id: impl std::fmt::Display) -> String {
        format!("{}{}", self.record_prefix, id)
    }

    async fn connection(&self) -> StoreResult<Connection> {
        Ok(self.pool.get().await?)
    }
}

#[async_trait]
impl<T: Entity> EntityStore<T> for RedisStore<T> {
    async fn get_by_id(&self, id: i64) -> StoreResult<Option<T>> {
        let mut conn = self.connection().await?;
        let json: Option<String> = conn.get(self.record_key(id)).await?;

        json.map(|json| decode(&id.to_string(), &json)).transpose()
    }

    async fn get_all(&self) -> StoreResult<Entities<T>> {
        let mut conn = self.connection().await?;
        let ids: Vec<String> = conn.smembers(&self.ids_key).await?;
        if ids.is_empty() {
            return Ok(Entities::new(Vec::new()));
        }

        let keys: Vec<String> = ids.iter().map(|id| self.record_key(id)).collect();
        let values: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut conn)
            .await?;

        // A record deleted between SMEMBERS and MGET comes back as nil.
        let records: Vec<(String, String)> = ids
            .into_iter()
            .zip(values)
            .filter_map(|(id, json)| json.map(|json| (id, json)))
            .collect();

        tracing::debug!("Read {} {} records", records.len(), T::TYPE_NAME);
        Ok(Entities::new(records))
    }

    async fn get_next_sequence(&self) -> StoreResult<i64> {
        let mut conn = self.connection().await?;
        let id: i64 = conn.incr(&self.seq_key, 1).await?;
        Ok(id)
    }

    async fn store(&self, entity: &T) -> StoreResult<()> {
        let json = encode(entity)?;
        let id = entity.id();

        let mut conn = self.connection().await?;
        let _: () = redis::pipe()
            .atomic()
            .set(self.record_key(id), json)
            .ignore()
            .sadd(&self.ids_key, id)
            .ignore()
            .query_async(&mut conn)
            .await?;

        tracing::debug!("Stored {} with id: {}", T::TYPE_NAME, id);
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        let _: () = redis::pipe()
            .atomic()
            .del(self.record_key(id))
            .ignore()
            .srem(&self.ids_key, id)
            .ignore()
            .query_async(&mut conn)
            .await?;

        tracing::debug!("Deleted {} with id: {}", T::TYPE_NAME, id);
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
