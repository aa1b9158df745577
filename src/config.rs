use std::env;
use std::time::Duration;
use anyhow::{Context, Result, bail};

/// Which store implementation backs the Todo service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub redis_host: String,
    pub redis_pool_size: usize,
    pub redis_pool_timeout: Duration,
    pub store_backend: StoreBackend,
    pub static_dir: String,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let redis_host = lookup("REDIS_HOST").unwrap_or_else(|| "localhost".to_string());

        let redis_pool_size = lookup("REDIS_POOL_SIZE")
            .unwrap_or_else(|| "16".to_string())
            .parse::<usize>()
            .context("REDIS_POOL_SIZE must be a positive integer")?;
        if redis_pool_size == 0 {
            bail!("REDIS_POOL_SIZE must be greater than zero");
        }

        let redis_pool_timeout_ms = lookup("REDIS_POOL_TIMEOUT_MS")
            .unwrap_or_else(|| "5000".to_string())
            .parse::<u64>()
            .context("REDIS_POOL_TIMEOUT_MS must be a number of milliseconds")?;
        if redis_pool_timeout_ms == 0 {
            bail!("REDIS_POOL_TIMEOUT_MS must be greater than zero");
        }

        let store_backend = match lookup("STORE_BACKEND").as_deref() {
            None | Some("redis") => StoreBackend::Redis,
            Some("memory") => StoreBackend::Memory,
            Some(other) => bail!("STORE_BACKEND must be 'redis' or 'memory', got '{}'", other),
        };

        let static_dir = lookup("STATIC_DIR").unwrap_or_else(|| "wwwroot".to_string());

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "5000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        Ok(Config {
            redis_host,
            redis_pool_size,
            redis_pool_timeout: Duration::from_millis(redis_pool_timeout_ms),
            store_backend,
            static_dir,
            service_port,
            service_host,
        })
    }

    /// Connection URL for the Redis client.
    ///
    /// `REDIS_HOST` may be a bare host, a `host:port` pair or a full URL.
    pub fn redis_url(&self) -> String {
        if self.redis_host.starts_with("redis://") || self.redis_host.starts_with("rediss://") {
            self.redis_host.clone()
        } else {
            format!("redis://{}", self.redis_host)
        }
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        match self.store_backend {
            StoreBackend::Redis => {
                tracing::info!("  Store backend: redis at {}", self.redis_host);
                tracing::info!(
                    "  Redis pool: {} connections, {:?} timeout",
                    self.redis_pool_size,
                    self.redis_pool_timeout
                );
            }
            StoreBackend::Memory => tracing::info!("  Store backend: in-memory"),
        }
        tracing::info!("  Static files: {}", self.static_dir);
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}
