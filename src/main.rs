mod api_doc;
mod app;
mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod service;
mod state;
mod store;

use std::sync::Arc;

use anyhow::Context;
use config::{Config, StoreBackend};
use models::Todo;
use service::TodoService;
use state::AppState;
use store::{EntityStore, MemoryStore, RedisStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    tracing::info!("rust-redis-todos starting");

    let config = Config::from_env()?;
    config.log_startup();

    let store: Arc<dyn EntityStore<Todo>> = match config.store_backend {
        StoreBackend::Redis => {
            let pool = store::create_pool(&config)?;
            Arc::new(RedisStore::<Todo>::new(pool))
        }
        StoreBackend::Memory => Arc::new(MemoryStore::<Todo>::new()),
    };

    // Requests fail with 503 until the store is reachable, so keep going.
    match store.health_check().await {
        Ok(()) => tracing::info!("Backing store is reachable"),
        Err(e) => tracing::warn!("Backing store is not reachable yet: {}", e),
    }

    let addr = format!("{}:{}", config.service_host, config.service_port);
    let state = AppState {
        todos: TodoService::new(store),
        config: Arc::new(config),
    };
    let router = app::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("rust-redis-todos stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
