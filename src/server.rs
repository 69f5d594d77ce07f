//! HTTP server initialization and runtime setup.
//!
//! Connects both stores and the cache, wires the record services and runs the
//! Axum server until Ctrl-C.

use crate::application::services::{PersonService, UserService};
use crate::config::Config;
use crate::domain::entities::{Person, User};
use crate::domain::repositories::RecordRepository;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{MongoPersonRepository, PgUserRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use mongodb::bson::oid::ObjectId;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - MongoDB client
/// - Redis cache (or NullCache fallback)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The MongoDB URI cannot be parsed
/// - Server bind fails
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_postgres(&config).await?;
    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let persons = MongoPersonRepository::connect(
        &config.mongo_uri,
        &config.mongo_database,
        &config.mongo_collection,
    )
    .await
    .context("Failed to configure MongoDB client")?;

    match persons.ping().await {
        Ok(()) => tracing::info!("Connected to MongoDB"),
        Err(e) => tracing::warn!("MongoDB is not reachable yet: {}", e),
    }

    let cache = connect_cache(&config).await;

    let users: Arc<dyn RecordRepository<Key = i64, Record = User>> =
        Arc::new(PgUserRepository::new(Arc::new(pool)));
    let persons: Arc<dyn RecordRepository<Key = ObjectId, Record = Person>> = Arc::new(persons);

    let user_service = Arc::new(UserService::new(
        users,
        cache.clone(),
        config.cache_ttl(),
        config.store_timeout(),
    ));
    let person_service = Arc::new(PersonService::new(
        persons,
        cache.clone(),
        config.cache_ttl(),
        config.store_timeout(),
    ));

    let state = AppState::new(user_service, person_service, cache);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn connect_postgres(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to PostgreSQL")
}

/// Connects to Redis when configured, falling back to [`NullCache`].
async fn connect_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
