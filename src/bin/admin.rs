//! CLI administration tool for user-cache-service.
//!
//! Checks the backing services and inspects or evicts cache entries without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check PostgreSQL, MongoDB and Redis connectivity
//! cargo run --bin admin -- check
//!
//! # Show the cached JSON for a record id
//! cargo run --bin admin -- cache get 42
//!
//! # Evict a cache entry (the next read rebuilds it from the store)
//! cargo run --bin admin -- cache evict 65f1c0ffee0000000000abcd
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `user_cache_service::config`.

use user_cache_service::config::{self, Config, mask_connection_string};
use user_cache_service::domain::repositories::RecordRepository;
use user_cache_service::infrastructure::cache::{CacheService, RedisCache};
use user_cache_service::infrastructure::persistence::MongoPersonRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;

/// CLI tool for managing user-cache-service.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Check connectivity to PostgreSQL, MongoDB and Redis
    Check,

    /// Inspect or evict cache entries
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

/// Cache subcommands.
#[derive(Subcommand)]
enum CacheAction {
    /// Print the cached JSON for a key
    Get {
        /// Record id (decimal for users, hex for persons)
        key: String,
    },

    /// Delete a cache entry
    Evict {
        /// Record id (decimal for users, hex for persons)
        key: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Check => handle_check(&config).await?,
        Commands::Cache { action } => handle_cache_action(action, &config).await?,
    }

    Ok(())
}

/// Checks each backing service and reports the outcome.
///
/// Fails if any required store is unreachable. An unconfigured Redis is
/// reported but is not an error, since the server runs without it.
async fn handle_check(config: &Config) -> Result<()> {
    println!("{}", "🔍 Checking backing services...".bright_blue());
    println!();

    let mut healthy = true;

    print!("  PostgreSQL ({}): ", mask_connection_string(&config.database_url));
    match check_postgres(config).await {
        Ok(()) => println!("{}", "OK".green().bold()),
        Err(e) => {
            healthy = false;
            println!("{} {}", "FAILED".red().bold(), e);
        }
    }

    print!("  MongoDB ({}): ", mask_connection_string(&config.mongo_uri));
    match check_mongo(config).await {
        Ok(()) => println!("{}", "OK".green().bold()),
        Err(e) => {
            healthy = false;
            println!("{} {}", "FAILED".red().bold(), e);
        }
    }

    match &config.redis_url {
        Some(url) => {
            print!("  Redis ({}): ", mask_connection_string(url));
            match RedisCache::connect(url).await {
                Ok(_) => println!("{}", "OK".green().bold()),
                Err(e) => {
                    healthy = false;
                    println!("{} {}", "FAILED".red().bold(), e);
                }
            }
        }
        None => println!("  Redis: {}", "not configured (caching disabled)".yellow()),
    }

    println!();
    if !healthy {
        anyhow::bail!("one or more backing services are unreachable");
    }

    println!("{}", "✅ All services reachable".green().bold());
    Ok(())
}

async fn check_postgres(config: &Config) -> Result<()> {
    let pool = PgPool::connect(&config.database_url)
        .await
        .context("connect")?;
    sqlx::query("SELECT 1").execute(&pool).await?;
    Ok(())
}

async fn check_mongo(config: &Config) -> Result<()> {
    let repo = MongoPersonRepository::connect(
        &config.mongo_uri,
        &config.mongo_database,
        &config.mongo_collection,
    )
    .await?;
    repo.ping().await?;
    Ok(())
}

/// Dispatches cache commands. Requires Redis to be configured.
async fn handle_cache_action(action: CacheAction, config: &Config) -> Result<()> {
    let redis_url = config
        .redis_url
        .as_deref()
        .context("REDIS_URL or REDIS_HOST must be set for cache commands")?;
    let cache = RedisCache::connect(redis_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to Redis: {}", e))?;

    match action {
        CacheAction::Get { key } => show_entry(&cache, &key).await,
        CacheAction::Evict { key, yes } => evict_entry(&cache, &key, yes).await,
    }
}

async fn show_entry(cache: &RedisCache, key: &str) -> Result<()> {
    let value = cache
        .get(key)
        .await
        .map_err(|e| anyhow::anyhow!("Cache error: {}", e))?;

    match value {
        Some(json) => println!("{}", json),
        None => println!("{}", "miss".yellow()),
    }

    Ok(())
}

/// Deletes a cache entry after confirmation (default: No).
async fn evict_entry(cache: &RedisCache, key: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Evict cache entry".bright_blue().bold());
    println!("  Key: {}", key.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Evict this entry?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    cache
        .delete(key)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to evict entry: {}", e))?;

    println!("{}", "✅ Entry evicted".green().bold());
    Ok(())
}
