mod error;
mod memory;
mod models;
mod repository;
mod sqlite;
#[cfg(test)]
mod store_suite;
pub mod validation;

pub use error::{DomainError, FieldErrors};
pub use memory::MemoryStore;
pub use models::*;
pub use repository::{FavoriteRepository, PeopleRepository, PlanetRepository, Store, UserRepository};
pub use sqlite::SqliteStore;

use anyhow::{bail, Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    SqlitePool,
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::config::DatabaseConfig;

pub type DbPool = SqlitePool;

/// `database.url` value that selects [`MemoryStore`]
pub const MEMORY_URL: &str = "memory";

/// Execute a SQL migration file, properly handling comments
async fn execute_sql(pool: &SqlitePool, sql: &str) -> Result<()> {
    for statement in sql.split(';') {
        // Strip SQL comment lines (lines starting with --)
        let cleaned: String = statement
            .lines()
            .filter(|line| !line.trim().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");
        let trimmed = cleaned.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }
    Ok(())
}

/// Open a SQLite pool and bring the schema up to date.
pub async fn init(url: &str, max_connections: u32) -> Result<DbPool> {
    let in_memory = url.contains(":memory:") || url.contains("mode=memory");

    let mut options = SqliteConnectOptions::from_str(url)
        .with_context(|| format!("Invalid database URL: {}", url))?
        .create_if_missing(true)
        .foreign_keys(true);

    if !in_memory {
        // WAL for better concurrency between readers and the single writer
        options = options
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }
    }

    info!("Initializing database at {}", options.get_filename().display());

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    info!("Database initialized successfully");
    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations...");

    // Migration 001: users, people and planets
    execute_sql(pool, include_str!("../../migrations/001_initial.sql")).await?;

    // Migration 002: favorite join tables
    execute_sql(pool, include_str!("../../migrations/002_favorites.sql")).await?;

    Ok(())
}

/// Build the store selected by `database.url`.
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn Store>> {
    if config.url == MEMORY_URL {
        info!("Using in-memory store; data will not survive a restart");
        return Ok(Arc::new(MemoryStore::new()));
    }

    if !config.url.starts_with("sqlite:") {
        bail!(
            "Unsupported database URL '{}': expected a sqlite: URL or '{}'",
            config.url,
            MEMORY_URL
        );
    }

    let pool = init(&config.url, config.max_connections).await?;
    Ok(Arc::new(SqliteStore::new(pool)))
}
