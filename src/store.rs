//! SQLite pool construction. The pool is the only state shared between requests.

use crate::config::StoreConfig;
use crate::error::{AppError, ConfigError};
use crate::migration::apply_migrations;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Open (creating if missing) the database file named in `config`, then apply the schema.
/// Parent directories of the file are created as needed.
pub async fn connect(config: &StoreConfig) -> Result<SqlitePool, AppError> {
    if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            ConfigError::Store(format!("failed to create directory {}: {}", parent.display(), e))
        })?;
    }
    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;
    apply_migrations(&pool).await?;
    tracing::info!(path = %config.path.display(), "store opened");
    Ok(pool)
}

/// In-memory database with the schema applied. A single connection that never
/// expires keeps the data alive for the lifetime of the pool.
pub async fn connect_in_memory() -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    apply_migrations(&pool).await?;
    Ok(pool)
}
