use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::schema;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database connection string is not configured")]
    Configuration,
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),
}

/// Shared handle to the backing store.
///
/// The pool is created lazily on first use and reused for the life of the
/// process. If establishing connectivity fails (connect, ping, or schema
/// bootstrap), nothing is cached and the next caller retries, so a broken
/// handle is never kept around.
pub struct Database {
    url: Option<String>,
    cached: Mutex<Option<SqlitePool>>,
}

impl Database {
    /// Build a handle around an optional connection string. A missing string
    /// is not fatal at construction; it surfaces as [`DbError::Configuration`]
    /// when a request first needs the pool.
    pub fn new(url: Option<String>) -> Self {
        Self {
            url,
            cached: Mutex::new(None),
        }
    }

    /// Get the shared pool, creating it on first use.
    pub async fn pool(&self) -> Result<SqlitePool, DbError> {
        let url = self.url.as_deref().ok_or(DbError::Configuration)?;

        let mut cached = self.cached.lock().await;
        if let Some(pool) = cached.as_ref() {
            return Ok(pool.clone());
        }

        let pool = match connect(url).await {
            Ok(pool) => pool,
            Err(e) => {
                warn!("Database connection failed, will retry on next use: {e}");
                return Err(e);
            }
        };

        *cached = Some(pool.clone());
        Ok(pool)
    }
}

async fn connect(url: &str) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    // Ping before handing the pool out, then make sure the tables exist.
    sqlx::query("SELECT 1").execute(&pool).await?;
    schema::ensure_schema(&pool).await?;

    info!("Connected to lead database");
    Ok(pool)
}
