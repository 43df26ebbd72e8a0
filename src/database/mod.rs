/// Database modules organized by feature
mod birthday;
mod migrations;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::models::{BirthdayEntry, BirthdayRecord};

/// Errors raised by the roster store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("No birthday found for {0}")]
    NotFound(String),

    #[error("A birthday for {0} already exists")]
    AlreadyExists(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::Query(e.to_string())
    }
}

/// Durable storage of birthday records, keyed by name
///
/// Every call is atomic from the caller's point of view; the store is the
/// single source of truth and is queried on every wake and every command.
#[async_trait]
pub trait RosterStore: Send + Sync {
    /// Add a new record. Fails with `AlreadyExists` when the name is taken.
    async fn insert(&self, entry: &BirthdayEntry) -> Result<(), StoreError>;

    /// Look up a record by its name
    async fn get_by_name(&self, name: &str) -> Result<Option<BirthdayRecord>, StoreError>;

    /// All records ordered by (month, day)
    async fn get_all(&self) -> Result<Vec<BirthdayRecord>, StoreError>;

    /// Records in a month ordered by day
    async fn get_by_month(&self, month: u32) -> Result<Vec<BirthdayRecord>, StoreError>;

    /// Records on an exact date, in insertion order
    async fn get_by_date(&self, month: u32, day: u32) -> Result<Vec<BirthdayRecord>, StoreError>;

    /// Replace the date, gender and external id of an existing record
    async fn update(&self, entry: &BirthdayEntry) -> Result<(), StoreError>;

    /// Remove a record by name
    async fn delete(&self, name: &str) -> Result<(), StoreError>;
}

/// SQLite connection pool wrapper
///
/// Handles all roster persistence for the bot
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open (or create) the database file and run migrations
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
            }
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))
            .map_err(|e| StoreError::Connection(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let db = Self { pool };
        db.run_migrations().await?;

        info!("Database {} opened and migrations completed", path.display());
        Ok(db)
    }

    /// Open an in-memory database (for tests)
    #[cfg(test)]
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        // A single connection keeps every query on the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Get a reference to the connection pool (for internal use)
    pub(crate) fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}
