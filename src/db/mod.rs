pub mod operations;
mod schema;

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::db::schema::{schema_statements, SCHEMA_SQL};

/// Handle to the single SQLite datastore. Cloning shares the pool.
///
/// Constructed once at startup and threaded through `AppState`; there is no
/// process-global connection.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn connect(db_path: &Path) -> Result<Self, DbInitError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DbInitError::Io(e.to_string()))?;
        }

        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
        let options = SqliteConnectOptions::from_str(&db_url)
            .map_err(|e| DbInitError::Config(e.to_string()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(30))
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(DbInitError::Sqlx)?;

        let db = Self { pool };
        db.apply_schema().await?;

        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn apply_schema(&self) -> Result<(), DbInitError> {
        for stmt in schema_statements(SCHEMA_SQL) {
            sqlx::query(&stmt)
                .execute(&self.pool)
                .await
                .map_err(DbInitError::Sqlx)?;
        }
        Ok(())
    }
}

pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lang-portal")
        .join("lang_portal.db")
}

#[derive(Debug, Error)]
pub enum DbInitError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Failure taxonomy for store operations.
///
/// `NotFound` only applies where no default-fallback policy exists; operations
/// with a placeholder (study activity lookup) or a zero-row aggregate never
/// produce it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
