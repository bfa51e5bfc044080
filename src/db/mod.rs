pub mod bookings;
pub mod pool;
pub mod reports;
pub mod rooms;
pub mod users;

use sqlx::migrate::Migrator;
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::error::{AppError, Result};
pub use pool::create_pool;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Handle to the relational store
///
/// Cloning is cheap; every clone shares the pool and the write gate.
#[derive(Clone, Debug)]
pub struct Store {
    pool: SqlitePool,
    write_gate: Arc<Mutex<()>>,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Begin a transaction; dropping it without `commit` rolls it back
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }

    /// Serialize every write to the store
    ///
    /// All writers hold this guard, so a booking commit can upgrade its read
    /// transaction to a write without losing its snapshot to another
    /// connection. Hold it from the first read until the transaction commits.
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_gate.lock().await
    }

    /// Cheap connectivity probe used by the health endpoint
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Open or create the SQLite database at the given path
///
/// Applies pending migrations so all tables exist on first run.
pub async fn open_store(path: impl AsRef<Path>, max_connections: u32) -> Result<Store> {
    let path = path.as_ref();
    tracing::info!("Opening database at: {:?}", path);

    // Create parent directory if it doesn't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                tracing::error!("Failed to create database directory: {}", e);
                AppError::Database(sqlx::Error::Io(e))
            })?;
        }
    }

    let pool = create_pool(path, max_connections).await?;

    tracing::info!("Running database migrations...");
    MIGRATOR.run(&pool).await?;
    tracing::info!("Database initialized successfully");

    Ok(Store::new(pool))
}
