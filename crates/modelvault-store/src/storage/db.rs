//! Database connection and initialization.

use std::path::Path;

use modelvault_core::Config;
use modelvault_core::config::default_database_path;
use modelvault_core::db::{StoreError, open_pool, open_pool_in_memory};
use sqlx::{Pool, Sqlite};
use tracing::info;

/// Handle to the model store. Cheap to clone; all operations go through
/// the shared connection pool.
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open or create the store at the given path.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        let pool = open_pool(path).await?;
        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Open the store at the configured location, falling back to the
    /// platform default path.
    pub async fn open_from_config(config: &Config) -> Result<Self, StoreError> {
        let path = config
            .store
            .database_path
            .clone()
            .or_else(default_database_path)
            .ok_or_else(|| {
                StoreError::Io("no database path configured and no home directory found".into())
            })?;
        Self::open(&path).await
    }

    /// Open an in-memory store (for testing).
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let pool = open_pool_in_memory().await?;
        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        info!("Model store migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_in_memory_works() {
        let db = Database::open_in_memory().await;
        assert!(db.is_ok());
    }

    #[tokio::test]
    async fn open_from_config_uses_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models.db");

        let mut config = Config::default();
        config.store.database_path = Some(path.clone());

        let db = Database::open_from_config(&config).await;
        assert!(db.is_ok());
        assert!(path.exists());
    }
}
