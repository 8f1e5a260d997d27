use tracing::debug;

use super::TokenStore;
use crate::db::DbPool;
use crate::error::StoreError;

/// Token store backed by the local SQLite `kv` table.
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// `pool` must already have the schema from `db::open`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn open(db_path: &std::path::Path) -> Result<Self, StoreError> {
        Ok(Self::new(crate::db::open(db_path)?))
    }
}

impl TokenStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.pool.get()?;
        match conn.query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
            row.get(0)
        }) {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            [key, value],
        )?;
        debug!(key, "Value stored in database");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }
}
