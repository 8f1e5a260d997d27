use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, StoreError};

pub type DbPool = Pool<SqliteConnectionManager>;

pub fn logwatch_data_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".logwatch"))
        .ok_or(ConfigError::NoHomeDir)
}

pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("state").join("logwatch.sqlite")
}

pub fn create_pool(db_path: &Path) -> Result<DbPool, StoreError> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let manager = SqliteConnectionManager::file(db_path);
    let pool = Pool::builder().max_size(4).build(manager)?;

    let conn = pool.get()?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    Ok(pool)
}

pub fn init_db(pool: &DbPool) -> Result<(), StoreError> {
    let conn = pool.get()?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS migrations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )?;

    Ok(())
}

/// Create the pool, base schema and pending migrations in one go.
pub fn open(db_path: &Path) -> Result<DbPool, StoreError> {
    let pool = create_pool(db_path)?;
    init_db(&pool)?;
    crate::migrations::run_pending(&pool)?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_path_is_under_state_dir() {
        let path = db_path(Path::new("/tmp/lw"));
        assert!(path.ends_with("state/logwatch.sqlite"));
    }

    #[test]
    fn create_pool_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("deep").join("test.sqlite");
        let pool = create_pool(&db_path).unwrap();
        let conn = pool.get().unwrap();
        conn.execute_batch("SELECT 1").unwrap();
    }

    #[test]
    fn open_creates_tables() {
        let dir = tempfile::tempdir().unwrap();
        let pool = open(&dir.path().join("test.sqlite")).unwrap();

        let conn = pool.get().unwrap();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"kv".to_string()));
        assert!(tables.contains(&"migrations".to_string()));
    }

    #[test]
    fn open_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.sqlite");
        open(&path).unwrap();
        open(&path).unwrap(); // second call should not fail
    }
}
