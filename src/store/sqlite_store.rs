// src/store/sqlite_store.rs
//
// SQLite-backed blob store
//
// PRINCIPLES:
// - Explicit connection pooling
// - One kv table, no hidden schema
// - Multi-key writes commit in a single transaction

use std::path::{Path, PathBuf};

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

use crate::error::{AppError, AppResult};
use crate::store::BlobStore;

/// Get the default store file path
///
/// Data is stored in the application data directory.
/// Path structure: {APP_DATA}/permithub/permithub.db
pub fn default_store_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    let permithub_dir = app_data_dir.join("permithub");
    std::fs::create_dir_all(&permithub_dir).map_err(AppError::Io)?;

    Ok(permithub_dir.join("permithub.db"))
}

pub struct SqliteBlobStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteBlobStore {
    /// Open (or create) the store at the given path.
    ///
    /// Pool configuration:
    /// - Small pool; all mutations are funneled through one writer anyway
    /// - WAL mode, foreign keys on, busy timeout to avoid immediate errors
    pub fn open(path: &Path) -> AppResult<Self> {
        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.execute_batch(
                "PRAGMA foreign_keys = ON;
                 PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA busy_timeout = 5000;",
            )?;
            Ok(())
        });

        let pool = Pool::builder()
            .max_size(4)
            .build(manager)
            .map_err(|e| AppError::Pool(e.to_string()))?;

        let store = Self { pool };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open the store at the default data-directory location
    pub fn open_default() -> AppResult<Self> {
        Self::open(&default_store_path()?)
    }

    /// Idempotent schema bootstrap
    fn initialize_schema(&self) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl BlobStore for SqliteBlobStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let conn = self.pool.get()?;

        match conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
            row.get(0)
        }) {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn set_many(&self, entries: &[(String, String)]) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        for (key, value) in entries {
            tx.execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}
