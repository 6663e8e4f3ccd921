// src/db.rs
use crate::store::{Store, StoreKey};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use thiserror::Error;

// Custom Error type for DB operations
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database connection failed")]
    Connection(#[source] rusqlite::Error),
    #[error("Failed to get application data directory")]
    DataDir,
    #[error("I/O error accessing database file")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Database query failed: {0}")]
    QueryFailed(rusqlite::Error),
    #[error("Database update failed: {0}")]
    UpdateFailed(rusqlite::Error),
    #[error("Database delete failed: {0}")]
    DeleteFailed(rusqlite::Error),
}

const DB_FILE_NAME: &str = "firstrep.sqlite";
const APP_DATA_DIR: &str = "firstrep";

/// Gets the path to the SQLite database file within the app's data directory.
/// Creates the directory if it doesn't exist.
/// # Errors
/// Returns `DbError::DataDir` if no data directory is known for this platform.
pub fn get_db_path() -> Result<PathBuf, DbError> {
    let data_dir = dirs::data_dir().ok_or(DbError::DataDir)?;
    let app_dir = data_dir.join(APP_DATA_DIR);
    if !app_dir.exists() {
        std::fs::create_dir_all(&app_dir)?;
    }
    Ok(app_dir.join(DB_FILE_NAME))
}

/// SQLite-backed key-value store. One row per `StoreKey`.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database file and makes sure the table exists.
    /// # Errors
    /// Returns `DbError` if the file cannot be opened or initialized.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let conn = Connection::open(path).map_err(DbError::Connection)?;
        Self::init(conn)
    }

    /// # Errors
    /// Returns `DbError` if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory().map_err(DbError::Connection)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, DbError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL -- JSON document
            )",
            [],
        )
        .map_err(DbError::Connection)?;
        Ok(Self { conn })
    }
}

impl Store for SqliteStore {
    fn read_raw(&self, key: StoreKey) -> Result<Option<String>, DbError> {
        self.conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(DbError::QueryFailed)
    }

    fn write_raw(&mut self, key: StoreKey, value: &str) -> Result<(), DbError> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key.as_str(), value],
            )
            .map_err(DbError::UpdateFailed)?;
        Ok(())
    }

    fn remove(&mut self, key: StoreKey) -> Result<(), DbError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key.as_str()])
            .map_err(DbError::DeleteFailed)?;
        Ok(())
    }
}
