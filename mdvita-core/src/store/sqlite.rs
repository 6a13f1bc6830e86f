//! SQLite document store, the local-storage backend.
//!
//! Every document is a JSON blob keyed by `(collection, id)`:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS documents (
//!     collection TEXT NOT NULL,
//!     id         TEXT NOT NULL,
//!     data       BLOB NOT NULL,
//!     updated_at TEXT NOT NULL,
//!     checksum   TEXT,
//!     PRIMARY KEY (collection, id)
//! );
//! ```
//!
//! An optional CRC-32 of the JSON bytes is stored alongside each document; a
//! mismatch on read is logged and the data is still returned.

use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::DocumentStore;
use crate::config::PersistenceConfig;
use crate::error::{Result, VitaError};
use crate::types::DocumentId;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS documents (
    collection TEXT NOT NULL,
    id         TEXT NOT NULL,
    data       BLOB NOT NULL,
    updated_at TEXT NOT NULL,
    checksum   TEXT,
    PRIMARY KEY (collection, id)
);";

// ---------------------------------------------------------------------------
// CRC-32 checksum helper
// ---------------------------------------------------------------------------

/// CRC-32 (ISO 3309) of `data` as lowercase hex.
fn crc32_hex(data: &[u8]) -> String {
    format!("{:08x}", crc32(data))
}

fn crc32(data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB8_8320;
    let mut crc: u32 = 0xFFFF_FFFF;
    for &byte in data {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (POLY & mask);
        }
    }
    !crc
}

// ---------------------------------------------------------------------------
// SqliteStore
// ---------------------------------------------------------------------------

/// Document store on an SQLite database.
///
/// ```no_run
/// # use mdvita_core::config::PersistenceConfig;
/// # use mdvita_core::store::{DocumentStore, SqliteStore};
/// # async fn demo() -> mdvita_core::error::Result<()> {
/// let store = SqliteStore::open("mdvita.db", &PersistenceConfig::default())?;
/// let id = store.write("moods", None, serde_json::json!({"mood": 5})).await?;
/// let doc = store.read("moods", id.as_str()).await?;
/// # Ok(())
/// # }
/// ```
pub struct SqliteStore {
    conn: Mutex<Connection>,
    checksum_enabled: bool,
    db_path: PathBuf,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("db_path", &self.db_path)
            .field("checksum_enabled", &self.checksum_enabled)
            .finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Open (or create) a database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`VitaError::Database`] on SQLite failures.
    pub fn open<P: AsRef<Path>>(path: P, config: &PersistenceConfig) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&db_path, flags)?;

        if config.wal_mode {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
        conn.execute_batch("PRAGMA busy_timeout = 5000;")?;
        conn.execute_batch(SCHEMA)?;

        info!(path = %db_path.display(), wal = config.wal_mode, "SQLite document store opened");

        Ok(Self {
            conn: Mutex::new(conn),
            checksum_enabled: config.checksum_enabled,
            db_path,
        })
    }

    /// Open an in-memory database (useful for tests).
    ///
    /// # Errors
    ///
    /// Returns [`VitaError::Database`] on SQLite failures.
    pub fn open_in_memory(config: &PersistenceConfig) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
            checksum_enabled: config.checksum_enabled,
            db_path: PathBuf::from(":memory:"),
        })
    }

    /// Path to the database file (or `:memory:`).
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Number of documents in `collection`.
    ///
    /// # Errors
    ///
    /// Returns [`VitaError::Database`] on SQLite failures.
    pub fn count(&self, collection: &str) -> Result<usize> {
        let count: i64 = self.conn.lock().query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Run SQLite's integrity check. `Ok(false)` means corruption was found.
    ///
    /// # Errors
    ///
    /// Returns [`VitaError::Database`] if the check itself fails.
    pub fn integrity_check(&self) -> Result<bool> {
        let result: String = self
            .conn
            .lock()
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        Ok(result == "ok")
    }

    fn decode(&self, collection: &str, id: &str, data: &[u8], stored: Option<&str>) -> Result<Value> {
        if self.checksum_enabled {
            if let Some(expected) = stored {
                let actual = crc32_hex(data);
                if expected != actual {
                    warn!(
                        collection,
                        id,
                        expected,
                        actual = %actual,
                        "Checksum mismatch, possible storage corruption"
                    );
                }
            }
        }
        serde_json::from_slice(data).map_err(|e| VitaError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn write(&self, collection: &str, id: Option<&str>, data: Value) -> Result<DocumentId> {
        let start = Instant::now();
        let id = id.map_or_else(DocumentId::generate, DocumentId::from);
        let json = serde_json::to_vec(&data)?;
        let checksum = self.checksum_enabled.then(|| crc32_hex(&json));
        let now = Utc::now().to_rfc3339();

        self.conn.lock().execute(
            "INSERT INTO documents (collection, id, data, updated_at, checksum)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(collection, id) DO UPDATE SET
                data = excluded.data,
                updated_at = excluded.updated_at,
                checksum = excluded.checksum",
            params![collection, id.as_str(), json, now, checksum],
        )?;

        debug!(
            collection,
            id = %id,
            bytes = json.len(),
            elapsed_us = start.elapsed().as_micros(),
            "Saved document"
        );
        Ok(id)
    }

    async fn read(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let row: Option<(Vec<u8>, Option<String>)> = {
            let conn = self.conn.lock();
            let mut stmt = conn
                .prepare_cached("SELECT data, checksum FROM documents WHERE collection = ?1 AND id = ?2")?;
            let found = stmt
                .query_row(params![collection, id], |row| Ok((row.get(0)?, row.get(1)?)))
                .optional()?;
            found
        };

        let Some((data, checksum)) = row else {
            return Ok(None);
        };
        self.decode(collection, id, &data, checksum.as_deref()).map(Some)
    }

    async fn list(&self, collection: &str) -> Result<Vec<(DocumentId, Value)>> {
        let rows: Vec<(String, Vec<u8>, Option<String>)> = {
            let conn = self.conn.lock();
            let mut stmt = conn.prepare_cached(
                "SELECT id, data, checksum FROM documents WHERE collection = ?1 ORDER BY rowid",
            )?;
            let mapped = stmt.query_map(params![collection], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })?;
            let collected = mapped.collect::<std::result::Result<Vec<_>, _>>()?;
            collected
        };

        rows.into_iter()
            .map(|(id, data, checksum)| {
                let value = self.decode(collection, &id, &data, checksum.as_deref())?;
                Ok((DocumentId(id), value))
            })
            .collect()
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool> {
        let deleted = self.conn.lock().execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id],
        )?;
        Ok(deleted > 0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
