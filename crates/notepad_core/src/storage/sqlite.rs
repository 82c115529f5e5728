//! SQLite-backed storage backend.
//!
//! # Responsibility
//! - Persist slot values in the `local_storage` table so they survive process
//!   restarts.
//!
//! # Invariants
//! - One row per key; `set_item` is a single-statement upsert.
//! - Construction fails when the connection was not migrated.

use super::{BackendError, BackendResult, KeyValueStorage};
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value storage over a migrated SQLite connection.
pub struct SqliteStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStorage<'conn> {
    /// Constructs a backend from a connection returned by `db::open_db*`.
    pub fn try_new(conn: &'conn Connection) -> BackendResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'local_storage'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(BackendError::Unavailable(
                "missing required table `local_storage`".to_string(),
            ));
        }

        Ok(Self { conn })
    }
}

impl KeyValueStorage for SqliteStorage<'_> {
    fn get_item(&self, key: &str) -> BackendResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> BackendResult<()> {
        self.conn.execute(
            "INSERT INTO local_storage (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> BackendResult<()> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?1;", [key])?;
        Ok(())
    }
}
