//! Key-value storage primitives backing the note slot.
//!
//! # Responsibility
//! - Define the `localStorage`-shaped contract the note store writes through.
//! - Provide in-memory and SQLite-file backends.
//!
//! # Invariants
//! - `set_item` either fully replaces the value under `key` or fails and
//!   leaves the previous value intact.
//! - Backends never interpret stored values.

use thiserror::Error;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

pub type BackendResult<T> = Result<T, BackendError>;

/// Failure reported by a storage primitive.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The write would grow storage past its configured capacity.
    #[error("storage quota exceeded: write needs {requested_bytes} bytes, limit is {limit_bytes}")]
    QuotaExceeded {
        limit_bytes: usize,
        requested_bytes: usize,
    },
    /// The backend cannot serve requests at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("sqlite storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// String-keyed storage with whole-value reads and writes.
pub trait KeyValueStorage {
    /// Returns the value stored under `key`, or `None` when the key is absent.
    fn get_item(&self, key: &str) -> BackendResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> BackendResult<()>;
    /// Removes `key`. Removing an absent key succeeds.
    fn remove_item(&self, key: &str) -> BackendResult<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &S {
    fn get_item(&self, key: &str) -> BackendResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> BackendResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> BackendResult<()> {
        (**self).remove_item(key)
    }
}
