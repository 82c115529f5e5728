//! Core note store for Notepad.
//! This crate is the single source of truth for note persistence invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use config::{ConfigError, StoreConfig, DEFAULT_STORAGE_KEY};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Clock, Note, NoteId, SystemClock};
pub use repo::note_repo::{
    NoteRepository, SlotError, SlotNoteRepository, StorageError, StoreResult,
};
pub use service::note_service::{
    content_snippet, format_created_at, NoteService, NoteServiceError, NoteSummary,
};
pub use storage::{BackendError, KeyValueStorage, MemoryStorage, SqliteStorage};

/// Minimal health-check API for front-end wiring checks.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
