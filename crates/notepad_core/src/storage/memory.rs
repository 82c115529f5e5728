//! Process-local storage backend.
//!
//! Mirrors browser `localStorage` semantics, including an optional byte
//! quota. Usage is counted as UTF-8 bytes of every key plus its value.

use super::{BackendError, BackendResult, KeyValueStorage};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// In-memory key-value storage with an optional capacity limit.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    /// Creates an unbounded empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty storage that rejects writes growing usage past
    /// `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Returns current usage in bytes.
    pub fn used_bytes(&self) -> BackendResult<usize> {
        Ok(usage(&*self.lock()?))
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> BackendResult<usize> {
        Ok(self.lock()?.len())
    }

    /// Returns whether no key is stored.
    pub fn is_empty(&self) -> BackendResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> BackendResult<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| BackendError::Unavailable("memory storage lock poisoned".to_string()))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> BackendResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> BackendResult<()> {
        let mut entries = self.lock()?;
        if let Some(limit_bytes) = self.quota_bytes {
            let previous = entries
                .get(key)
                .map_or(0, |old| entry_size(key, old.as_str()));
            let requested_bytes = usage(&entries) - previous + entry_size(key, value);
            if requested_bytes > limit_bytes {
                return Err(BackendError::QuotaExceeded {
                    limit_bytes,
                    requested_bytes,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> BackendResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

fn usage(entries: &HashMap<String, String>) -> usize {
    entries
        .iter()
        .map(|(key, value)| entry_size(key, value))
        .sum()
}
