//! Note store contract and slot-backed implementation.
//!
//! # Responsibility
//! - Provide list/get/create/update/delete over the note collection.
//! - Own the JSON encoding of the whole collection inside one storage slot.
//!
//! # Invariants
//! - The slot holds a JSON array of notes, or is absent or empty (empty
//!   collection).
//! - New notes are prepended; the array is ordered most recent first.
//! - Every mutation is one read-transform-write of the full array. A failed
//!   write leaves the previous slot value untouched.
//! - `update` on an unknown id and `delete` of an absent id are silent no-ops.

use crate::config::{ConfigError, StoreConfig};
use crate::model::note::{Clock, Note, SystemClock};
use crate::storage::{BackendError, KeyValueStorage};
use log::{debug, error, info};
use std::time::Instant;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StorageError>;

/// Underlying reason a slot read or write failed.
#[derive(Debug, Error)]
pub enum SlotError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    /// Slot content is not a JSON array of note records.
    #[error("malformed note collection: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("failed to encode note collection: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Error surfaced by note store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The slot could not be read or parsed.
    #[error("failed to load notes from `{key}`: {cause}")]
    Read {
        key: String,
        #[source]
        cause: SlotError,
    },
    /// A mutation could not be completed; the slot keeps its prior value.
    #[error("failed to save notes to `{key}`: {cause}")]
    Write {
        key: String,
        #[source]
        cause: SlotError,
    },
}

impl StorageError {
    /// Returns the slot cause shared by both variants.
    pub fn cause(&self) -> &SlotError {
        match self {
            Self::Read { cause, .. } | Self::Write { cause, .. } => cause,
        }
    }
}

/// Note store contract consumed by services and front ends.
pub trait NoteRepository {
    /// Lists all notes, most recently created first.
    fn list(&self) -> StoreResult<Vec<Note>>;
    /// Finds one note by id. `None` means not found.
    fn get_by_id(&self, id: &str) -> StoreResult<Option<Note>>;
    /// Creates and prepends a note with a fresh id and creation time.
    fn create(&self, title: &str, content: &str) -> StoreResult<Note>;
    /// Replaces the note with the same id in place and returns `note`.
    fn update(&self, note: &Note) -> StoreResult<Note>;
    /// Removes the note with `id` if present.
    fn delete(&self, id: &str) -> StoreResult<()>;
    /// Removes the whole slot.
    fn clear(&self) -> StoreResult<()>;
}

/// Note store persisting the whole collection in one key-value slot.
///
/// There is no locking across the read-transform-write cycle. Two stores
/// sharing a slot can overwrite each other's changes (lost update); callers
/// are expected to use one store per slot from a single thread of control.
pub struct SlotNoteRepository<S: KeyValueStorage> {
    storage: S,
    key: String,
    clock: Box<dyn Clock + Send + Sync>,
}

impl<S: KeyValueStorage> SlotNoteRepository<S> {
    /// Constructs a store over `storage` using `config.storage_key`.
    pub fn try_new(storage: S, config: &StoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            storage,
            key: config.storage_key.clone(),
            clock: Box::new(SystemClock),
        })
    }

    /// Replaces the clock used to stamp new notes.
    pub fn with_clock(mut self, clock: impl Clock + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Returns the slot key this store owns.
    pub fn storage_key(&self) -> &str {
        self.key.as_str()
    }

    /// Returns the backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn load(&self) -> Result<Vec<Note>, SlotError> {
        match self.storage.get_item(&self.key)? {
            Some(raw) if !raw.is_empty() => {
                serde_json::from_str(&raw).map_err(SlotError::Malformed)
            }
            // An empty value counts as an absent slot.
            _ => Ok(Vec::new()),
        }
    }

    fn persist(&self, notes: &[Note]) -> Result<(), SlotError> {
        let payload = serde_json::to_string(notes).map_err(SlotError::Encode)?;
        self.storage.set_item(&self.key, &payload)?;
        Ok(())
    }

    fn read_error(&self, cause: SlotError) -> StorageError {
        StorageError::Read {
            key: self.key.clone(),
            cause,
        }
    }

    fn write_error(&self, cause: SlotError) -> StorageError {
        StorageError::Write {
            key: self.key.clone(),
            cause,
        }
    }

    /// Runs one read-transform-write cycle and logs its outcome.
    fn mutate<T>(
        &self,
        event: &'static str,
        transform: impl FnOnce(&mut Vec<Note>) -> T,
    ) -> StoreResult<T> {
        let started_at = Instant::now();
        let result = self.load().and_then(|mut notes| {
            let output = transform(&mut notes);
            self.persist(&notes)?;
            Ok((output, notes.len()))
        });

        match result {
            Ok((output, count)) => {
                info!(
                    "event={event} module=store status=ok count={count} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(output)
            }
            Err(cause) => {
                error!(
                    "event={event} module=store status=error duration_ms={} error={cause}",
                    started_at.elapsed().as_millis()
                );
                Err(self.write_error(cause))
            }
        }
    }
}

impl<S: KeyValueStorage> NoteRepository for SlotNoteRepository<S> {
    fn list(&self) -> StoreResult<Vec<Note>> {
        match self.load() {
            Ok(notes) => {
                debug!(
                    "event=note_list module=store status=ok count={}",
                    notes.len()
                );
                Ok(notes)
            }
            Err(cause) => {
                error!("event=note_list module=store status=error error={cause}");
                Err(self.read_error(cause))
            }
        }
    }

    fn get_by_id(&self, id: &str) -> StoreResult<Option<Note>> {
        let found = self.list()?.into_iter().find(|note| note.id == id);
        debug!(
            "event=note_get module=store status=ok id={id} found={}",
            found.is_some()
        );
        Ok(found)
    }

    fn create(&self, title: &str, content: &str) -> StoreResult<Note> {
        let note = Note::new(self.clock.as_ref(), title, content);
        let created = note.clone();
        self.mutate("note_create", move |notes| notes.insert(0, note))?;
        Ok(created)
    }

    fn update(&self, note: &Note) -> StoreResult<Note> {
        let replaced = self.mutate("note_update", |notes| {
            let mut replaced = 0usize;
            for existing in notes.iter_mut().filter(|existing| existing.id == note.id) {
                *existing = note.clone();
                replaced += 1;
            }
            replaced
        })?;
        debug!(
            "event=note_update module=store id={} replaced={replaced}",
            note.id
        );
        Ok(note.clone())
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        let removed = self.mutate("note_delete", |notes| {
            let before = notes.len();
            notes.retain(|note| note.id != id);
            before - notes.len()
        })?;
        debug!("event=note_delete module=store id={id} removed={removed}");
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        self.storage.remove_item(&self.key).map_err(|err| {
            error!("event=note_clear module=store status=error error={err}");
            self.write_error(err.into())
        })?;
        info!("event=note_clear module=store status=ok");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteRepository, SlotError, SlotNoteRepository, StorageError};
    use crate::config::StoreConfig;
    use crate::storage::{KeyValueStorage, MemoryStorage};

    #[test]
    fn absent_slot_is_not_written_by_reads() {
        let storage = MemoryStorage::new();
        let repo = SlotNoteRepository::try_new(&storage, &StoreConfig::default()).unwrap();

        assert!(repo.list().unwrap().is_empty());
        assert_eq!(repo.get_by_id("1").unwrap(), None);
        assert!(storage.is_empty().unwrap());
    }

    #[test]
    fn malformed_slot_reports_malformed_cause() {
        let storage = MemoryStorage::new();
        let repo = SlotNoteRepository::try_new(&storage, &StoreConfig::default()).unwrap();
        storage.set_item(repo.storage_key(), "not json").unwrap();

        let err = repo.list().unwrap_err();
        assert!(matches!(err, StorageError::Read { .. }));
        assert!(matches!(err.cause(), SlotError::Malformed(_)));
    }

    #[test]
    fn blank_storage_key_is_rejected() {
        let config = StoreConfig {
            storage_key: String::new(),
            ..StoreConfig::default()
        };
        assert!(SlotNoteRepository::try_new(MemoryStorage::new(), &config).is_err());
    }
}
