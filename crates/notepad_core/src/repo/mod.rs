//! Repository layer: the note store and its persistence contract.
//!
//! # Responsibility
//! - Define the use-case oriented note store contract.
//! - Isolate slot serialization details from service/caller code.
//!
//! # Invariants
//! - Every operation re-reads the full slot; nothing is cached between calls.
//! - Reads report `StorageError::Read`, mutations report `StorageError::Write`.

pub mod note_repo;
