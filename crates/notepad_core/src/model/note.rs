//! Note domain model.
//!
//! # Responsibility
//! - Define the four-field note record and its JSON wire shape.
//! - Assign ids and creation timestamps from an injectable clock.
//!
//! # Invariants
//! - Wire shape is exactly `id`, `title`, `content`, `createdAt`.
//! - `id` is the creation instant in Unix epoch milliseconds, rendered in
//!   decimal. Two notes created within the same millisecond share an id.
//! - `created_at` is ISO-8601 UTC with millisecond precision and `Z` suffix.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Stable note identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = String;

/// Source of "now" for id and timestamp assignment.
pub trait Clock {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Canonical note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Creation instant in epoch milliseconds, as a decimal string.
    pub id: NoteId,
    /// User-supplied title. Not validated here.
    pub title: String,
    /// User-supplied body. Not validated here.
    pub content: String,
    /// Serialized as `createdAt` to match the persisted slot layout.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl Note {
    /// Creates a note stamped with the given clock's current instant.
    pub fn new(clock: &dyn Clock, title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = clock.now();
        Self {
            id: note_id_at(now),
            title: title.into(),
            content: content.into(),
            created_at: iso_timestamp(now),
        }
    }
}

/// Renders the id assigned to a note created at `instant`.
pub fn note_id_at(instant: DateTime<Utc>) -> NoteId {
    instant.timestamp_millis().to_string()
}

/// Renders `instant` as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn iso_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
