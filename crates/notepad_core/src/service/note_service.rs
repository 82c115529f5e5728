//! Note use-case service.
//!
//! # Responsibility
//! - Provide the create/list/view/edit/delete flows front ends call.
//! - Enforce caller-side input rules the store deliberately skips.
//! - Derive list projections (content snippet, display date).
//!
//! # Invariants
//! - A note title must contain a non-whitespace character.
//! - Title and content are stored exactly as given (no trimming).
//! - List order is the store order (most recently created first).

use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::{NoteRepository, StorageError};
use chrono::DateTime;
use thiserror::Error;

const SNIPPET_MAX_CHARS: usize = 100;
const SNIPPET_ELLIPSIS: &str = "...";
const CREATED_AT_DISPLAY_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

/// Service error for note use-cases.
#[derive(Debug, Error)]
pub enum NoteServiceError {
    /// Title is empty or whitespace only.
    #[error("title required: please enter a title for your note")]
    TitleRequired,
    /// Caller passed an empty note id.
    #[error("note id is missing")]
    MissingId,
    /// Target note does not exist.
    #[error("note not found: {0}")]
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// List item projection used by note overview screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSummary {
    pub id: NoteId,
    pub title: String,
    /// Raw ISO-8601 creation time.
    pub created_at: String,
    /// Content shortened to `SNIPPET_MAX_CHARS` characters.
    pub snippet: String,
}

impl From<Note> for NoteSummary {
    fn from(note: Note) -> Self {
        Self {
            snippet: content_snippet(&note.content, SNIPPET_MAX_CHARS),
            id: note.id,
            title: note.title,
            created_at: note.created_at,
        }
    }
}

/// Note service facade over a note store.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided store implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the wrapped store.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Creates one note after checking the title.
    pub fn create_note(&self, title: &str, content: &str) -> Result<Note, NoteServiceError> {
        ensure_title(title)?;
        Ok(self.repo.create(title, content)?)
    }

    /// Lists note summaries, most recently created first.
    pub fn list_notes(&self) -> Result<Vec<NoteSummary>, NoteServiceError> {
        let notes = self.repo.list()?;
        Ok(notes.into_iter().map(NoteSummary::from).collect())
    }

    /// Gets one full note, turning absence into `NoteNotFound`.
    pub fn get_note(&self, id: &str) -> Result<Note, NoteServiceError> {
        ensure_id(id)?;
        self.repo
            .get_by_id(id)?
            .ok_or_else(|| NoteServiceError::NoteNotFound(id.to_string()))
    }

    /// Replaces a note in place after checking the title.
    ///
    /// An id that matches nothing is a silent no-op, as in the store.
    pub fn update_note(&self, note: &Note) -> Result<Note, NoteServiceError> {
        ensure_id(&note.id)?;
        ensure_title(&note.title)?;
        Ok(self.repo.update(note)?)
    }

    /// Deletes one note. Deleting an absent id succeeds.
    pub fn delete_note(&self, id: &str) -> Result<(), NoteServiceError> {
        ensure_id(id)?;
        Ok(self.repo.delete(id)?)
    }
}

fn ensure_title(title: &str) -> Result<(), NoteServiceError> {
    if title.trim().is_empty() {
        return Err(NoteServiceError::TitleRequired);
    }
    Ok(())
}

fn ensure_id(id: &str) -> Result<(), NoteServiceError> {
    if id.is_empty() {
        return Err(NoteServiceError::MissingId);
    }
    Ok(())
}

/// Shortens `content` to `max_chars` characters, appending `...` when cut.
pub fn content_snippet(content: &str, max_chars: usize) -> String {
    let mut chars = content.char_indices();
    match chars.nth(max_chars) {
        Some((cut, _)) => format!("{}{SNIPPET_ELLIPSIS}", &content[..cut]),
        None => content.to_string(),
    }
}

/// Formats an ISO-8601 creation time for display, e.g. `Nov 14, 2023, 12:00 PM`.
///
/// Rendered in UTC. Input that does not parse is returned unchanged.
pub fn format_created_at(created_at: &str) -> String {
    match DateTime::parse_from_rfc3339(created_at) {
        Ok(parsed) => parsed
            .naive_utc()
            .format(CREATED_AT_DISPLAY_FORMAT)
            .to_string(),
        Err(_) => created_at.to_string(),
    }
}
