//! Subcommand dispatch: one handler per screen of the note flow.

use anyhow::{Context, Result};
use clap::Subcommand;
use notepad_core::{format_created_at, Note, NoteRepository, NoteService};
use std::io::Write;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List notes, most recent first
    List,
    /// Create a note
    Add {
        title: String,
        #[arg(default_value = "")]
        content: String,
    },
    /// Show one note in full
    View { id: String },
    /// Replace the title and/or content of a note
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Permanently delete a note
    Delete { id: String },
    /// Print core linkage info after opening the note storage
    Ping,
}

impl Command {
    /// Stable name used in log events; never includes user text.
    pub fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Add { .. } => "add",
            Self::View { .. } => "view",
            Self::Edit { .. } => "edit",
            Self::Delete { .. } => "delete",
            Self::Ping => "ping",
        }
    }
}

/// Executes `command` against `service`, writing user-facing output to `out`.
pub fn run<R: NoteRepository>(
    command: &Command,
    service: &NoteService<R>,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::List => {
            let notes = service.list_notes().context("failed to load notes")?;
            if notes.is_empty() {
                writeln!(out, "You don't have any notes yet. Create your first note!")?;
            }
            for note in notes {
                writeln!(
                    out,
                    "{}  {}  {}",
                    note.id,
                    format_created_at(&note.created_at),
                    note.title
                )?;
                if !note.snippet.is_empty() {
                    writeln!(out, "    {}", note.snippet)?;
                }
            }
        }
        Command::Add { title, content } => {
            let note = service
                .create_note(title, content)
                .context("failed to save note")?;
            writeln!(out, "Note saved: {}", note.id)?;
        }
        Command::View { id } => {
            let note = service.get_note(id).context("failed to load note")?;
            print_note(out, &note)?;
        }
        Command::Edit { id, title, content } => {
            let mut note = service.get_note(id).context("failed to load note")?;
            if let Some(title) = title {
                note.title = title.clone();
            }
            if let Some(content) = content {
                note.content = content.clone();
            }
            service
                .update_note(&note)
                .context("failed to update note")?;
            writeln!(out, "Note updated: {}", note.id)?;
        }
        Command::Delete { id } => {
            service.delete_note(id).context("failed to delete note")?;
            writeln!(out, "Note deleted: {id}")?;
        }
        Command::Ping => {
            writeln!(out, "notepad_core ping={}", notepad_core::ping())?;
            writeln!(out, "notepad_core version={}", notepad_core::core_version())?;
        }
    }
    Ok(())
}

fn print_note(out: &mut impl Write, note: &Note) -> Result<()> {
    writeln!(out, "{}", note.title)?;
    writeln!(out, "{}", format_created_at(&note.created_at))?;
    writeln!(out)?;
    writeln!(out, "{}", note.content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{run, Command};
    use notepad_core::{MemoryStorage, NoteService, SlotNoteRepository, StoreConfig};

    fn exec(service: &NoteService<SlotNoteRepository<&MemoryStorage>>, command: Command) -> String {
        let mut out = Vec::new();
        run(&command, service, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn add_list_view_delete_flow() {
        let storage = MemoryStorage::new();
        let service =
            NoteService::new(SlotNoteRepository::try_new(&storage, &StoreConfig::default()).unwrap());

        assert!(exec(&service, Command::List).contains("don't have any notes"));

        let saved = exec(
            &service,
            Command::Add {
                title: "Groceries".to_string(),
                content: "Milk, eggs".to_string(),
            },
        );
        let id = saved.trim().trim_start_matches("Note saved: ").to_string();

        let listed = exec(&service, Command::List);
        assert!(listed.contains(&id));
        assert!(listed.contains("Groceries"));
        assert!(listed.contains("Milk, eggs"));

        let viewed = exec(&service, Command::View { id: id.clone() });
        assert!(viewed.starts_with("Groceries\n"));

        exec(&service, Command::Delete { id: id.clone() });
        let mut out = Vec::new();
        assert!(run(&Command::View { id }, &service, &mut out).is_err());
    }

    #[test]
    fn ping_reports_core_linkage() {
        let storage = MemoryStorage::new();
        let service =
            NoteService::new(SlotNoteRepository::try_new(&storage, &StoreConfig::default()).unwrap());

        let output = exec(&service, Command::Ping);
        assert!(output.contains("ping=pong"));
        assert!(output.contains(&format!("version={}", notepad_core::core_version())));
    }

    #[test]
    fn edit_replaces_only_given_fields() {
        let storage = MemoryStorage::new();
        let service =
            NoteService::new(SlotNoteRepository::try_new(&storage, &StoreConfig::default()).unwrap());
        let note = service.create_note("Idea", "Write a paper").unwrap();

        exec(
            &service,
            Command::Edit {
                id: note.id.clone(),
                title: None,
                content: Some("Write two papers".to_string()),
            },
        );

        let edited = service.get_note(&note.id).unwrap();
        assert_eq!(edited.title, "Idea");
        assert_eq!(edited.content, "Write two papers");
        assert_eq!(edited.created_at, note.created_at);
    }

    #[test]
    fn add_with_blank_title_fails() {
        let storage = MemoryStorage::new();
        let service =
            NoteService::new(SlotNoteRepository::try_new(&storage, &StoreConfig::default()).unwrap());
        let mut out = Vec::new();
        let err = run(
            &Command::Add {
                title: " ".to_string(),
                content: String::new(),
            },
            &service,
            &mut out,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("title required"));
    }
}
