//! Command-line front end for the note store.
//!
//! # Responsibility
//! - Resolve configuration from defaults, `NOTEPAD_*` env and flags.
//! - Open the SQLite-backed slot and dispatch one subcommand.

mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::Command;
use log::{error, info};
use notepad_core::db::open_db;
use notepad_core::{init_logging, NoteService, SlotNoteRepository, SqliteStorage, StoreConfig};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "notepad", version, about = "Create, list, view and delete short notes")]
struct Cli {
    /// SQLite file holding the note slot
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Storage key of the note collection
    #[arg(long, global = true)]
    key: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn resolve_config(&self) -> Result<StoreConfig> {
        let mut config = StoreConfig::from_env().context("invalid NOTEPAD_* environment")?;
        if let Some(db) = &self.db {
            config.db_path = db.clone();
        }
        if let Some(key) = &self.key {
            config.storage_key = key.clone();
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = Some(dir.clone());
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir).context("failed to initialize logging")?;
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let storage = SqliteStorage::try_new(&conn).context("failed to prepare note storage")?;
    let repo = SlotNoteRepository::try_new(storage, &config)?;
    let service = NoteService::new(repo);

    let stdout = std::io::stdout();
    let result = commands::run(&cli.command, &service, &mut stdout.lock());
    match &result {
        Ok(()) => info!("event=cli_run module=cli status=ok command={}", cli.command.name()),
        Err(err) => error!(
            "event=cli_run module=cli status=error command={} error={err:#}",
            cli.command.name()
        ),
    }
    result
}
