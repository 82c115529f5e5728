//! Schema steps for the `local_storage` slot table.
//!
//! # Responsibility
//! - List the schema steps the slot backend needs, oldest first.
//! - Bring a connection up to the newest step inside one transaction.
//!
//! # Invariants
//! - Step versions start at 1 and increase by exactly one.
//! - `PRAGMA user_version` equals the last applied step.
//! - A failing step rolls back every step of the same run.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
pub(crate) struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "local_storage",
    sql: include_str!("0001_local_storage.sql"),
}];

/// What one `apply_migrations` run changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationOutcome {
    pub from_version: u32,
    pub to_version: u32,
    /// Names of the steps applied by this run, oldest first.
    pub applied: Vec<&'static str>,
}

/// Returns the newest schema version this binary can produce.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |step| step.version)
}

/// Reads `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Applies every step newer than the connection's schema version.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<MigrationOutcome> {
    apply_steps(conn, STEPS)
}

pub(crate) fn apply_steps(
    conn: &mut Connection,
    steps: &[SchemaStep],
) -> DbResult<MigrationOutcome> {
    let from_version = schema_version(conn)?;
    let latest = steps.last().map_or(0, |step| step.version);
    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let pending = steps
        .iter()
        .filter(|step| step.version > from_version)
        .collect::<Vec<_>>();
    if pending.is_empty() {
        return Ok(MigrationOutcome {
            from_version,
            to_version: from_version,
            applied: Vec::new(),
        });
    }

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        debug!(
            "event=db_migrate module=db status=applied version={} step={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from_version} to_version={latest}");
    Ok(MigrationOutcome {
        from_version,
        to_version: latest,
        applied: pending.iter().map(|step| step.name).collect(),
    })
}
