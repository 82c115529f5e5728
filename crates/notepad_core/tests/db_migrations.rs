use notepad_core::db::migrations::{apply_migrations, latest_version, schema_version};
use notepad_core::db::{open_db, open_db_in_memory, DbError};
use notepad_core::{KeyValueStorage, SqliteStorage};
use rusqlite::Connection;

#[test]
fn local_storage_table_has_slot_columns() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());

    let mut stmt = conn.prepare("PRAGMA table_info(local_storage);").unwrap();
    let columns = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>("name")?,
                row.get::<_, bool>("notnull")?,
                row.get::<_, i64>("pk")?,
                row.get::<_, Option<String>>("dflt_value")?,
            ))
        })
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let names = columns.iter().map(|c| c.0.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["key", "value", "updated_at"]);
    assert_eq!(columns[0].2, 1, "key is the primary key");
    assert!(columns[1].1, "value is NOT NULL");
    assert!(columns[2].3.is_some(), "updated_at has a default");
}

#[test]
fn updated_at_defaults_to_current_epoch_millis() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO local_storage (key, value) VALUES ('k', '[]');",
        [],
    )
    .unwrap();

    let updated_at: i64 = conn
        .query_row(
            "SELECT updated_at FROM local_storage WHERE key = 'k';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!(updated_at > 1_600_000_000_000, "got {updated_at}");
}

#[test]
fn reopening_file_keeps_slot_and_applies_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notepad.db");

    {
        let conn = open_db(&path).unwrap();
        SqliteStorage::try_new(&conn)
            .unwrap()
            .set_item("note-taking-app-notes", "[]")
            .unwrap();
    }

    let mut conn = open_db(&path).unwrap();
    let outcome = apply_migrations(&mut conn).unwrap();
    assert!(outcome.applied.is_empty());
    assert_eq!(outcome.from_version, latest_version());

    let storage = SqliteStorage::try_new(&conn).unwrap();
    assert_eq!(
        storage.get_item("note-taking-app-notes").unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn fresh_connection_applies_every_step() {
    let mut conn = Connection::open_in_memory().unwrap();
    let outcome = apply_migrations(&mut conn).unwrap();
    assert_eq!(outcome.from_version, 0);
    assert_eq!(outcome.to_version, latest_version());
    assert_eq!(outcome.applied, vec!["local_storage"]);
}

#[test]
fn newer_schema_is_rejected_and_left_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), 999);
}
