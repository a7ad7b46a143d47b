//! Schema migrations tracked through PRAGMA user_version.

pub mod v001_initial;

use rusqlite::Connection;
use vigil_core::errors::StorageError;

const MIGRATIONS: &[(u32, &str)] = &[(1, v001_initial::MIGRATION_SQL)];

/// Apply every migration newer than the database's recorded version.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    let applied = current_version(conn)?;
    for (version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > applied) {
        conn.execute_batch(sql)
            .map_err(|e| migration_failed(*version, e))?;
        conn.pragma_update(None, "user_version", version)
            .map_err(|e| migration_failed(*version, e))?;
        tracing::info!(version, "applied migration");
    }
    Ok(())
}

/// The schema version currently recorded in the database.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}

fn migration_failed(version: u32, e: rusqlite::Error) -> StorageError {
    StorageError::MigrationFailed {
        version,
        reason: e.to_string(),
    }
}
