//! SQLite PRAGMA setup.
//!
//! Every connection gets WAL journaling, NORMAL sync, enforced foreign
//! keys, an in-memory temp store, and a 5 second busy timeout so no call
//! blocks indefinitely. Readers additionally set query_only.

use rusqlite::Connection;
use vigil_core::errors::StorageError;

use crate::queries::util::map_sqlite_err;

const WRITE_PRAGMAS: &str = "
    PRAGMA journal_mode = WAL;
    PRAGMA synchronous = NORMAL;
    PRAGMA foreign_keys = ON;
    PRAGMA busy_timeout = 5000;
    PRAGMA temp_store = MEMORY;
";

const READ_PRAGMAS: &str = "
    PRAGMA query_only = ON;
    PRAGMA foreign_keys = ON;
    PRAGMA busy_timeout = 5000;
    PRAGMA temp_store = MEMORY;
";

pub fn apply_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(WRITE_PRAGMAS).map_err(map_sqlite_err)
}

pub fn apply_read_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(READ_PRAGMAS).map_err(map_sqlite_err)
}

/// True when WAL journaling is active on this connection.
pub fn verify_wal_mode(conn: &Connection) -> Result<bool, StorageError> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(map_sqlite_err)?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
