//! Queries for the component_flags table.
//!
//! The one-unresolved-flag invariant lives here: every mutation of open
//! flag state runs as a read-then-write inside the caller's IMMEDIATE
//! transaction, with the partial unique index as the storage-level
//! backstop against a second open row.

use rusqlite::{params, Connection, OptionalExtension};
use vigil_core::errors::StorageError;
use vigil_core::types::ids::{ComponentId, FlagId};
use vigil_core::types::{Flag, FlagLevel};

use super::util::{details_from_sql, details_to_sql, map_sqlite_err, parse_flag_level};

const COLUMNS: &str =
    "id, component_id, flag_level, drift_score, details, flagged_at, resolved_at, resolved_by";

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Flag> {
    Ok(Flag {
        id: FlagId::from_string(row.get(0)?),
        component_id: ComponentId::from_string(row.get(1)?),
        level: parse_flag_level(row.get(2)?)?,
        drift_score: row.get(3)?,
        details: details_from_sql(row.get(4)?),
        flagged_at: row.get(5)?,
        resolved_at: row.get(6)?,
        resolved_by: row.get(7)?,
    })
}

/// Insert a new flag row.
pub fn insert(conn: &Connection, flag: &Flag) -> Result<(), StorageError> {
    conn.execute(
        &format!(
            "INSERT INTO component_flags ({COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
        ),
        params![
            flag.id.as_str(),
            flag.component_id.as_str(),
            flag.level.as_str(),
            flag.drift_score,
            details_to_sql(&flag.details),
            flag.flagged_at,
            flag.resolved_at,
            flag.resolved_by,
        ],
    )
    .map_err(map_sqlite_err)?;
    Ok(())
}

/// The unresolved flag for a component, if one exists.
pub fn unresolved(
    conn: &Connection,
    component_id: &ComponentId,
) -> Result<Option<Flag>, StorageError> {
    conn.query_row(
        &format!(
            "SELECT {COLUMNS} FROM component_flags
             WHERE component_id = ?1 AND resolved_at IS NULL"
        ),
        params![component_id.as_str()],
        map_row,
    )
    .optional()
    .map_err(map_sqlite_err)
}

/// Update an open flag's level, score, and details in place.
pub fn update_open(
    conn: &Connection,
    flag_id: &FlagId,
    level: FlagLevel,
    drift_score: f64,
    details: &serde_json::Value,
) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE component_flags
         SET flag_level = ?1, drift_score = ?2, details = ?3
         WHERE id = ?4 AND resolved_at IS NULL",
        params![
            level.as_str(),
            drift_score,
            details_to_sql(details),
            flag_id.as_str(),
        ],
    )
    .map_err(map_sqlite_err)?;
    Ok(())
}

/// Resolve a component's open flag with attribution. Returns false when no
/// open flag exists.
pub fn resolve(
    conn: &Connection,
    component_id: &ComponentId,
    resolved_by: &str,
    resolved_at: i64,
) -> Result<bool, StorageError> {
    let changed = conn
        .execute(
            "UPDATE component_flags
             SET resolved_at = ?1, resolved_by = ?2
             WHERE component_id = ?3 AND resolved_at IS NULL",
            params![resolved_at, resolved_by, component_id.as_str()],
        )
        .map_err(map_sqlite_err)?;
    Ok(changed > 0)
}

/// All unresolved flags, optionally filtered by level, newest first.
pub fn list_unresolved(
    conn: &Connection,
    level: Option<FlagLevel>,
) -> Result<Vec<Flag>, StorageError> {
    let (sql, lvl);
    if let Some(l) = level {
        sql = format!(
            "SELECT {COLUMNS} FROM component_flags
             WHERE resolved_at IS NULL AND flag_level = ?1
             ORDER BY flagged_at DESC, id DESC"
        );
        lvl = Some(l);
    } else {
        sql = format!(
            "SELECT {COLUMNS} FROM component_flags
             WHERE resolved_at IS NULL
             ORDER BY flagged_at DESC, id DESC"
        );
        lvl = None;
    }

    let mut stmt = conn.prepare_cached(&sql).map_err(map_sqlite_err)?;
    let rows = match lvl {
        Some(l) => stmt
            .query_map(params![l.as_str()], map_row)
            .map_err(map_sqlite_err)?
            .collect::<Result<Vec<_>, _>>(),
        None => stmt
            .query_map([], map_row)
            .map_err(map_sqlite_err)?
            .collect::<Result<Vec<_>, _>>(),
    };
    rows.map_err(map_sqlite_err)
}

/// Count every flag row (resolved included) for a component.
pub fn count_for_component(
    conn: &Connection,
    component_id: &ComponentId,
) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM component_flags WHERE component_id = ?1",
        params![component_id.as_str()],
        |row| row.get(0),
    )
    .map_err(map_sqlite_err)
}
