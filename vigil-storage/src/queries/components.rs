//! Queries for the components table.

use rusqlite::{params, Connection, OptionalExtension};
use vigil_core::errors::StorageError;
use vigil_core::types::ids::ComponentId;
use vigil_core::types::{Component, ComponentKind, ComponentStatus};

use super::util::{map_sqlite_err, parse_kind, parse_status};

const COLUMNS: &str = "id, name, kind, file_path, created_at, last_analyzed, status";

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Component> {
    Ok(Component {
        id: ComponentId::from_string(row.get(0)?),
        name: row.get(1)?,
        kind: parse_kind(row.get(2)?)?,
        file_path: row.get(3)?,
        created_at: row.get(4)?,
        last_analyzed: row.get(5)?,
        status: parse_status(row.get(6)?)?,
    })
}

/// Insert a new component row.
pub fn insert(conn: &Connection, component: &Component) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO components (id, name, kind, file_path, created_at, last_analyzed, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            component.id.as_str(),
            component.name,
            component.kind.as_str(),
            component.file_path,
            component.created_at,
            component.last_analyzed,
            component.status.as_str(),
        ],
    )
    .map_err(map_sqlite_err)?;
    Ok(())
}

/// Fetch one component by id.
pub fn get(conn: &Connection, id: &ComponentId) -> Result<Option<Component>, StorageError> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM components WHERE id = ?1"),
        params![id.as_str()],
        map_row,
    )
    .optional()
    .map_err(map_sqlite_err)
}

/// Fetch every component registered against a source path.
pub fn get_by_path(conn: &Connection, path: &str) -> Result<Vec<Component>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM components WHERE file_path = ?1 ORDER BY name"
        ))
        .map_err(map_sqlite_err)?;
    let rows = stmt
        .query_map(params![path], map_row)
        .map_err(map_sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(map_sqlite_err)
}

/// List components, optionally filtered by kind and/or status (ANDed),
/// ordered by name for determinism.
pub fn list(
    conn: &Connection,
    kind: Option<ComponentKind>,
    status: Option<ComponentStatus>,
) -> Result<Vec<Component>, StorageError> {
    let mut sql = format!("SELECT {COLUMNS} FROM components WHERE 1=1");
    let mut args: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
    if let Some(kind) = kind {
        sql.push_str(" AND kind = ?");
        args.push(Box::new(kind.as_str()));
    }
    if let Some(status) = status {
        sql.push_str(" AND status = ?");
        args.push(Box::new(status.as_str()));
    }
    sql.push_str(" ORDER BY name, id");

    let mut stmt = conn.prepare_cached(&sql).map_err(map_sqlite_err)?;
    let rows = stmt
        .query_map(
            rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())),
            map_row,
        )
        .map_err(map_sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(map_sqlite_err)
}

/// Update the status column. The transition check happens in the registry,
/// inside the same transaction as the read.
pub fn update_status(
    conn: &Connection,
    id: &ComponentId,
    status: ComponentStatus,
) -> Result<bool, StorageError> {
    let changed = conn
        .execute(
            "UPDATE components SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id.as_str()],
        )
        .map_err(map_sqlite_err)?;
    Ok(changed > 0)
}

/// Bump last_analyzed after a story write or scoring pass.
pub fn touch_last_analyzed(
    conn: &Connection,
    id: &ComponentId,
    at: i64,
) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE components SET last_analyzed = ?1 WHERE id = ?2",
        params![at, id.as_str()],
    )
    .map_err(map_sqlite_err)?;
    Ok(())
}
