//! Queries for the analysis_log table — audit trail of scoring passes.

use rusqlite::{params, Connection, OptionalExtension};
use vigil_core::errors::StorageError;
use vigil_core::types::ids::{ComponentId, RunId};
use vigil_core::types::AnalysisRun;

use super::util::{map_sqlite_err, parse_analysis_type, parse_run_status};

const COLUMNS: &str =
    "id, component_id, analysis_type, started_at, completed_at, status, result_data, error_message";

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AnalysisRun> {
    let result_raw: Option<String> = row.get(6)?;
    Ok(AnalysisRun {
        id: RunId::from_string(row.get(0)?),
        component_id: ComponentId::from_string(row.get(1)?),
        analysis_type: parse_analysis_type(row.get(2)?)?,
        started_at: row.get(3)?,
        completed_at: row.get(4)?,
        status: parse_run_status(row.get(5)?)?,
        result: result_raw.and_then(|s| serde_json::from_str(&s).ok()),
        error: row.get(7)?,
    })
}

/// Record the start of a run (status = running).
pub fn insert_start(conn: &Connection, run: &AnalysisRun) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO analysis_log (id, component_id, analysis_type, started_at, status)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            run.id.as_str(),
            run.component_id.as_str(),
            run.analysis_type.as_str(),
            run.started_at,
            run.status.as_str(),
        ],
    )
    .map_err(map_sqlite_err)?;
    Ok(())
}

/// Mark a run completed with its result payload.
pub fn complete(
    conn: &Connection,
    run_id: &RunId,
    completed_at: i64,
    result: &serde_json::Value,
) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE analysis_log
         SET completed_at = ?1, status = 'completed', result_data = ?2
         WHERE id = ?3",
        params![completed_at, result.to_string(), run_id.as_str()],
    )
    .map_err(map_sqlite_err)?;
    Ok(())
}

/// Mark a run failed with its error message.
pub fn fail(
    conn: &Connection,
    run_id: &RunId,
    completed_at: i64,
    error: &str,
) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE analysis_log
         SET completed_at = ?1, status = 'failed', error_message = ?2
         WHERE id = ?3",
        params![completed_at, error, run_id.as_str()],
    )
    .map_err(map_sqlite_err)?;
    Ok(())
}

/// Fetch one run by id.
pub fn get(conn: &Connection, run_id: &RunId) -> Result<Option<AnalysisRun>, StorageError> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM analysis_log WHERE id = ?1"),
        params![run_id.as_str()],
        map_row,
    )
    .optional()
    .map_err(map_sqlite_err)
}

/// Recent runs for a component, newest first.
pub fn recent(
    conn: &Connection,
    component_id: &ComponentId,
    limit: usize,
) -> Result<Vec<AnalysisRun>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM analysis_log
             WHERE component_id = ?1
             ORDER BY started_at DESC, id DESC LIMIT ?2"
        ))
        .map_err(map_sqlite_err)?;
    let rows = stmt
        .query_map(params![component_id.as_str(), limit as i64], map_row)
        .map_err(map_sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(map_sqlite_err)
}

/// Runs still marked `running` that started at or before `cutoff`.
/// These are presumed crashed; retrying them is the scheduler's call.
pub fn stale(conn: &Connection, cutoff: i64) -> Result<Vec<AnalysisRun>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM analysis_log
             WHERE status = 'running' AND started_at <= ?1
             ORDER BY started_at ASC"
        ))
        .map_err(map_sqlite_err)?;
    let rows = stmt
        .query_map(params![cutoff], map_row)
        .map_err(map_sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(map_sqlite_err)
}
