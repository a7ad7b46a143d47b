//! Queries for the drift_metrics table — append-only score time series.

use rusqlite::{params, Connection, OptionalExtension};
use vigil_core::errors::StorageError;
use vigil_core::types::ids::{ComponentId, MeasurementId};
use vigil_core::types::{DriftDimension, DriftMeasurement};

use super::util::{details_from_sql, details_to_sql, map_sqlite_err, parse_dimension};

const COLUMNS: &str = "id, component_id, drift_score, dimension, measured_at, details";

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DriftMeasurement> {
    Ok(DriftMeasurement {
        id: MeasurementId::from_string(row.get(0)?),
        component_id: ComponentId::from_string(row.get(1)?),
        score: row.get(2)?,
        dimension: parse_dimension(row.get(3)?)?,
        measured_at: row.get(4)?,
        details: details_from_sql(row.get(5)?),
    })
}

/// Insert one measurement row.
pub fn insert(conn: &Connection, measurement: &DriftMeasurement) -> Result<(), StorageError> {
    conn.execute(
        &format!("INSERT INTO drift_metrics ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
        params![
            measurement.id.as_str(),
            measurement.component_id.as_str(),
            measurement.score,
            measurement.dimension.as_str(),
            measurement.measured_at,
            details_to_sql(&measurement.details),
        ],
    )
    .map_err(map_sqlite_err)?;
    Ok(())
}

/// The latest composite score for a component, if any.
pub fn latest_composite(
    conn: &Connection,
    component_id: &ComponentId,
) -> Result<Option<f64>, StorageError> {
    conn.query_row(
        "SELECT drift_score FROM drift_metrics
         WHERE component_id = ?1 AND dimension = 'composite'
         ORDER BY measured_at DESC, id DESC LIMIT 1",
        params![component_id.as_str()],
        |row| row.get(0),
    )
    .optional()
    .map_err(map_sqlite_err)
}

/// Recent measurements for a component, newest first, optionally filtered
/// to one dimension.
pub fn recent(
    conn: &Connection,
    component_id: &ComponentId,
    dimension: Option<DriftDimension>,
    limit: usize,
) -> Result<Vec<DriftMeasurement>, StorageError> {
    let (sql, dim);
    if let Some(d) = dimension {
        sql = format!(
            "SELECT {COLUMNS} FROM drift_metrics
             WHERE component_id = ?1 AND dimension = ?2
             ORDER BY measured_at DESC, id DESC LIMIT ?3"
        );
        dim = Some(d);
    } else {
        sql = format!(
            "SELECT {COLUMNS} FROM drift_metrics
             WHERE component_id = ?1
             ORDER BY measured_at DESC, id DESC LIMIT ?2"
        );
        dim = None;
    }

    let mut stmt = conn.prepare_cached(&sql).map_err(map_sqlite_err)?;
    let rows = match dim {
        Some(d) => stmt
            .query_map(
                params![component_id.as_str(), d.as_str(), limit as i64],
                map_row,
            )
            .map_err(map_sqlite_err)?
            .collect::<Result<Vec<_>, _>>(),
        None => stmt
            .query_map(params![component_id.as_str(), limit as i64], map_row)
            .map_err(map_sqlite_err)?
            .collect::<Result<Vec<_>, _>>(),
    };
    rows.map_err(map_sqlite_err)
}

/// Count all measurement rows for a component.
pub fn count(conn: &Connection, component_id: &ComponentId) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM drift_metrics WHERE component_id = ?1",
        params![component_id.as_str()],
        |row| row.get(0),
    )
    .map_err(map_sqlite_err)
}
