//! Read queries over the derived views.

use rusqlite::Connection;
use vigil_core::errors::StorageError;
use vigil_core::types::ids::ComponentId;
use vigil_core::types::{ComponentKind, ComponentStatus, FlagLevel};

use super::util::{map_sqlite_err, parse_kind, parse_status};

/// One row of the components_requiring_attention view.
#[derive(Debug, Clone)]
pub struct AttentionRow {
    pub component_id: ComponentId,
    pub name: String,
    pub kind: ComponentKind,
    pub status: ComponentStatus,
    pub flag_level: Option<FlagLevel>,
    pub flag_score: Option<f64>,
    pub latest_composite: Option<f64>,
}

/// Components needing a human, ordered by severity then score descending.
pub fn requiring_attention(conn: &Connection) -> Result<Vec<AttentionRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT component_id, name, kind, status, flag_level, flag_score, latest_composite
             FROM components_requiring_attention",
        )
        .map_err(map_sqlite_err)?;
    let rows = stmt
        .query_map([], |row| {
            let level_raw: Option<String> = row.get(4)?;
            let flag_level = match level_raw {
                Some(raw) => Some(super::util::parse_flag_level(raw)?),
                None => None,
            };
            Ok(AttentionRow {
                component_id: ComponentId::from_string(row.get(0)?),
                name: row.get(1)?,
                kind: parse_kind(row.get(2)?)?,
                status: parse_status(row.get(3)?)?,
                flag_level,
                flag_score: row.get(5)?,
                latest_composite: row.get(6)?,
            })
        })
        .map_err(map_sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(map_sqlite_err)
}

/// One row of the coverage_stats view.
#[derive(Debug, Clone)]
pub struct KindCoverage {
    pub kind: ComponentKind,
    pub total: i64,
    pub analyzed: i64,
    pub coverage_pct: f64,
    pub avg_quality: Option<f64>,
}

/// Story coverage per component kind.
pub fn coverage(conn: &Connection) -> Result<Vec<KindCoverage>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT kind, total_components, analyzed_components, coverage_pct, avg_quality
             FROM coverage_stats ORDER BY kind",
        )
        .map_err(map_sqlite_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(KindCoverage {
                kind: parse_kind(row.get(0)?)?,
                total: row.get(1)?,
                analyzed: row.get(2)?,
                coverage_pct: row.get(3)?,
                avg_quality: row.get(4)?,
            })
        })
        .map_err(map_sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(map_sqlite_err)
}
