//! Shared helpers for query modules: error mapping, enum column parsing,
//! JSON detail round-tripping.

use vigil_core::errors::StorageError;
use vigil_core::types::{
    AnalysisType, ComponentKind, ComponentStatus, DriftDimension, Engagement, FlagLevel,
    RunStatus, TouchPointType,
};

/// Classify a rusqlite error into the storage taxonomy. Busy/locked becomes
/// a timeout-class error; constraint failures surface as such rather than
/// as a generic SQLite message.
pub(crate) fn map_sqlite_err(e: rusqlite::Error) -> StorageError {
    if let rusqlite::Error::FromSqlConversionFailure(_, _, source) = &e {
        return StorageError::Corrupt {
            details: source.to_string(),
        };
    }
    if let rusqlite::Error::SqliteFailure(inner, _) = &e {
        match inner.code {
            rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked => {
                return StorageError::Timeout {
                    message: e.to_string(),
                }
            }
            rusqlite::ErrorCode::ConstraintViolation => {
                return StorageError::ConstraintViolation {
                    message: e.to_string(),
                }
            }
            _ => {}
        }
    }
    StorageError::SqliteError {
        message: e.to_string(),
    }
}

/// Serialize a details payload for its TEXT column. Null stores as NULL.
pub(crate) fn details_to_sql(details: &serde_json::Value) -> Option<String> {
    if details.is_null() {
        None
    } else {
        Some(details.to_string())
    }
}

/// Read a details payload back. Unparseable or absent text becomes Null.
pub(crate) fn details_from_sql(raw: Option<String>) -> serde_json::Value {
    raw.and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or(serde_json::Value::Null)
}

macro_rules! sql_enum_parser {
    ($fn_name:ident, $ty:ty, $what:literal) => {
        /// Parse an enum column, failing the row mapping on unknown text.
        pub(crate) fn $fn_name(raw: String) -> rusqlite::Result<$ty> {
            <$ty>::parse(&raw).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    format!(concat!("unexpected ", $what, ": {}"), raw).into(),
                )
            })
        }
    };
}

sql_enum_parser!(parse_kind, ComponentKind, "component kind");
sql_enum_parser!(parse_status, ComponentStatus, "component status");
sql_enum_parser!(parse_engagement, Engagement, "engagement");
sql_enum_parser!(parse_touch_type, TouchPointType, "touch point type");
sql_enum_parser!(parse_dimension, DriftDimension, "drift dimension");
sql_enum_parser!(parse_flag_level, FlagLevel, "flag level");
sql_enum_parser!(parse_analysis_type, AnalysisType, "analysis type");
sql_enum_parser!(parse_run_status, RunStatus, "run status");
