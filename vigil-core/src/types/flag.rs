//! Component flags: the leveled outcome of evaluating drift thresholds.

use serde::{Deserialize, Serialize};

use crate::constants::{THRESHOLD_CRITICAL, THRESHOLD_MINOR, THRESHOLD_SIGNIFICANT};

use super::ids::{ComponentId, FlagId};

/// Flag severity, derived from the composite drift score by fixed, ordered
/// thresholds that partition [0,1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagLevel {
    None,
    Minor,
    Significant,
    Critical,
}

impl FlagLevel {
    /// Map a composite drift score to its level.
    pub fn from_score(score: f64) -> Self {
        if score >= THRESHOLD_CRITICAL {
            FlagLevel::Critical
        } else if score >= THRESHOLD_SIGNIFICANT {
            FlagLevel::Significant
        } else if score >= THRESHOLD_MINOR {
            FlagLevel::Minor
        } else {
            FlagLevel::None
        }
    }

    /// True iff this level routes to human review.
    pub fn requires_review(self) -> bool {
        matches!(self, FlagLevel::Significant | FlagLevel::Critical)
    }

    /// Ordering rank for severity sorting (critical highest).
    pub fn severity_rank(self) -> u8 {
        match self {
            FlagLevel::None => 0,
            FlagLevel::Minor => 1,
            FlagLevel::Significant => 2,
            FlagLevel::Critical => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FlagLevel::None => "none",
            FlagLevel::Minor => "minor",
            FlagLevel::Significant => "significant",
            FlagLevel::Critical => "critical",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "none" => Some(FlagLevel::None),
            "minor" => Some(FlagLevel::Minor),
            "significant" => Some(FlagLevel::Significant),
            "critical" => Some(FlagLevel::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for FlagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted flag. At most one unresolved flag exists per component;
/// re-evaluation updates the open row in place. Resolution is an explicit,
/// attributed external action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flag {
    pub id: FlagId,
    pub component_id: ComponentId,
    pub level: FlagLevel,
    pub drift_score: f64,
    pub details: serde_json::Value,
    pub flagged_at: i64,
    pub resolved_at: Option<i64>,
    pub resolved_by: Option<String>,
}

impl Flag {
    pub fn is_resolved(&self) -> bool {
        self.resolved_at.is_some()
    }
}
