//! Analysis runs: an audit trail of drift-engine invocations.
//!
//! Exists purely for observability. A run left in `running` after a crash
//! is surfaced by the stale-run query; the core never retries it.

use serde::{Deserialize, Serialize};

use super::ids::{ComponentId, RunId};

/// Why a scoring pass ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    Initial,
    Update,
    DriftCheck,
    Scheduled,
}

impl AnalysisType {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisType::Initial => "initial",
            AnalysisType::Update => "update",
            AnalysisType::DriftCheck => "drift_check",
            AnalysisType::Scheduled => "scheduled",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "initial" => Some(AnalysisType::Initial),
            "update" => Some(AnalysisType::Update),
            "drift_check" => Some(AnalysisType::DriftCheck),
            "scheduled" => Some(AnalysisType::Scheduled),
            _ => None,
        }
    }
}

impl std::fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Running => "running",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "running" => Some(RunStatus::Running),
            "completed" => Some(RunStatus::Completed),
            "failed" => Some(RunStatus::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One drift-engine invocation, bounded by started/completed timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRun {
    pub id: RunId,
    pub component_id: ComponentId,
    pub analysis_type: AnalysisType,
    pub started_at: i64,
    pub completed_at: Option<i64>,
    pub status: RunStatus,
    pub result: Option<serde_json::Value>,
    pub error: Option<String>,
}

impl AnalysisRun {
    /// A fresh `running` run starting now.
    pub fn started(component_id: ComponentId, analysis_type: AnalysisType) -> Self {
        Self {
            id: RunId::generate(),
            component_id,
            analysis_type,
            started_at: super::now_secs(),
            completed_at: None,
            status: RunStatus::Running,
            result: None,
            error: None,
        }
    }

    /// Whether this run should be treated as abandoned.
    pub fn is_stale(&self, now: i64, timeout_secs: u64) -> bool {
        self.status == RunStatus::Running && now - self.started_at > timeout_secs as i64
    }
}
