//! Domain types for the Vigil drift monitor.

pub mod analysis;
pub mod component;
pub mod drift;
pub mod flag;
pub mod ids;
pub mod story;

pub use analysis::{AnalysisRun, AnalysisType, RunStatus};
pub use component::{Component, ComponentKind, ComponentStatus};
pub use drift::{DimensionScores, DriftDimension, DriftMeasurement};
pub use flag::{Flag, FlagLevel};
pub use story::{Engagement, StoryDraft, TouchPoint, TouchPointDraft, TouchPointType, UserStory};

/// Current unix time in whole seconds. All persisted timestamps use this.
pub fn now_secs() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
