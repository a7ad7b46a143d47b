//! Payloads delivered to alert handlers.

use crate::types::ids::ComponentId;
use crate::types::{DimensionScores, FlagLevel};

/// Emitted when an evaluation produces a flag that requires review.
#[derive(Debug, Clone)]
pub struct FlagRaisedEvent {
    pub component_id: ComponentId,
    pub component_name: String,
    pub level: FlagLevel,
    /// The composite drift score that produced the flag.
    pub score: f64,
    pub dimension_scores: DimensionScores,
    pub details: serde_json::Value,
}

/// Emitted when an open flag is explicitly resolved.
#[derive(Debug, Clone)]
pub struct FlagResolvedEvent {
    pub component_id: ComponentId,
    pub resolved_by: String,
}
