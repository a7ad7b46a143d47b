//! Collaborator seams for the drift engine.
//!
//! The engine never extracts structure or computes similarity itself; it
//! consumes both through these traits.

use vigil_core::errors::DriftError;
use vigil_core::types::Component;

/// Structural facts observed on a component right now.
#[derive(Debug, Clone)]
pub struct ObservedFacts {
    /// Touch points actually present on the component.
    pub touch_points: Vec<String>,
    /// Interface complexity in [0,1].
    pub interface_complexity: f64,
    /// A short summary of what the component currently appears to do.
    pub purpose_summary: String,
}

/// Extracts structural/interface facts for a component.
pub trait FactSource: Send + Sync {
    fn observe(&self, component: &Component) -> Result<ObservedFacts, DriftError>;
}

/// Semantic similarity of two texts, in [0,1].
pub trait SimilarityModel: Send + Sync {
    fn similarity(&self, left: &str, right: &str) -> Result<f64, DriftError>;
}
