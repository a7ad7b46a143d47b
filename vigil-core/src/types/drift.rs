//! Drift measurements: one scored evaluation per dimension, append-only.

use serde::{Deserialize, Serialize};

use super::ids::{ComponentId, MeasurementId};

/// The dimension a measurement was taken along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftDimension {
    Implementation,
    Interface,
    Purpose,
    Composite,
}

impl DriftDimension {
    pub fn as_str(self) -> &'static str {
        match self {
            DriftDimension::Implementation => "implementation",
            DriftDimension::Interface => "interface",
            DriftDimension::Purpose => "purpose",
            DriftDimension::Composite => "composite",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "implementation" => Some(DriftDimension::Implementation),
            "interface" => Some(DriftDimension::Interface),
            "purpose" => Some(DriftDimension::Purpose),
            "composite" => Some(DriftDimension::Composite),
            _ => None,
        }
    }
}

impl std::fmt::Display for DriftDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scored evaluation of a component along one dimension.
/// Score is in [0,1]: 0 = no drift, 1 = total drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftMeasurement {
    pub id: MeasurementId,
    pub component_id: ComponentId,
    pub score: f64,
    pub dimension: DriftDimension,
    pub measured_at: i64,
    /// Dimension-specific diagnostic payload.
    pub details: serde_json::Value,
}

/// The three dimensional scores behind one composite measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub implementation: f64,
    pub interface: f64,
    pub purpose: f64,
}

impl DimensionScores {
    /// Weighted composite: `0.4·implementation + 0.3·interface + 0.3·purpose`.
    pub fn composite(&self) -> f64 {
        crate::constants::WEIGHT_IMPLEMENTATION * self.implementation
            + crate::constants::WEIGHT_INTERFACE * self.interface
            + crate::constants::WEIGHT_PURPOSE * self.purpose
    }
}
