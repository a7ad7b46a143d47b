//! Components under observation and their lifecycle.

use serde::{Deserialize, Serialize};

use super::ids::ComponentId;

/// What kind of unit a component is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Agent,
    Module,
    Service,
    Utility,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 4] = [
        ComponentKind::Agent,
        ComponentKind::Module,
        ComponentKind::Service,
        ComponentKind::Utility,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Agent => "agent",
            ComponentKind::Module => "module",
            ComponentKind::Service => "service",
            ComponentKind::Utility => "utility",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "agent" => Some(ComponentKind::Agent),
            "module" => Some(ComponentKind::Module),
            "service" => Some(ComponentKind::Service),
            "utility" => Some(ComponentKind::Utility),
            _ => None,
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Component lifecycle status.
///
/// Transitions are one-directional except `active` <-> `flagged`;
/// `archived` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    Active,
    Deprecated,
    Flagged,
    Archived,
}

impl ComponentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentStatus::Active => "active",
            ComponentStatus::Deprecated => "deprecated",
            ComponentStatus::Flagged => "flagged",
            ComponentStatus::Archived => "archived",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(ComponentStatus::Active),
            "deprecated" => Some(ComponentStatus::Deprecated),
            "flagged" => Some(ComponentStatus::Flagged),
            "archived" => Some(ComponentStatus::Archived),
            _ => None,
        }
    }

    /// Whether moving from `self` to `to` is a legal transition.
    /// Re-asserting the current status is a permitted no-op.
    pub fn can_transition(self, to: ComponentStatus) -> bool {
        use ComponentStatus::*;
        if self == to {
            return true;
        }
        match (self, to) {
            (Archived, _) => false,
            (Active, Flagged) | (Flagged, Active) => true,
            (Active, Deprecated) | (Active, Archived) => true,
            (Flagged, Deprecated) | (Flagged, Archived) => true,
            (Deprecated, Archived) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered component. Owned by the registry; mutated only through it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    pub kind: ComponentKind,
    /// Source-file locator, when the component maps to a file.
    pub file_path: Option<String>,
    pub created_at: i64,
    /// Last time a story was recorded or drift was scored. None until then.
    pub last_analyzed: Option<i64>,
    pub status: ComponentStatus,
}
