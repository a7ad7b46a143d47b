//! User stories: the declared intent for a component at a point in time.
//!
//! Stories are append-only. Recording a new story inserts a new row; the
//! most recently created row is the component's current story.

use serde::{Deserialize, Serialize};

use super::ids::{ComponentId, StoryId, TouchPointId};

/// Whether a component is meant to be used directly by an end user or only
/// via another component/developer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Engagement {
    Direct,
    Proxy,
}

impl Engagement {
    pub fn as_str(self) -> &'static str {
        match self {
            Engagement::Direct => "direct",
            Engagement::Proxy => "proxy",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "direct" => Some(Engagement::Direct),
            "proxy" => Some(Engagement::Proxy),
            _ => None,
        }
    }
}

impl std::fmt::Display for Engagement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The surface through which a touch point is exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPointType {
    Input,
    Output,
    Interface,
    Event,
}

impl TouchPointType {
    pub fn as_str(self) -> &'static str {
        match self {
            TouchPointType::Input => "input",
            TouchPointType::Output => "output",
            TouchPointType::Interface => "interface",
            TouchPointType::Event => "event",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "input" => Some(TouchPointType::Input),
            "output" => Some(TouchPointType::Output),
            "interface" => Some(TouchPointType::Interface),
            "event" => Some(TouchPointType::Event),
            _ => None,
        }
    }
}

impl std::fmt::Display for TouchPointType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete I/O surface referenced by a story.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: TouchPointId,
    pub story_id: StoryId,
    pub text: String,
    pub touch_type: TouchPointType,
}

/// A persisted story revision with its touch points attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStory {
    pub id: StoryId,
    pub component_id: ComponentId,
    pub story_text: String,
    pub engagement: Engagement,
    pub primitive_value: String,
    pub expression: String,
    pub confidence: f64,
    pub quality: f64,
    pub created_at: i64,
    pub updated_at: i64,
    pub touch_points: Vec<TouchPoint>,
}

/// Raw story fields as produced by the upstream story synthesiser.
///
/// Enumerated fields arrive as text and are validated — never trusted —
/// before a row is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryDraft {
    pub story_text: String,
    pub engagement: String,
    pub primitive_value: String,
    pub expression: String,
    pub confidence: f64,
    pub quality: f64,
    pub touch_points: Vec<TouchPointDraft>,
}

/// One declared touch point within a [`StoryDraft`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TouchPointDraft {
    pub text: String,
    pub touch_type: String,
}
