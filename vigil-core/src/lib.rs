//! vigil-core: shared foundation for the Vigil drift monitor.
//!
//! Domain types, one error enum per subsystem, the alert handler/dispatcher
//! pair, scoring constants, configuration, and tracing setup. No storage or
//! scoring logic lives here.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod trace;
pub mod types;

pub use config::VigilConfig;
pub use errors::{ConfigError, DriftError, HandlerError, RegistryError, StorageError};
pub use events::{AlertDispatcher, AlertHandler, FlagRaisedEvent, FlagResolvedEvent};
pub use types::{
    AnalysisRun, AnalysisType, Component, ComponentKind, ComponentStatus, DimensionScores,
    DriftDimension, DriftMeasurement, Engagement, Flag, FlagLevel, RunStatus, StoryDraft,
    TouchPoint, TouchPointDraft, TouchPointType, UserStory,
};
pub use types::ids::{ComponentId, FlagId, MeasurementId, RunId, StoryId, TouchPointId};
