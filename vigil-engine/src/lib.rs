//! vigil-engine: the stateful drift-monitoring service.
//!
//! - Registry: CRUD + query façade over storage; owns id generation and
//!   component lifecycle transitions.
//! - DriftEngine: composite drift score from three dimension analyzers.
//! - FlagEvaluator: threshold mapping, one-open-flag persistence, dispatch.
//! - Alert roles: review routing, deployment gating, metrics emission.
//! - Monitor: worker loop consuming inbound change events.

pub mod alerts;
pub mod drift;
pub mod flags;
pub mod monitor;
pub mod registry;

pub use drift::{DriftEngine, FactSource, ObservedFacts, ScoreOutcome, SimilarityModel};
pub use flags::FlagEvaluator;
pub use monitor::{CheckTarget, InboundEvent, Monitor};
pub use registry::{ComponentFilter, CoverageStats, Registry};
