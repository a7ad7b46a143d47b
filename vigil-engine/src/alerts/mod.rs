//! Standard alert handler roles: review routing, deployment gating, and
//! metrics emission. Each is a thin adapter between the dispatcher and an
//! external collaborator.

use std::sync::Arc;

use crossbeam_channel::Sender;
use vigil_core::errors::HandlerError;
use vigil_core::events::{FlagRaisedEvent, FlagResolvedEvent};
use vigil_core::types::ids::ComponentId;
use vigil_core::types::FlagLevel;
use vigil_core::AlertHandler;

/// What the review router pushes into the external review inbox.
#[derive(Debug, Clone)]
pub struct ReviewTicket {
    pub component_id: ComponentId,
    pub component_name: String,
    pub level: FlagLevel,
    pub summary: String,
    pub details: serde_json::Value,
}

/// Forwards review-worthy flags into a review queue.
pub struct ReviewRouter {
    queue: Sender<ReviewTicket>,
}

impl ReviewRouter {
    pub fn new(queue: Sender<ReviewTicket>) -> Self {
        Self { queue }
    }
}

impl AlertHandler for ReviewRouter {
    fn name(&self) -> &str {
        "review-router"
    }

    fn on_flag_raised(&self, event: &FlagRaisedEvent) -> Result<(), HandlerError> {
        let ticket = ReviewTicket {
            component_id: event.component_id.clone(),
            component_name: event.component_name.clone(),
            level: event.level,
            summary: format!(
                "{} drifted to {:.2} ({})",
                event.component_name, event.score, event.level
            ),
            details: event.details.clone(),
        };
        self.queue.send(ticket).map_err(|_| HandlerError::Failed {
            handler: "review-router".to_string(),
            message: "review queue disconnected".to_string(),
        })
    }
}

/// An external release-gating collaborator.
pub trait ReleaseGate: Send + Sync {
    fn block(&self, component_id: &ComponentId, reason: &str) -> Result<(), HandlerError>;
}

/// Signals the release gate to block — on critical flags only.
pub struct DeploymentGate {
    gate: Arc<dyn ReleaseGate>,
}

impl DeploymentGate {
    pub fn new(gate: Arc<dyn ReleaseGate>) -> Self {
        Self { gate }
    }
}

impl AlertHandler for DeploymentGate {
    fn name(&self) -> &str {
        "deployment-gate"
    }

    fn on_flag_raised(&self, event: &FlagRaisedEvent) -> Result<(), HandlerError> {
        if event.level != FlagLevel::Critical {
            return Ok(());
        }
        self.gate.block(
            &event.component_id,
            &format!("critical drift {:.2}", event.score),
        )
    }
}

/// Emits flag telemetry as structured tracing events under the
/// `vigil::telemetry` target.
pub struct MetricsEmitter;

impl AlertHandler for MetricsEmitter {
    fn name(&self) -> &str {
        "metrics"
    }

    fn on_flag_raised(&self, event: &FlagRaisedEvent) -> Result<(), HandlerError> {
        tracing::info!(
            target: "vigil::telemetry",
            component_id = %event.component_id,
            level = event.level.as_str(),
            score = event.score,
            implementation = event.dimension_scores.implementation,
            interface = event.dimension_scores.interface,
            purpose = event.dimension_scores.purpose,
            "drift flag raised"
        );
        Ok(())
    }

    fn on_flag_resolved(&self, event: &FlagResolvedEvent) -> Result<(), HandlerError> {
        tracing::info!(
            target: "vigil::telemetry",
            component_id = %event.component_id,
            resolved_by = event.resolved_by,
            "drift flag resolved"
        );
        Ok(())
    }
}
