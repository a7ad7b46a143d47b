//! Monitor loop: a worker thread draining inbound change events.
//!
//! The loop is the hand-off point between collaborators (file watchers,
//! schedulers) and the scoring pipeline. Per-event failures are logged and
//! never stop the loop; it ends when every sender has disconnected.

use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::Receiver;
use vigil_core::types::ids::ComponentId;
use vigil_core::types::{AnalysisType, ComponentStatus};

use crate::flags::FlagEvaluator;
use crate::registry::{ComponentFilter, Registry};

/// Which component(s) a drift check targets.
#[derive(Debug, Clone)]
pub enum CheckTarget {
    Component(ComponentId),
    All,
}

/// Events consumed from collaborators.
#[derive(Debug, Clone)]
pub enum InboundEvent {
    ComponentRegistered {
        component_id: ComponentId,
    },
    ComponentChanged {
        component_id: ComponentId,
        change_signals: Vec<String>,
    },
    DriftCheckRequested {
        target: CheckTarget,
    },
}

pub struct Monitor {
    registry: Arc<Registry>,
    evaluator: Arc<FlagEvaluator>,
    events: Receiver<InboundEvent>,
}

impl Monitor {
    pub fn new(
        registry: Arc<Registry>,
        evaluator: Arc<FlagEvaluator>,
        events: Receiver<InboundEvent>,
    ) -> Self {
        Self {
            registry,
            evaluator,
            events,
        }
    }

    /// Move the loop onto its own thread.
    pub fn spawn(self) -> JoinHandle<()> {
        std::thread::spawn(move || self.run())
    }

    /// Drain events until all senders disconnect.
    pub fn run(self) {
        for event in self.events.iter() {
            self.handle(event);
        }
        tracing::info!("monitor loop stopped");
    }

    fn handle(&self, event: InboundEvent) {
        match event {
            InboundEvent::ComponentRegistered { component_id } => {
                self.evaluate(&component_id, AnalysisType::Initial);
            }
            InboundEvent::ComponentChanged {
                component_id,
                change_signals,
            } => match self.registry.record_change(&component_id, &change_signals) {
                Ok(_) => self.evaluate(&component_id, AnalysisType::Update),
                Err(e) => {
                    tracing::warn!(component_id = %component_id, error = %e, "change rejected");
                }
            },
            InboundEvent::DriftCheckRequested {
                target: CheckTarget::Component(component_id),
            } => {
                self.evaluate(&component_id, AnalysisType::DriftCheck);
            }
            InboundEvent::DriftCheckRequested {
                target: CheckTarget::All,
            } => self.sweep(),
        }
    }

    /// Scheduled sweep over every component still worth watching.
    fn sweep(&self) {
        let components = match self.registry.list_components(ComponentFilter::default()) {
            Ok(components) => components,
            Err(e) => {
                tracing::warn!(error = %e, "sweep listing failed");
                return;
            }
        };
        for component in components {
            match component.status {
                ComponentStatus::Active | ComponentStatus::Flagged => {
                    self.evaluate(&component.id, AnalysisType::Scheduled);
                }
                ComponentStatus::Deprecated | ComponentStatus::Archived => {}
            }
        }
    }

    fn evaluate(&self, component_id: &ComponentId, run_type: AnalysisType) {
        if let Err(e) = self.evaluator.evaluate(component_id, run_type) {
            tracing::warn!(
                component_id = %component_id,
                run_type = %run_type,
                error = %e,
                "drift evaluation failed"
            );
        }
    }
}
