//! Drift scoring: three dimension analyzers plus the weighted composite.
//!
//! A component with no current story is not an error case — the absence of
//! declared intent is itself the worst form of drift, so every dimension
//! records the maximal score and downstream flagging proceeds normally.

mod facts;
mod implementation;
mod interface;
mod purpose;

pub use facts::{FactSource, ObservedFacts, SimilarityModel};

use std::sync::Arc;

use vigil_core::constants::MAX_DRIFT;
use vigil_core::errors::DriftError;
use vigil_core::types::ids::{ComponentId, MeasurementId};
use vigil_core::types::{
    now_secs, AnalysisRun, AnalysisType, Component, DimensionScores, DriftDimension,
    DriftMeasurement,
};
use vigil_storage::queries::{analysis_log, components, drift_metrics, stories};
use vigil_storage::DatabaseManager;

/// The persisted result of one scoring pass.
#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    /// The four measurements written: implementation, interface, purpose,
    /// composite — in that order.
    pub measurements: Vec<DriftMeasurement>,
    pub dimension_scores: DimensionScores,
    pub composite: f64,
    /// True when the component had no current story and was scored at
    /// maximal drift across the board.
    pub missing_story: bool,
}

pub struct DriftEngine {
    db: Arc<DatabaseManager>,
    facts: Arc<dyn FactSource>,
    similarity: Arc<dyn SimilarityModel>,
}

impl DriftEngine {
    pub fn new(
        db: Arc<DatabaseManager>,
        facts: Arc<dyn FactSource>,
        similarity: Arc<dyn SimilarityModel>,
    ) -> Self {
        Self {
            db,
            facts,
            similarity,
        }
    }

    /// Score a component against its current story and persist all four
    /// measurements. Every call is bracketed by an analysis_log run.
    pub fn score(
        &self,
        component_id: &ComponentId,
        run_type: AnalysisType,
    ) -> Result<ScoreOutcome, DriftError> {
        let component = self
            .db
            .with_reader(|conn| components::get(conn, component_id))?
            .ok_or_else(|| DriftError::ComponentNotFound {
                id: component_id.to_string(),
            })?;

        let run = AnalysisRun::started(component_id.clone(), run_type);
        self.db
            .with_writer(|conn| analysis_log::insert_start(conn, &run))?;

        match self.score_component(&component) {
            Ok(outcome) => {
                let result = serde_json::json!({
                    "composite": outcome.composite,
                    "implementation": outcome.dimension_scores.implementation,
                    "interface": outcome.dimension_scores.interface,
                    "purpose": outcome.dimension_scores.purpose,
                    "missing_story": outcome.missing_story,
                });
                self.db.with_writer(|conn| {
                    analysis_log::complete(conn, &run.id, now_secs(), &result)
                })?;
                tracing::info!(
                    component_id = %component_id,
                    composite = outcome.composite,
                    missing_story = outcome.missing_story,
                    "scored component"
                );
                Ok(outcome)
            }
            Err(e) => {
                // Best effort: the caller gets the scoring error even if
                // the log update fails too.
                let _ = self
                    .db
                    .with_writer(|conn| analysis_log::fail(conn, &run.id, now_secs(), &e.to_string()));
                Err(e)
            }
        }
    }

    fn score_component(&self, component: &Component) -> Result<ScoreOutcome, DriftError> {
        let story = self
            .db
            .with_reader(|conn| stories::current_story(conn, &component.id))?;

        let (scores, details, missing_story) = match story {
            None => {
                let reason = serde_json::json!({ "reason": "missing_story" });
                (
                    DimensionScores {
                        implementation: MAX_DRIFT,
                        interface: MAX_DRIFT,
                        purpose: MAX_DRIFT,
                    },
                    [reason.clone(), reason.clone(), reason],
                    true,
                )
            }
            Some(story) => {
                let facts = self.facts.observe(component)?;
                let (impl_score, impl_details) = implementation::score(&story, &facts);
                let (iface_score, iface_details) =
                    interface::score(story.engagement, facts.interface_complexity);
                let (purpose_score, purpose_details) = purpose::score(
                    self.similarity.as_ref(),
                    &facts.purpose_summary,
                    &story.primitive_value,
                )?;
                (
                    DimensionScores {
                        implementation: impl_score,
                        interface: iface_score,
                        purpose: purpose_score,
                    },
                    [impl_details, iface_details, purpose_details],
                    false,
                )
            }
        };

        let composite = scores.composite();
        let measured_at = now_secs();
        let [impl_details, iface_details, purpose_details] = details;
        let composite_details = serde_json::json!({
            "implementation": scores.implementation,
            "interface": scores.interface,
            "purpose": scores.purpose,
            "missing_story": missing_story,
        });

        let measurements = vec![
            measurement(
                component,
                DriftDimension::Implementation,
                scores.implementation,
                measured_at,
                impl_details,
            ),
            measurement(
                component,
                DriftDimension::Interface,
                scores.interface,
                measured_at,
                iface_details,
            ),
            measurement(
                component,
                DriftDimension::Purpose,
                scores.purpose,
                measured_at,
                purpose_details,
            ),
            measurement(
                component,
                DriftDimension::Composite,
                composite,
                measured_at,
                composite_details,
            ),
        ];

        // All four rows land in one transaction.
        self.db.with_tx(|tx| {
            for m in &measurements {
                drift_metrics::insert(tx, m)?;
            }
            components::touch_last_analyzed(tx, &component.id, measured_at)?;
            Ok(())
        })?;

        Ok(ScoreOutcome {
            measurements,
            dimension_scores: scores,
            composite,
            missing_story,
        })
    }
}

fn measurement(
    component: &Component,
    dimension: DriftDimension,
    score: f64,
    measured_at: i64,
    details: serde_json::Value,
) -> DriftMeasurement {
    DriftMeasurement {
        id: MeasurementId::generate(),
        component_id: component.id.clone(),
        score,
        dimension,
        measured_at,
        details,
    }
}
