//! Flag evaluation: map a composite drift score to a leveled flag and keep
//! the one-open-flag-per-component invariant.

use std::sync::Arc;

use vigil_core::errors::DriftError;
use vigil_core::events::{FlagRaisedEvent, FlagResolvedEvent};
use vigil_core::types::ids::{ComponentId, FlagId};
use vigil_core::types::{now_secs, AnalysisType, Flag, FlagLevel};
use vigil_core::AlertDispatcher;
use vigil_storage::queries::{components, flags};
use vigil_storage::DatabaseManager;

use crate::drift::DriftEngine;

pub struct FlagEvaluator {
    db: Arc<DatabaseManager>,
    engine: DriftEngine,
    dispatcher: Arc<AlertDispatcher>,
}

impl FlagEvaluator {
    pub fn new(db: Arc<DatabaseManager>, engine: DriftEngine, dispatcher: Arc<AlertDispatcher>) -> Self {
        Self {
            db,
            engine,
            dispatcher,
        }
    }

    /// Score the component, persist the flag, and dispatch alerts when the
    /// level requires review.
    ///
    /// If the component already carries an unresolved flag, that row is
    /// updated in place — a second open flag is never created, and a `none`
    /// outcome never resolves an existing one. Resolution is always an
    /// explicit, attributed call to [`FlagEvaluator::resolve`].
    pub fn evaluate(
        &self,
        component_id: &ComponentId,
        run_type: AnalysisType,
    ) -> Result<Flag, DriftError> {
        let outcome = self.engine.score(component_id, run_type)?;
        let level = FlagLevel::from_score(outcome.composite);
        let details = serde_json::json!({
            "implementation": outcome.dimension_scores.implementation,
            "interface": outcome.dimension_scores.interface,
            "purpose": outcome.dimension_scores.purpose,
            "missing_story": outcome.missing_story,
        });

        // Read-then-write inside one IMMEDIATE transaction: two concurrent
        // evaluations cannot both conclude "no open flag" (and the schema's
        // partial unique index would reject them if they somehow did).
        let id = component_id.clone();
        let flag = self.db.with_tx(|tx| {
            match flags::unresolved(tx, &id)? {
                Some(existing) => {
                    flags::update_open(tx, &existing.id, level, outcome.composite, &details)?;
                    Ok(Flag {
                        level,
                        drift_score: outcome.composite,
                        details: details.clone(),
                        ..existing
                    })
                }
                None => {
                    let flag = Flag {
                        id: FlagId::generate(),
                        component_id: id.clone(),
                        level,
                        drift_score: outcome.composite,
                        details: details.clone(),
                        flagged_at: now_secs(),
                        resolved_at: None,
                        resolved_by: None,
                    };
                    flags::insert(tx, &flag)?;
                    Ok(flag)
                }
            }
        })?;

        tracing::info!(
            component_id = %component_id,
            level = %flag.level,
            score = flag.drift_score,
            "flag evaluated"
        );

        if level.requires_review() {
            let component_name = self
                .db
                .with_reader(|conn| components::get(conn, component_id))?
                .map(|c| c.name)
                .unwrap_or_default();
            let event = FlagRaisedEvent {
                component_id: component_id.clone(),
                component_name,
                level,
                score: outcome.composite,
                dimension_scores: outcome.dimension_scores,
                details,
            };
            self.dispatcher.dispatch_flag_raised(&event);
        }

        Ok(flag)
    }

    /// Resolve a component's open flag with attribution. Returns false when
    /// there was nothing to resolve.
    pub fn resolve(
        &self,
        component_id: &ComponentId,
        resolved_by: &str,
    ) -> Result<bool, DriftError> {
        let id = component_id.clone();
        let resolved = self
            .db
            .with_tx(|tx| flags::resolve(tx, &id, resolved_by, now_secs()))?;

        if resolved {
            tracing::info!(component_id = %component_id, resolved_by, "flag resolved");
            self.dispatcher.dispatch_flag_resolved(&FlagResolvedEvent {
                component_id: component_id.clone(),
                resolved_by: resolved_by.to_string(),
            });
        }
        Ok(resolved)
    }
}
