//! Component registry: CRUD + query façade over storage.
//!
//! Owns id generation and the component lifecycle. Every component
//! mutation in the system goes through this type.

mod validation;

use std::sync::Arc;

use vigil_core::errors::RegistryError;
use vigil_core::types::ids::{ComponentId, StoryId, TouchPointId};
use vigil_core::types::{
    now_secs, AnalysisRun, Component, ComponentKind, ComponentStatus, DriftDimension,
    DriftMeasurement, Flag, FlagLevel, StoryDraft, TouchPoint, UserStory,
};
use vigil_storage::queries::views::{AttentionRow, KindCoverage};
use vigil_storage::queries::{analysis_log, components, drift_metrics, flags, stories, views};
use vigil_storage::DatabaseManager;

/// AND-combined filter for component listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentFilter {
    pub kind: Option<ComponentKind>,
    pub status: Option<ComponentStatus>,
}

/// Story coverage across the registry.
#[derive(Debug, Clone)]
pub struct CoverageStats {
    pub by_kind: Vec<KindCoverage>,
    pub total_components: i64,
    pub analyzed_components: i64,
    pub overall_coverage_pct: f64,
}

pub struct Registry {
    db: Arc<DatabaseManager>,
}

impl Registry {
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    /// Register a new component in status `active`.
    ///
    /// The initial drift analysis is not run here: registration hands off
    /// to whoever consumes the `component_registered` event.
    pub fn register(
        &self,
        name: &str,
        kind: &str,
        file_path: Option<&str>,
    ) -> Result<ComponentId, RegistryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::Validation {
                field: "name",
                reason: "must not be empty".to_string(),
            });
        }
        let kind = ComponentKind::parse(kind).ok_or_else(|| RegistryError::Validation {
            field: "kind",
            reason: format!("must be agent, module, service, or utility, got \"{kind}\""),
        })?;

        let component = Component {
            id: ComponentId::generate(),
            name: name.to_string(),
            kind,
            file_path: file_path.map(str::to_string),
            created_at: now_secs(),
            last_analyzed: None,
            status: ComponentStatus::Active,
        };
        self.db
            .with_writer(|conn| components::insert(conn, &component))?;

        tracing::info!(component_id = %component.id, name, kind = %kind, "registered component");
        Ok(component.id)
    }

    /// Record a new story revision plus its touch points, atomically.
    pub fn record_story(
        &self,
        component_id: &ComponentId,
        draft: &StoryDraft,
    ) -> Result<StoryId, RegistryError> {
        let validated = validation::validate_story(draft)?;
        self.require_component(component_id)?;

        let now = now_secs();
        let story_id = StoryId::generate();
        let touch_points = validated
            .touch_points
            .into_iter()
            .map(|(text, touch_type)| TouchPoint {
                id: TouchPointId::generate(),
                story_id: story_id.clone(),
                text,
                touch_type,
            })
            .collect();
        let story = UserStory {
            id: story_id.clone(),
            component_id: component_id.clone(),
            story_text: validated.story_text,
            engagement: validated.engagement,
            primitive_value: validated.primitive_value,
            expression: validated.expression,
            confidence: validated.confidence,
            quality: validated.quality,
            created_at: now,
            updated_at: now,
            touch_points,
        };

        // Story row, touch point rows, and the last_analyzed bump land in
        // one transaction: all or none.
        self.db.with_tx(|tx| {
            stories::insert_story(tx, &story)?;
            components::touch_last_analyzed(tx, component_id, now)?;
            Ok(())
        })?;

        tracing::info!(
            component_id = %component_id,
            story_id = %story_id,
            touch_points = story.touch_points.len(),
            "recorded story"
        );
        Ok(story_id)
    }

    /// The most recently created story for a component, if any.
    pub fn current_story(
        &self,
        component_id: &ComponentId,
    ) -> Result<Option<UserStory>, RegistryError> {
        Ok(self
            .db
            .with_reader(|conn| stories::current_story(conn, component_id))?)
    }

    /// Change a component's status, enforcing the transition rules.
    pub fn set_status(
        &self,
        component_id: &ComponentId,
        status: ComponentStatus,
    ) -> Result<(), RegistryError> {
        let current = self.require_component(component_id)?;
        if !current.status.can_transition(status) {
            return Err(RegistryError::InvalidTransition {
                from: current.status,
                to: status,
            });
        }

        // Re-check under the write lock: a concurrent transition must not
        // slip in between the check above and the update.
        let changed = self.db.with_tx(|tx| {
            match components::get(tx, component_id)? {
                Some(c) if c.status.can_transition(status) => {
                    components::update_status(tx, component_id, status)?;
                    Ok(true)
                }
                _ => Ok(false),
            }
        })?;
        if !changed {
            let fresh = self.require_component(component_id)?;
            return Err(RegistryError::InvalidTransition {
                from: fresh.status,
                to: status,
            });
        }

        tracing::info!(component_id = %component_id, status = %status, "status changed");
        Ok(())
    }

    /// List components, filters ANDed, ordered by name.
    pub fn list_components(&self, filter: ComponentFilter) -> Result<Vec<Component>, RegistryError> {
        Ok(self
            .db
            .with_reader(|conn| components::list(conn, filter.kind, filter.status))?)
    }

    /// Fetch one component.
    pub fn component(&self, component_id: &ComponentId) -> Result<Option<Component>, RegistryError> {
        Ok(self.db.with_reader(|conn| components::get(conn, component_id))?)
    }

    /// Every component registered against a source path.
    pub fn components_by_path(&self, path: &str) -> Result<Vec<Component>, RegistryError> {
        Ok(self.db.with_reader(|conn| components::get_by_path(conn, path))?)
    }

    /// Acknowledge an observed change to a component. Validates existence
    /// and returns the component so the caller can score it.
    pub fn record_change(
        &self,
        component_id: &ComponentId,
        change_signals: &[String],
    ) -> Result<Component, RegistryError> {
        let component = self.require_component(component_id)?;
        tracing::debug!(
            component_id = %component_id,
            signals = change_signals.len(),
            "change recorded"
        );
        Ok(component)
    }

    /// Story coverage per kind plus the overall ratio.
    pub fn coverage_stats(&self) -> Result<CoverageStats, RegistryError> {
        let by_kind = self.db.with_reader(views::coverage)?;
        let total_components: i64 = by_kind.iter().map(|row| row.total).sum();
        let analyzed_components: i64 = by_kind.iter().map(|row| row.analyzed).sum();
        let overall_coverage_pct = if total_components > 0 {
            analyzed_components as f64 * 100.0 / total_components as f64
        } else {
            0.0
        };
        Ok(CoverageStats {
            by_kind,
            total_components,
            analyzed_components,
            overall_coverage_pct,
        })
    }

    /// Components needing a human, ordered by severity then score.
    pub fn requiring_attention(&self) -> Result<Vec<AttentionRow>, RegistryError> {
        Ok(self.db.with_reader(views::requiring_attention)?)
    }

    /// Recent drift measurements for a component, newest first.
    pub fn drift_history(
        &self,
        component_id: &ComponentId,
        dimension: Option<DriftDimension>,
        limit: usize,
    ) -> Result<Vec<DriftMeasurement>, RegistryError> {
        Ok(self
            .db
            .with_reader(|conn| drift_metrics::recent(conn, component_id, dimension, limit))?)
    }

    /// Unresolved flags with their components, optionally filtered by level.
    pub fn flagged_components(
        &self,
        level: Option<FlagLevel>,
    ) -> Result<Vec<(Component, Flag)>, RegistryError> {
        let open = self.db.with_reader(|conn| flags::list_unresolved(conn, level))?;
        let mut result = Vec::with_capacity(open.len());
        for flag in open {
            if let Some(component) = self
                .db
                .with_reader(|conn| components::get(conn, &flag.component_id))?
            {
                result.push((component, flag));
            }
        }
        Ok(result)
    }

    /// Analysis runs still `running` past the staleness cutoff.
    pub fn stale_runs(&self, timeout_secs: u64) -> Result<Vec<AnalysisRun>, RegistryError> {
        let cutoff = now_secs() - timeout_secs as i64;
        Ok(self.db.with_reader(|conn| analysis_log::stale(conn, cutoff))?)
    }

    fn require_component(&self, component_id: &ComponentId) -> Result<Component, RegistryError> {
        self.db
            .with_reader(|conn| components::get(conn, component_id))?
            .ok_or_else(|| not_found(component_id))
    }
}

fn not_found(component_id: &ComponentId) -> RegistryError {
    RegistryError::NotFound {
        entity: "component",
        id: component_id.to_string(),
    }
}
