use crate::errors::HandlerError;

use super::types::{FlagRaisedEvent, FlagResolvedEvent};

/// Trait for downstream alert handlers (review routing, deployment gating,
/// metrics emission, ...).
///
/// Methods have no-op defaults so handlers only implement the events they
/// care about. `Send + Sync` because flags may be raised from the monitor
/// thread as well as from direct callers.
pub trait AlertHandler: Send + Sync {
    /// Name used in logs when this handler fails.
    fn name(&self) -> &str;

    /// A flag crossed the review threshold (significant or critical).
    fn on_flag_raised(&self, _event: &FlagRaisedEvent) -> Result<(), HandlerError> {
        Ok(())
    }

    /// An open flag was explicitly resolved.
    fn on_flag_resolved(&self, _event: &FlagResolvedEvent) -> Result<(), HandlerError> {
        Ok(())
    }
}
