use crate::types::ComponentStatus;

use super::StorageError;

/// Errors raised by the component registry.
///
/// Validation and not-found errors fail the triggering call before any
/// write; storage errors propagate unchanged.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("validation failed for {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: ComponentStatus,
        to: ComponentStatus,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}
