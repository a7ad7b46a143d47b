use super::StorageError;

/// Errors raised while scoring a component.
///
/// A missing story is NOT an error: the engine records maximal drift
/// instead. Only unknown components and collaborator/storage failures
/// surface here.
#[derive(Debug, thiserror::Error)]
pub enum DriftError {
    #[error("component not found: {id}")]
    ComponentNotFound { id: String },

    #[error("fact extraction failed: {message}")]
    FactExtraction { message: String },

    #[error("similarity model failed: {message}")]
    Similarity { message: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}
