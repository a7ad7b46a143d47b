/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("constraint violated: {message}")]
    ConstraintViolation { message: String },

    #[error("storage timeout: {message}")]
    Timeout { message: String },

    #[error("stored row is corrupt: {details}")]
    Corrupt { details: String },
}
