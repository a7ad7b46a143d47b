//! Error handling for Vigil.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod drift_error;
pub mod handler_error;
pub mod registry_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use drift_error::DriftError;
pub use handler_error::HandlerError;
pub use registry_error::RegistryError;
pub use storage_error::StorageError;
