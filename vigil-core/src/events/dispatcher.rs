//! AlertDispatcher — synchronous dispatch over an explicit handler list.

use std::sync::Arc;

use crate::errors::HandlerError;

use super::handler::AlertHandler;
use super::types::{FlagRaisedEvent, FlagResolvedEvent};

/// Owns the list of registered alert handlers.
///
/// Constructed once at process start and shared by handle; there is no
/// process-wide registration table. Handlers run in registration order and
/// are isolated from each other: an error is logged as a [`HandlerError`]
/// and a panic is caught, neither stops later handlers nor fails the
/// evaluation that raised the flag.
pub struct AlertDispatcher {
    handlers: Vec<Arc<dyn AlertHandler>>,
}

impl AlertDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register a handler. Order of registration is dispatch order.
    pub fn register(&mut self, handler: Arc<dyn AlertHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Deliver a raised flag to every handler.
    pub fn dispatch_flag_raised(&self, event: &FlagRaisedEvent) {
        self.emit(|h| h.on_flag_raised(event));
    }

    /// Deliver a resolution to every handler.
    pub fn dispatch_flag_resolved(&self, event: &FlagResolvedEvent) {
        self.emit(|h| h.on_flag_resolved(event));
    }

    fn emit<F: Fn(&dyn AlertHandler) -> Result<(), HandlerError>>(&self, f: F) {
        for handler in &self.handlers {
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref())
            }));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!(handler = handler.name(), error = %e, "alert handler failed");
                }
                Err(_) => {
                    let e = HandlerError::Panicked {
                        handler: handler.name().to_string(),
                    };
                    tracing::warn!(handler = handler.name(), error = %e, "alert handler panicked");
                }
            }
        }
    }
}

impl Default for AlertDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
