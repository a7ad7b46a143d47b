//! Alert events: handler trait, dispatcher, and payload types.
//! Synchronous dispatch with per-handler failure isolation.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::AlertDispatcher;
pub use handler::AlertHandler;
pub use types::{FlagRaisedEvent, FlagResolvedEvent};
