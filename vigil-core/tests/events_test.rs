//! Dispatcher isolation tests: failing and panicking handlers must not
//! starve later handlers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use vigil_core::errors::HandlerError;
use vigil_core::events::{AlertDispatcher, AlertHandler, FlagRaisedEvent};
use vigil_core::types::ids::ComponentId;
use vigil_core::types::{DimensionScores, FlagLevel};

struct Counting {
    calls: AtomicUsize,
}

impl AlertHandler for Counting {
    fn name(&self) -> &str {
        "counting"
    }

    fn on_flag_raised(&self, _event: &FlagRaisedEvent) -> Result<(), HandlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct AlwaysFails;

impl AlertHandler for AlwaysFails {
    fn name(&self) -> &str {
        "always-fails"
    }

    fn on_flag_raised(&self, _event: &FlagRaisedEvent) -> Result<(), HandlerError> {
        Err(HandlerError::Failed {
            handler: "always-fails".to_string(),
            message: "refused".to_string(),
        })
    }
}

struct AlwaysPanics;

impl AlertHandler for AlwaysPanics {
    fn name(&self) -> &str {
        "always-panics"
    }

    fn on_flag_raised(&self, _event: &FlagRaisedEvent) -> Result<(), HandlerError> {
        panic!("handler exploded");
    }
}

fn sample_event() -> FlagRaisedEvent {
    FlagRaisedEvent {
        component_id: ComponentId::generate(),
        component_name: "payments".to_string(),
        level: FlagLevel::Critical,
        score: 0.85,
        dimension_scores: DimensionScores {
            implementation: 1.0,
            interface: 0.6,
            purpose: 0.9,
        },
        details: serde_json::json!({}),
    }
}

#[test]
fn failing_handler_does_not_block_later_handlers() {
    let counting = Arc::new(Counting {
        calls: AtomicUsize::new(0),
    });

    let mut dispatcher = AlertDispatcher::new();
    dispatcher.register(Arc::new(AlwaysFails));
    dispatcher.register(Arc::clone(&counting) as Arc<dyn AlertHandler>);

    dispatcher.dispatch_flag_raised(&sample_event());
    assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn panicking_handler_does_not_block_later_handlers() {
    let counting = Arc::new(Counting {
        calls: AtomicUsize::new(0),
    });

    let mut dispatcher = AlertDispatcher::new();
    dispatcher.register(Arc::new(AlwaysPanics));
    dispatcher.register(Arc::clone(&counting) as Arc<dyn AlertHandler>);

    dispatcher.dispatch_flag_raised(&sample_event());
    assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn handlers_run_once_per_dispatch() {
    let counting = Arc::new(Counting {
        calls: AtomicUsize::new(0),
    });

    let mut dispatcher = AlertDispatcher::new();
    dispatcher.register(Arc::clone(&counting) as Arc<dyn AlertHandler>);
    assert_eq!(dispatcher.handler_count(), 1);

    dispatcher.dispatch_flag_raised(&sample_event());
    dispatcher.dispatch_flag_raised(&sample_event());
    assert_eq!(counting.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn empty_dispatcher_is_a_no_op() {
    let dispatcher = AlertDispatcher::new();
    assert_eq!(dispatcher.handler_count(), 0);
    dispatcher.dispatch_flag_raised(&sample_event());
}
