//! Flag evaluation: threshold mapping, update-in-place semantics, explicit
//! resolution, alert dispatch, and handler isolation end to end.

mod common;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use vigil_core::errors::HandlerError;
use vigil_core::events::{AlertDispatcher, AlertHandler, FlagRaisedEvent};
use vigil_core::types::ids::ComponentId;
use vigil_core::types::{AnalysisType, FlagLevel};
use vigil_engine::alerts::{DeploymentGate, MetricsEmitter, ReleaseGate, ReviewRouter};
use vigil_storage::queries::flags;

use common::{draft, observed, stack, stack_with_dispatcher};

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

struct AlwaysPanics;

impl AlertHandler for AlwaysPanics {
    fn name(&self) -> &str {
        "always-panics"
    }
    fn on_flag_raised(&self, _event: &FlagRaisedEvent) -> Result<(), HandlerError> {
        panic!("boom");
    }
}

/// Drive the stub collaborators so the next evaluation lands at roughly the
/// requested composite: 0.4·impl + 0.03 + 0.3·purpose.
fn set_dimensions(stack: &common::TestStack, impl_drift_total: bool, purpose_similarity: f64) {
    if impl_drift_total {
        stack.facts.set(observed(&["unexpected"], 0.5, "does things"));
    } else {
        stack.facts.set(observed(&["api"], 0.5, "does things"));
    }
    stack.similarity.set(purpose_similarity);
}

#[test]
fn missing_story_flags_critical() {
    let stack = stack();
    let id = stack.registry.register("bare", "service", None).unwrap();

    let flag = stack
        .evaluator
        .evaluate(&id, AnalysisType::Initial)
        .unwrap();
    assert_eq!(flag.level, FlagLevel::Critical);
    assert_eq!(flag.drift_score, 1.0);
    assert_eq!(flag.details["missing_story"], true);
}

#[test]
fn drifted_component_raises_critical_and_dispatches() {
    // Scenario B end to end: composite 0.85 -> critical -> dispatch.
    let counting = Arc::new(Counting {
        calls: AtomicUsize::new(0),
    });
    let mut dispatcher = AlertDispatcher::new();
    dispatcher.register(Arc::clone(&counting) as Arc<dyn AlertHandler>);
    let stack = stack_with_dispatcher(dispatcher);

    let id = stack.registry.register("drifted", "service", None).unwrap();
    stack
        .registry
        .record_story(&id, &draft("proxy", &["api"]))
        .unwrap();
    stack.facts.set(observed(&["queue"], 0.1, "moves messages"));
    stack.similarity.set(0.1);

    let flag = stack
        .evaluator
        .evaluate(&id, AnalysisType::DriftCheck)
        .unwrap();
    assert_eq!(flag.level, FlagLevel::Critical);
    assert!(flag.level.requires_review());
    assert!((flag.drift_score - 0.85).abs() < 1e-9);
    assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn aligned_component_flags_none_and_stays_quiet() {
    let counting = Arc::new(Counting {
        calls: AtomicUsize::new(0),
    });
    let mut dispatcher = AlertDispatcher::new();
    dispatcher.register(Arc::clone(&counting) as Arc<dyn AlertHandler>);
    let stack = stack_with_dispatcher(dispatcher);

    let id = stack.registry.register("aligned", "service", None).unwrap();
    stack
        .registry
        .record_story(&id, &draft("direct", &["api"]))
        .unwrap();
    set_dimensions(&stack, false, 0.9);

    let flag = stack
        .evaluator
        .evaluate(&id, AnalysisType::DriftCheck)
        .unwrap();
    assert_eq!(flag.level, FlagLevel::None);
    assert_eq!(counting.calls.load(Ordering::SeqCst), 0, "no review, no dispatch");
}

#[test]
fn improving_scores_update_the_open_flag_in_place() {
    // Scenario C: a significant flag followed by a better evaluation ends
    // as the same row at minor, still unresolved.
    let stack = stack();
    let id = stack.registry.register("improving", "service", None).unwrap();
    stack
        .registry
        .record_story(&id, &draft("direct", &["api"]))
        .unwrap();

    // 0.4·1.0 + 0.03 + 0.3·1.0 = 0.73 -> significant
    set_dimensions(&stack, true, 0.0);
    let first = stack
        .evaluator
        .evaluate(&id, AnalysisType::DriftCheck)
        .unwrap();
    assert_eq!(first.level, FlagLevel::Significant);

    // 0.4·0.0 + 0.03 + 0.3·1.0 = 0.33 -> minor
    set_dimensions(&stack, false, 0.0);
    let second = stack
        .evaluator
        .evaluate(&id, AnalysisType::DriftCheck)
        .unwrap();
    assert_eq!(second.level, FlagLevel::Minor);
    assert_eq!(second.id, first.id, "same row, updated in place");
    assert!(second.resolved_at.is_none());

    let total = stack
        .db
        .with_reader(|conn| flags::count_for_component(conn, &id))
        .unwrap();
    assert_eq!(total, 1);
}

#[test]
fn none_outcome_never_auto_resolves() {
    let stack = stack();
    let id = stack.registry.register("flapping", "service", None).unwrap();
    stack
        .registry
        .record_story(&id, &draft("direct", &["api"]))
        .unwrap();

    set_dimensions(&stack, true, 0.0);
    stack
        .evaluator
        .evaluate(&id, AnalysisType::DriftCheck)
        .unwrap();

    // a clean measurement arrives; the flag must stay open
    set_dimensions(&stack, false, 0.9);
    let flag = stack
        .evaluator
        .evaluate(&id, AnalysisType::DriftCheck)
        .unwrap();
    assert_eq!(flag.level, FlagLevel::None);
    assert!(flag.resolved_at.is_none());

    let open = stack
        .db
        .with_reader(|conn| flags::unresolved(conn, &id))
        .unwrap();
    assert!(open.is_some(), "resolution requires an explicit reviewer");
}

#[test]
fn resolve_then_reflag_creates_a_second_row() {
    let stack = stack();
    let id = stack.registry.register("cycled", "service", None).unwrap();

    stack
        .evaluator
        .evaluate(&id, AnalysisType::Initial)
        .unwrap();
    assert!(stack.evaluator.resolve(&id, "reviewer@team").unwrap());
    assert!(!stack.evaluator.resolve(&id, "reviewer@team").unwrap());

    stack
        .evaluator
        .evaluate(&id, AnalysisType::DriftCheck)
        .unwrap();
    let total = stack
        .db
        .with_reader(|conn| flags::count_for_component(conn, &id))
        .unwrap();
    assert_eq!(total, 2, "history preserved across resolution");

    let open = stack
        .db
        .with_reader(|conn| flags::unresolved(conn, &id))
        .unwrap()
        .unwrap();
    assert!(open.resolved_at.is_none());
}

#[test]
fn handler_failures_do_not_fail_evaluate() {
    let counting = Arc::new(Counting {
        calls: AtomicUsize::new(0),
    });
    let mut dispatcher = AlertDispatcher::new();
    dispatcher.register(Arc::new(AlwaysPanics));
    dispatcher.register(Arc::clone(&counting) as Arc<dyn AlertHandler>);
    let stack = stack_with_dispatcher(dispatcher);

    let id = stack.registry.register("noisy", "service", None).unwrap();
    let flag = stack
        .evaluator
        .evaluate(&id, AnalysisType::Initial)
        .unwrap();

    assert_eq!(flag.level, FlagLevel::Critical);
    assert_eq!(
        counting.calls.load(Ordering::SeqCst),
        1,
        "second handler still ran"
    );
}

#[test]
fn review_router_and_deployment_gate_roles() {
    struct Latch {
        blocked: AtomicBool,
    }
    impl ReleaseGate for Latch {
        fn block(&self, _id: &ComponentId, _reason: &str) -> Result<(), HandlerError> {
            self.blocked.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    let (tx, rx) = crossbeam_channel::unbounded();
    let latch = Arc::new(Latch {
        blocked: AtomicBool::new(false),
    });

    let mut dispatcher = AlertDispatcher::new();
    dispatcher.register(Arc::new(ReviewRouter::new(tx)));
    dispatcher.register(Arc::new(DeploymentGate::new(
        Arc::clone(&latch) as Arc<dyn ReleaseGate>
    )));
    dispatcher.register(Arc::new(MetricsEmitter));
    let stack = stack_with_dispatcher(dispatcher);

    // significant: routed for review, gate untouched
    let id = stack.registry.register("review-me", "service", None).unwrap();
    stack
        .registry
        .record_story(&id, &draft("direct", &["api"]))
        .unwrap();
    set_dimensions(&stack, true, 0.0); // 0.73 -> significant
    stack
        .evaluator
        .evaluate(&id, AnalysisType::DriftCheck)
        .unwrap();

    let ticket = rx.try_recv().expect("review ticket expected");
    assert_eq!(ticket.component_id, id);
    assert_eq!(ticket.level, FlagLevel::Significant);
    assert!(ticket.summary.contains("review-me"));
    assert!(!latch.blocked.load(Ordering::SeqCst));

    // critical: gate trips
    let bare = stack.registry.register("block-me", "service", None).unwrap();
    stack
        .evaluator
        .evaluate(&bare, AnalysisType::Initial)
        .unwrap();
    assert!(latch.blocked.load(Ordering::SeqCst));
    assert_eq!(rx.try_recv().unwrap().level, FlagLevel::Critical);
}

#[test]
fn concurrent_evaluation_keeps_one_open_flag() {
    use std::sync::Barrier;
    use std::thread;
    use vigil_storage::DatabaseManager;

    let dir = tempfile::TempDir::new().unwrap();
    let db = Arc::new(DatabaseManager::open(&dir.path().join("vigil.db")).unwrap());
    let stack = common::stack_on(Arc::clone(&db), AlertDispatcher::new());

    let id = stack.registry.register("contended", "service", None).unwrap();
    stack
        .registry
        .record_story(&id, &draft("direct", &["api"]))
        .unwrap();

    let barrier = Arc::new(Barrier::new(6));
    let handles: Vec<_> = (0..6)
        .map(|_| {
            let evaluator = Arc::clone(&stack.evaluator);
            let id = id.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..10 {
                    evaluator.evaluate(&id, AnalysisType::DriftCheck).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let total = stack
        .db
        .with_reader(|conn| flags::count_for_component(conn, &id))
        .unwrap();
    assert_eq!(total, 1, "sixty concurrent evaluations, one flag row");
}
