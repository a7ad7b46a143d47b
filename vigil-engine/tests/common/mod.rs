//! Shared test fixtures: stub collaborators and a fully wired stack over an
//! in-memory database.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use vigil_core::errors::DriftError;
use vigil_core::types::{Component, StoryDraft, TouchPointDraft};
use vigil_core::AlertDispatcher;
use vigil_engine::{DriftEngine, FactSource, FlagEvaluator, ObservedFacts, Registry, SimilarityModel};
use vigil_storage::DatabaseManager;

/// A fact source whose answer can be swapped mid-test.
pub struct StubFacts {
    facts: Mutex<ObservedFacts>,
}

impl StubFacts {
    pub fn new(facts: ObservedFacts) -> Self {
        Self {
            facts: Mutex::new(facts),
        }
    }

    pub fn set(&self, facts: ObservedFacts) {
        *self.facts.lock().unwrap() = facts;
    }
}

impl FactSource for StubFacts {
    fn observe(&self, _component: &Component) -> Result<ObservedFacts, DriftError> {
        Ok(self.facts.lock().unwrap().clone())
    }
}

/// A similarity model returning a settable constant.
pub struct StubSimilarity {
    value: Mutex<f64>,
}

impl StubSimilarity {
    pub fn new(value: f64) -> Self {
        Self {
            value: Mutex::new(value),
        }
    }

    pub fn set(&self, value: f64) {
        *self.value.lock().unwrap() = value;
    }
}

impl SimilarityModel for StubSimilarity {
    fn similarity(&self, _left: &str, _right: &str) -> Result<f64, DriftError> {
        Ok(*self.value.lock().unwrap())
    }
}

pub struct TestStack {
    pub db: Arc<DatabaseManager>,
    pub registry: Arc<Registry>,
    pub engine: DriftEngine,
    pub evaluator: Arc<FlagEvaluator>,
    pub facts: Arc<StubFacts>,
    pub similarity: Arc<StubSimilarity>,
}

/// Wire the whole pipeline over an in-memory database with stub
/// collaborators and the given dispatcher.
pub fn stack_with_dispatcher(dispatcher: AlertDispatcher) -> TestStack {
    let db = Arc::new(DatabaseManager::open_in_memory().unwrap());
    stack_on(db, dispatcher)
}

/// Same, over an explicit database (file-backed for concurrency tests).
pub fn stack_on(db: Arc<DatabaseManager>, dispatcher: AlertDispatcher) -> TestStack {
    let facts = Arc::new(StubFacts::new(observed(&["api"], 0.5, "does things")));
    let similarity = Arc::new(StubSimilarity::new(0.5));
    let dispatcher = Arc::new(dispatcher);

    let registry = Arc::new(Registry::new(Arc::clone(&db)));
    let engine = DriftEngine::new(
        Arc::clone(&db),
        Arc::clone(&facts) as Arc<dyn FactSource>,
        Arc::clone(&similarity) as Arc<dyn SimilarityModel>,
    );
    let evaluator_engine = DriftEngine::new(
        Arc::clone(&db),
        Arc::clone(&facts) as Arc<dyn FactSource>,
        Arc::clone(&similarity) as Arc<dyn SimilarityModel>,
    );
    let evaluator = Arc::new(FlagEvaluator::new(
        Arc::clone(&db),
        evaluator_engine,
        dispatcher,
    ));

    TestStack {
        db,
        registry,
        engine,
        evaluator,
        facts,
        similarity,
    }
}

pub fn stack() -> TestStack {
    stack_with_dispatcher(AlertDispatcher::new())
}

pub fn observed(touch_points: &[&str], complexity: f64, purpose: &str) -> ObservedFacts {
    ObservedFacts {
        touch_points: touch_points.iter().map(|t| t.to_string()).collect(),
        interface_complexity: complexity,
        purpose_summary: purpose.to_string(),
    }
}

/// A valid story draft declaring the given touch points.
pub fn draft(engagement: &str, touch_points: &[&str]) -> StoryDraft {
    StoryDraft {
        story_text: "As a user, I want fast lookups, so that pages load quickly".to_string(),
        engagement: engagement.to_string(),
        primitive_value: "fast lookups".to_string(),
        expression: "resolves names quickly".to_string(),
        confidence: 0.9,
        quality: 0.8,
        touch_points: touch_points
            .iter()
            .map(|text| TouchPointDraft {
                text: text.to_string(),
                touch_type: "interface".to_string(),
            })
            .collect(),
    }
}
