//! Shared test doubles for the controller tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use classifier_client::ClassifierClient;
use portal_core::ClassificationOutcome;

/// Classifier that replays scripted outcomes and records what it was asked.
#[derive(Debug, Default)]
pub struct ScriptedClassifier {
    outcomes: Mutex<VecDeque<ClassificationOutcome>>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedClassifier {
    pub fn new(outcomes: impl IntoIterator<Item = ClassificationOutcome>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClassifierClient for ScriptedClassifier {
    async fn classify(&self, query: &str) -> ClassificationOutcome {
        self.queries.lock().unwrap().push(query.to_string());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("classifier called more often than scripted")
    }
}
