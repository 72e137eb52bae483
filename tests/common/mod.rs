//! Common test utilities for lifecycle tests

#![allow(dead_code)]

use indice_manager::engine::{IndexDefinition, IndexDocument, InMemoryEngine, SearchEngine};
use indice_manager::{IndiceManager, ManagerOptions};
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;

/// Transition lines captured from a manager
#[derive(Clone, Default)]
pub struct CapturedLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CapturedLog {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn options(&self) -> ManagerOptions {
        let lines = self.lines.clone();
        ManagerOptions::new().with_log(move |line| lines.lock().push(line.to_string()))
    }
}

/// Manager over a fresh in-memory engine, with captured transition log
pub fn memory_manager() -> (IndiceManager, InMemoryEngine, CapturedLog) {
    let engine = InMemoryEngine::new();
    let log = CapturedLog::default();
    let manager = IndiceManager::new(Arc::new(engine.clone()), log.options());
    (manager, engine, log)
}

pub fn product_definition() -> IndexDefinition {
    IndexDefinition::new(
        json!({ "number_of_shards": 1, "number_of_replicas": 0 }),
        json!({ "properties": { "name": { "type": "keyword" }, "price": { "type": "integer" } } }),
    )
}

/// Write `count` documents with ids `doc-000`, `doc-001`, ... and refresh
pub async fn seed_documents(engine: &InMemoryEngine, index: &str, count: usize) {
    for i in 0..count {
        engine
            .index_document(
                &IndexDocument::new(index, json!({ "name": format!("product {}", i), "price": i }))
                    .with_id(format!("doc-{:03}", i)),
            )
            .await
            .unwrap();
    }
    engine.refresh_index(index).await.unwrap();
}
