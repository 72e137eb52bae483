use crate::config::{EngineBackend, EngineConfig};
use crate::engine::{EngineResult, HttpEngine, InMemoryEngine, SearchEngine};
use std::sync::Arc;

/// Create a search engine client based on configuration
pub fn create_engine(config: &EngineConfig) -> EngineResult<Arc<dyn SearchEngine>> {
    match config.backend {
        EngineBackend::Http => {
            tracing::info!(url = %config.url, "Initializing HTTP search engine client");

            let engine = HttpEngine::new(config)?;
            Ok(Arc::new(engine))
        }

        EngineBackend::Memory => Ok(create_in_memory_engine()),
    }
}

/// Create an in-memory engine (for testing and dry runs)
pub fn create_in_memory_engine() -> Arc<dyn SearchEngine> {
    tracing::info!("Initializing in-memory search engine");
    Arc::new(InMemoryEngine::new())
}
