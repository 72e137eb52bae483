//! Physical index existence: create-if-absent, clear, refresh

use crate::engine::{IndexDefinition, SearchEngine};
use crate::error::Result;
use crate::lifecycle::options::TransitionLogger;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Outcome of [`IndexAdmin::create_index`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexCreation {
    Created,
    AlreadyExists,
}

impl IndexCreation {
    pub fn is_created(&self) -> bool {
        matches!(self, IndexCreation::Created)
    }
}

/// Creates, clears and refreshes physical indices
#[derive(Clone)]
pub struct IndexAdmin {
    engine: Arc<dyn SearchEngine>,
    log: TransitionLogger,
}

impl IndexAdmin {
    pub(crate) fn new(engine: Arc<dyn SearchEngine>, log: TransitionLogger) -> Self {
        Self { engine, log }
    }

    /// Create `name` unless it already exists
    pub async fn create_index(
        &self,
        name: &str,
        definition: &IndexDefinition,
    ) -> Result<IndexCreation> {
        if self.engine.index_exists(name).await? {
            debug!(index = %name, "Index already exists");
            return Ok(IndexCreation::AlreadyExists);
        }

        self.log.emit(format!("Creating {} index", name));
        self.engine.create_index(name, definition).await?;

        Ok(IndexCreation::Created)
    }

    /// Destroy `name` if present and recreate it empty with `definition`
    pub async fn clear_index(&self, name: &str, definition: &IndexDefinition) -> Result<()> {
        self.log.emit(format!("Clearing {} index", name));

        if self.engine.index_exists(name).await? {
            self.engine.delete_index(name).await?;
        }

        self.engine.create_index(name, definition).await?;
        Ok(())
    }

    pub async fn refresh_index(&self, name: &str) -> Result<()> {
        self.engine.refresh_index(name).await?;
        Ok(())
    }
}
