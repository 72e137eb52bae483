//! Search engine capability consumed by the lifecycle layer

use crate::engine::error::EngineResult;
use crate::engine::types::{
    AliasAction, AliasTargets, IndexDefinition, IndexDocument, SearchParams, SearchResponse,
};
use async_trait::async_trait;

/// Client capability over an Elasticsearch-compatible engine
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Check whether an index (or alias) exists
    async fn index_exists(&self, name: &str) -> EngineResult<bool>;

    /// Create an index; fails if it already exists
    async fn create_index(&self, name: &str, definition: &IndexDefinition) -> EngineResult<()>;

    /// Delete an index
    async fn delete_index(&self, name: &str) -> EngineResult<()>;

    /// Make recently written documents visible to search
    async fn refresh_index(&self, name: &str) -> EngineResult<()>;

    /// Check whether `alias` points to any of `indices`
    async fn alias_exists(&self, indices: &[String], alias: &str) -> EngineResult<bool>;

    /// Resolve an alias to the indices it targets; empty when the alias is absent
    async fn get_alias(&self, alias: &str) -> EngineResult<AliasTargets>;

    /// Point `alias` at `index`
    async fn put_alias(&self, alias: &str, index: &str) -> EngineResult<()>;

    /// Apply every action as one atomic alias update
    async fn update_aliases(&self, actions: &[AliasAction]) -> EngineResult<()>;

    /// Copy all documents from `source` into `dest`
    async fn reindex(&self, source: &str, dest: &str, wait_for_completion: bool)
        -> EngineResult<()>;

    /// Run a search
    async fn search(&self, params: &SearchParams) -> EngineResult<SearchResponse>;

    /// Write a single document
    async fn index_document(&self, document: &IndexDocument) -> EngineResult<()>;
}
