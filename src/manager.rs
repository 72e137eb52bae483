//! Standalone entry point composing the lifecycle components

use crate::engine::{IndexDefinition, IndexDocument, SearchEngine, SearchResponse};
use crate::error::{Error, Result};
use crate::lifecycle::{
    AliasResolver, AliasState, BlueGreenController, IndexAdmin, IndexCreation, IndiceCreation,
    IndiceLocks, IndicePair, ManagerOptions, TransitionLogger,
};
use crate::search::{PaginatedSearch, SearchRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Snapshot of a logical indice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndiceStatus {
    pub indice: String,
    pub primary_exists: bool,
    pub secondary_exists: bool,
    /// Used / unused designation, `None` when no alias is established
    pub alias: Option<AliasState>,
}

/// Blue-green index manager bound to one search engine client
///
/// Query fragments are built with the free functions in [`crate::query`].
#[derive(Clone)]
pub struct IndiceManager {
    engine: Arc<dyn SearchEngine>,
    admin: Arc<IndexAdmin>,
    resolver: Arc<AliasResolver>,
    controller: BlueGreenController,
    search: PaginatedSearch,
}

impl IndiceManager {
    /// Compose a manager over `engine`
    pub fn new(engine: Arc<dyn SearchEngine>, options: ManagerOptions) -> Self {
        let log = TransitionLogger::new(options.log);
        let admin = Arc::new(IndexAdmin::new(engine.clone(), log.clone()));
        let resolver = Arc::new(AliasResolver::new(engine.clone(), log.clone()));
        let locks = Arc::new(IndiceLocks::new(options.serialize_per_indice));

        let controller = BlueGreenController::new(
            engine.clone(),
            admin.clone(),
            resolver.clone(),
            locks,
            log,
        );

        Self {
            search: PaginatedSearch::new(engine.clone()),
            engine,
            admin,
            resolver,
            controller,
        }
    }

    pub fn builder() -> IndiceManagerBuilder {
        IndiceManagerBuilder::default()
    }

    /// Underlying engine client
    pub fn engine(&self) -> &Arc<dyn SearchEngine> {
        &self.engine
    }

    pub fn admin(&self) -> &IndexAdmin {
        &self.admin
    }

    pub fn resolver(&self) -> &AliasResolver {
        &self.resolver
    }

    pub fn controller(&self) -> &BlueGreenController {
        &self.controller
    }

    pub async fn create_indice(
        &self,
        indice: &str,
        definition: &IndexDefinition,
    ) -> Result<IndiceCreation> {
        self.controller.create_indice(indice, definition).await
    }

    pub async fn reindex_indice(&self, indice: &str) -> Result<String> {
        self.controller.reindex_indice(indice).await
    }

    pub async fn swap_indice(&self, indice: &str) -> Result<AliasState> {
        self.controller.swap_indice(indice).await
    }

    pub async fn clear_indice(&self, indice: &str, definition: &IndexDefinition) -> Result<String> {
        self.controller.clear_indice(indice, definition).await
    }

    pub async fn create_index(
        &self,
        name: &str,
        definition: &IndexDefinition,
    ) -> Result<IndexCreation> {
        self.admin.create_index(name, definition).await
    }

    pub async fn clear_index(&self, name: &str, definition: &IndexDefinition) -> Result<()> {
        self.admin.clear_index(name, definition).await
    }

    pub async fn refresh_index(&self, name: &str) -> Result<()> {
        self.admin.refresh_index(name).await
    }

    pub async fn alias_exists(&self, indice: &str) -> Result<bool> {
        self.resolver.alias_exists(indice).await
    }

    pub async fn get_used_index(&self, indice: &str) -> Result<String> {
        self.resolver.get_used_index(indice).await
    }

    pub async fn get_unused_index(&self, indice: &str) -> Result<String> {
        self.resolver.get_unused_index(indice).await
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        self.search.search(request).await
    }

    /// Write one document; passthrough to the engine
    pub async fn index_document(&self, document: &IndexDocument) -> Result<()> {
        self.engine.index_document(document).await?;
        Ok(())
    }

    /// Existence of both physical indices and the current alias designation
    pub async fn status(&self, indice: &str) -> Result<IndiceStatus> {
        let pair = IndicePair::new(indice);

        let (primary_exists, secondary_exists) = futures::try_join!(
            self.engine.index_exists(pair.primary()),
            self.engine.index_exists(pair.secondary()),
        )?;

        // Checked first so a missing alias is reported quietly
        let alias = if self.resolver.alias_exists(indice).await? {
            Some(self.resolver.resolve(indice).await?)
        } else {
            None
        };

        Ok(IndiceStatus {
            indice: indice.to_string(),
            primary_exists,
            secondary_exists,
            alias,
        })
    }
}

/// Builder for [`IndiceManager`]
#[derive(Default)]
pub struct IndiceManagerBuilder {
    engine: Option<Arc<dyn SearchEngine>>,
    options: ManagerOptions,
}

impl IndiceManagerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine(mut self, engine: Arc<dyn SearchEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn options(mut self, options: ManagerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_log<F>(mut self, log: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.options = self.options.with_log(log);
        self
    }

    pub fn serialize_per_indice(mut self, enabled: bool) -> Self {
        self.options = self.options.serialize_per_indice(enabled);
        self
    }

    /// Fails with [`Error::MissingClient`] when no engine was supplied
    pub fn build(self) -> Result<IndiceManager> {
        let engine = self.engine.ok_or(Error::MissingClient)?;
        Ok(IndiceManager::new(engine, self.options))
    }
}
