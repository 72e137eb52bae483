//! Blue-green state machine over a pair of physical indices

use crate::engine::{AliasAction, IndexDefinition, SearchEngine};
use crate::error::Result;
use crate::lifecycle::admin::{IndexAdmin, IndexCreation};
use crate::lifecycle::alias::AliasResolver;
use crate::lifecycle::locks::IndiceLocks;
use crate::lifecycle::naming::{AliasState, IndicePair};
use crate::lifecycle::options::TransitionLogger;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Outcome of [`BlueGreenController::create_indice`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndiceCreation {
    pub primary: IndexCreation,
    pub secondary: IndexCreation,
    /// Whether this call pinned the alias to the primary index
    pub alias_pinned: bool,
}

/// Drives creation, reindex, swap and clear of logical indices
///
/// The index behind the alias is never the one being cleared or overwritten.
/// Calls on the same indice are serialized when the manager was built with
/// `serialize_per_indice` (the default); writers in other processes must
/// still be coordinated by the caller.
#[derive(Clone)]
pub struct BlueGreenController {
    engine: Arc<dyn SearchEngine>,
    admin: Arc<IndexAdmin>,
    resolver: Arc<AliasResolver>,
    locks: Arc<IndiceLocks>,
    log: TransitionLogger,
}

impl BlueGreenController {
    pub(crate) fn new(
        engine: Arc<dyn SearchEngine>,
        admin: Arc<IndexAdmin>,
        resolver: Arc<AliasResolver>,
        locks: Arc<IndiceLocks>,
        log: TransitionLogger,
    ) -> Self {
        Self {
            engine,
            admin,
            resolver,
            locks,
            log,
        }
    }

    /// Create both physical indices concurrently, then pin the alias to `_1`
    /// unless it already exists
    #[instrument(skip(self, definition))]
    pub async fn create_indice(
        &self,
        indice: &str,
        definition: &IndexDefinition,
    ) -> Result<IndiceCreation> {
        let _guard = self.locks.acquire(indice).await;
        let pair = IndicePair::new(indice);

        // Both creations run to completion even when one fails
        let (primary, secondary) = futures::join!(
            self.admin.create_index(pair.primary(), definition),
            self.admin.create_index(pair.secondary(), definition),
        );
        let (primary, secondary) = (primary?, secondary?);

        let alias_pinned = if self.resolver.alias_exists(indice).await? {
            debug!(indice = %indice, "Alias already present");
            false
        } else {
            self.log.emit(format!(
                "Creating {} alias pointing to {}",
                indice,
                pair.primary()
            ));
            self.engine.put_alias(indice, pair.primary()).await?;
            true
        };

        Ok(IndiceCreation {
            primary,
            secondary,
            alias_pinned,
        })
    }

    /// Copy every document from the used index into the unused one and wait
    /// for completion; returns the unused index name
    #[instrument(skip(self))]
    pub async fn reindex_indice(&self, indice: &str) -> Result<String> {
        let _guard = self.locks.acquire(indice).await;
        let state = self.resolver.resolve(indice).await?;

        debug!(source = %state.used, dest = %state.unused, "Reindexing");
        self.engine.reindex(&state.used, &state.unused, true).await?;

        Ok(state.unused)
    }

    /// Atomically move the alias from the used to the unused index
    #[instrument(skip(self))]
    pub async fn swap_indice(&self, indice: &str) -> Result<AliasState> {
        let _guard = self.locks.acquire(indice).await;
        let state = self.resolver.resolve(indice).await?;

        self.log.emit(format!(
            "Moving alias {} from {} to {}",
            indice, state.used, state.unused
        ));

        self.engine
            .update_aliases(&[
                AliasAction::remove(&state.used, indice),
                AliasAction::add(&state.unused, indice),
            ])
            .await?;

        Ok(state.swapped())
    }

    /// Destroy and recreate the unused index; returns its name
    #[instrument(skip(self, definition))]
    pub async fn clear_indice(&self, indice: &str, definition: &IndexDefinition) -> Result<String> {
        let _guard = self.locks.acquire(indice).await;
        let unused = self.resolver.get_unused_index(indice).await?;

        self.admin.clear_index(&unused, definition).await?;

        Ok(unused)
    }
}
