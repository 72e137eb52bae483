//! Process-local [`SearchEngine`] with index, alias, refresh and reindex semantics

use crate::engine::error::{EngineError, EngineResult};
use crate::engine::traits::SearchEngine;
use crate::engine::types::{
    AliasAction, AliasTargets, Hit, Hits, HitsTotal, IndexDefinition, IndexDocument,
    SearchParams, SearchResponse,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{json, Value};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
struct MemoryIndex {
    definition: IndexDefinition,
    /// Documents visible to search
    visible: BTreeMap<String, Value>,
    /// Documents written since the last refresh
    pending: BTreeMap<String, Value>,
}

impl MemoryIndex {
    fn new(definition: IndexDefinition) -> Self {
        Self {
            definition,
            ..Default::default()
        }
    }

    fn refresh(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        self.visible.extend(pending);
    }
}

#[derive(Debug, Default)]
struct EngineState {
    indices: BTreeMap<String, MemoryIndex>,
    aliases: BTreeMap<String, BTreeSet<String>>,
    rejected: HashSet<String>,
}

impl EngineState {
    /// Expand a comma separated list of index or alias names to physical indices
    fn resolve(&self, names: &str) -> EngineResult<Vec<String>> {
        let mut resolved = BTreeSet::new();

        for name in names.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            if self.indices.contains_key(name) {
                resolved.insert(name.to_string());
            } else if let Some(targets) = self.aliases.get(name) {
                resolved.extend(targets.iter().cloned());
            } else {
                return Err(index_not_found(name));
            }
        }

        Ok(resolved.into_iter().collect())
    }

    /// Resolve a write target, which must be a single index
    fn resolve_single(&self, name: &str) -> EngineResult<String> {
        let targets = self.resolve(name)?;
        match targets.as_slice() {
            [index] => Ok(index.clone()),
            _ => Err(EngineError::status(
                400,
                "resolve write index",
                format!("alias [{}] has more than one write index", name),
            )),
        }
    }

    fn index_mut(&mut self, name: &str) -> EngineResult<&mut MemoryIndex> {
        self.indices
            .get_mut(name)
            .ok_or_else(|| index_not_found(name))
    }
}

fn index_not_found(name: &str) -> EngineError {
    EngineError::status(
        404,
        "resolve index",
        json!({ "error": { "type": "index_not_found_exception", "index": name } }).to_string(),
    )
}

/// In-memory search engine
///
/// Searches behave like `match_all`: the request body is accepted but not
/// evaluated, hits are ordered by index then document id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEngine {
    state: Arc<RwLock<EngineState>>,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future `create_index` for `name` fail with a 400
    pub fn reject_creation_of(&self, name: impl Into<String>) {
        self.state.write().rejected.insert(name.into());
    }

    /// Number of searchable documents in a physical index
    pub fn document_count(&self, index: &str) -> Option<usize> {
        self.state.read().indices.get(index).map(|i| i.visible.len())
    }

    /// Searchable documents in a physical index, keyed by id
    pub fn documents(&self, index: &str) -> Option<BTreeMap<String, Value>> {
        self.state.read().indices.get(index).map(|i| i.visible.clone())
    }

    /// Definition an index was created with
    pub fn definition(&self, index: &str) -> Option<IndexDefinition> {
        self.state
            .read()
            .indices
            .get(index)
            .map(|i| i.definition.clone())
    }

    /// Physical indices an alias currently targets
    pub fn alias_targets(&self, alias: &str) -> Vec<String> {
        self.state
            .read()
            .aliases
            .get(alias)
            .map(|targets| targets.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Names of every physical index
    pub fn index_names(&self) -> Vec<String> {
        self.state.read().indices.keys().cloned().collect()
    }
}

#[async_trait]
impl SearchEngine for InMemoryEngine {
    async fn index_exists(&self, name: &str) -> EngineResult<bool> {
        let state = self.state.read();
        Ok(state.indices.contains_key(name) || state.aliases.contains_key(name))
    }

    async fn create_index(&self, name: &str, definition: &IndexDefinition) -> EngineResult<()> {
        let mut state = self.state.write();

        if state.rejected.contains(name) {
            return Err(EngineError::status(
                400,
                "create index",
                format!("index [{}] creation rejected", name),
            ));
        }

        if state.indices.contains_key(name) || state.aliases.contains_key(name) {
            return Err(EngineError::status(
                400,
                "create index",
                json!({ "error": { "type": "resource_already_exists_exception", "index": name } })
                    .to_string(),
            ));
        }

        state
            .indices
            .insert(name.to_string(), MemoryIndex::new(definition.clone()));
        Ok(())
    }

    async fn delete_index(&self, name: &str) -> EngineResult<()> {
        let mut state = self.state.write();

        if state.indices.remove(name).is_none() {
            return Err(index_not_found(name));
        }

        // Deleting an index drops every alias edge pointing at it
        state.aliases.retain(|_, targets| {
            targets.remove(name);
            !targets.is_empty()
        });
        Ok(())
    }

    async fn refresh_index(&self, name: &str) -> EngineResult<()> {
        let mut state = self.state.write();
        for index in state.resolve(name)? {
            state.index_mut(&index)?.refresh();
        }
        Ok(())
    }

    async fn alias_exists(&self, indices: &[String], alias: &str) -> EngineResult<bool> {
        let state = self.state.read();
        Ok(state
            .aliases
            .get(alias)
            .is_some_and(|targets| indices.iter().any(|index| targets.contains(index))))
    }

    async fn get_alias(&self, alias: &str) -> EngineResult<AliasTargets> {
        let state = self.state.read();
        Ok(state
            .aliases
            .get(alias)
            .map(|targets| {
                targets
                    .iter()
                    .map(|index| (index.clone(), json!({ "aliases": { alias: {} } })))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn put_alias(&self, alias: &str, index: &str) -> EngineResult<()> {
        let mut state = self.state.write();

        if !state.indices.contains_key(index) {
            return Err(index_not_found(index));
        }

        state
            .aliases
            .entry(alias.to_string())
            .or_default()
            .insert(index.to_string());
        Ok(())
    }

    async fn update_aliases(&self, actions: &[AliasAction]) -> EngineResult<()> {
        let mut state = self.state.write();

        // Validate against a scratch copy so a failing action leaves nothing applied
        let mut aliases = state.aliases.clone();

        for action in actions {
            match action {
                AliasAction::Add { index, alias } => {
                    if !state.indices.contains_key(index) {
                        return Err(index_not_found(index));
                    }
                    aliases.entry(alias.clone()).or_default().insert(index.clone());
                }
                AliasAction::Remove { index, alias } => {
                    let removed = aliases
                        .get_mut(alias)
                        .is_some_and(|targets| targets.remove(index));
                    if !removed {
                        return Err(EngineError::status(
                            404,
                            "update aliases",
                            json!({ "error": { "type": "aliases_not_found_exception", "alias": alias } })
                                .to_string(),
                        ));
                    }
                }
            }
        }

        aliases.retain(|_, targets| !targets.is_empty());
        state.aliases = aliases;
        Ok(())
    }

    async fn reindex(
        &self,
        source: &str,
        dest: &str,
        _wait_for_completion: bool,
    ) -> EngineResult<()> {
        let mut state = self.state.write();

        let mut copied = BTreeMap::new();
        for index in state.resolve(source)? {
            if let Some(source_index) = state.indices.get(&index) {
                copied.extend(source_index.visible.clone());
            }
        }

        let dest = match state.resolve_single(dest) {
            Ok(index) => index,
            Err(err) if err.is_not_found() => {
                state
                    .indices
                    .insert(dest.to_string(), MemoryIndex::default());
                dest.to_string()
            }
            Err(err) => return Err(err),
        };

        state.index_mut(&dest)?.pending.extend(copied);
        Ok(())
    }

    async fn search(&self, params: &SearchParams) -> EngineResult<SearchResponse> {
        let state = self.state.read();

        let mut hits = Vec::new();
        for index in state.resolve(&params.index)? {
            if let Some(memory_index) = state.indices.get(&index) {
                hits.extend(memory_index.visible.iter().map(|(id, source)| Hit {
                    index: index.clone(),
                    id: id.clone(),
                    score: Some(1.0),
                    source: source.clone(),
                }));
            }
        }

        let total = hits.len() as u64;
        let hits = hits
            .into_iter()
            .skip(params.from as usize)
            .take(params.size as usize)
            .collect();

        Ok(SearchResponse {
            took: Some(0),
            hits: Hits {
                total: Some(HitsTotal::Detailed {
                    value: total,
                    relation: "eq".to_string(),
                }),
                hits,
            },
            aggregations: None,
        })
    }

    async fn index_document(&self, document: &IndexDocument) -> EngineResult<()> {
        let mut state = self.state.write();

        let index = state.resolve_single(&document.index)?;
        let id = document
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let target = state.index_mut(&index)?;
        target.pending.insert(id, document.document.clone());
        if document.refresh {
            target.refresh();
        }
        Ok(())
    }
}
