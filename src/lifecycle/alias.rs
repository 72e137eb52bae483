//! Alias to physical index resolution

use crate::engine::SearchEngine;
use crate::error::{Error, Result};
use crate::lifecycle::naming::{AliasState, IndicePair};
use crate::lifecycle::options::TransitionLogger;
use std::sync::Arc;
use tracing::warn;

/// Works out which member of a pair is live behind the alias
#[derive(Clone)]
pub struct AliasResolver {
    engine: Arc<dyn SearchEngine>,
    log: TransitionLogger,
}

impl AliasResolver {
    pub(crate) fn new(engine: Arc<dyn SearchEngine>, log: TransitionLogger) -> Self {
        Self { engine, log }
    }

    /// True iff alias `indice` points at `indice_1` or `indice_2`
    pub async fn alias_exists(&self, indice: &str) -> Result<bool> {
        let pair = IndicePair::new(indice);
        Ok(self.engine.alias_exists(&pair.members(), indice).await?)
    }

    /// Physical index currently behind the alias
    pub async fn get_used_index(&self, indice: &str) -> Result<String> {
        let pair = IndicePair::new(indice);
        let targets = self.engine.get_alias(indice).await?;

        if targets.is_empty() {
            return Err(Error::AliasNotFound {
                indice: indice.to_string(),
            });
        }

        // Exactly one target, and it must belong to the pair
        let mut keys = targets.keys();
        match (keys.next(), keys.next()) {
            (Some(used), None) if pair.contains(used) => Ok(used.clone()),
            _ => {
                let targets: Vec<String> = targets.keys().cloned().collect();
                warn!(indice = %indice, targets = ?targets, "Alias does not resolve to exactly one member of its pair");
                Err(Error::UnexpectedAliasTarget {
                    indice: indice.to_string(),
                    targets,
                })
            }
        }
    }

    /// Sibling of the used index
    pub async fn get_unused_index(&self, indice: &str) -> Result<String> {
        Ok(self.resolve(indice).await?.unused)
    }

    /// Used and unused index in one lookup
    pub async fn resolve(&self, indice: &str) -> Result<AliasState> {
        let pair = IndicePair::new(indice);

        if !self.alias_exists(indice).await? {
            self.log.emit(format!(
                "Alias {},{} for {} not exists",
                pair.primary(),
                pair.secondary(),
                indice
            ));
            return Err(Error::AliasNotFound {
                indice: indice.to_string(),
            });
        }

        let used = self.get_used_index(indice).await?;
        let unused = pair
            .sibling_of(&used)
            .map(str::to_string)
            .ok_or_else(|| Error::UnexpectedAliasTarget {
                indice: indice.to_string(),
                targets: vec![used.clone()],
            })?;

        Ok(AliasState {
            indice: indice.to_string(),
            used,
            unused,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{IndexDefinition, InMemoryEngine};
    use parking_lot::Mutex;

    async fn engine_with_pair(indice: &str) -> InMemoryEngine {
        let engine = InMemoryEngine::new();
        let pair = IndicePair::new(indice);
        for index in pair.members() {
            engine
                .create_index(&index, &IndexDefinition::default())
                .await
                .unwrap();
        }
        engine
    }

    #[tokio::test]
    async fn test_resolve_complement() {
        let engine = engine_with_pair("books").await;
        engine.put_alias("books", "books_2").await.unwrap();

        let resolver = AliasResolver::new(Arc::new(engine), TransitionLogger::default());
        let state = resolver.resolve("books").await.unwrap();
        assert_eq!(state.used, "books_2");
        assert_eq!(state.unused, "books_1");
        assert_eq!(resolver.get_used_index("books").await.unwrap(), "books_2");
        assert_eq!(resolver.get_unused_index("books").await.unwrap(), "books_1");
    }

    #[tokio::test]
    async fn test_missing_alias_is_logged_and_reported() {
        let engine = engine_with_pair("books").await;
        let lines = Arc::new(Mutex::new(Vec::new()));
        let captured = lines.clone();
        let sink: crate::lifecycle::TransitionLog =
            Arc::new(move |line: &str| captured.lock().push(line.to_string()));

        let resolver = AliasResolver::new(Arc::new(engine), TransitionLogger::new(Some(sink)));

        let err = resolver.get_unused_index("books").await.unwrap_err();
        assert!(matches!(err, Error::AliasNotFound { ref indice } if indice == "books"));
        assert_eq!(
            *lines.lock(),
            vec!["Alias books_1,books_2 for books not exists".to_string()]
        );

        let err = resolver.get_used_index("books").await.unwrap_err();
        assert!(matches!(err, Error::AliasNotFound { .. }));
    }

    #[tokio::test]
    async fn test_alias_on_both_members_is_rejected() {
        let engine = engine_with_pair("books").await;
        engine.put_alias("books", "books_1").await.unwrap();
        engine.put_alias("books", "books_2").await.unwrap();

        let resolver = AliasResolver::new(Arc::new(engine), TransitionLogger::default());
        let err = resolver.resolve("books").await.unwrap_err();
        assert!(matches!(err, Error::UnexpectedAliasTarget { ref targets, .. } if targets.len() == 2));
    }

    #[tokio::test]
    async fn test_alias_on_member_and_foreign_index_is_rejected() {
        let engine = engine_with_pair("books").await;
        engine
            .create_index("books_legacy", &IndexDefinition::default())
            .await
            .unwrap();
        engine.put_alias("books", "books_1").await.unwrap();
        engine.put_alias("books", "books_legacy").await.unwrap();

        let resolver = AliasResolver::new(Arc::new(engine), TransitionLogger::default());
        assert!(resolver.alias_exists("books").await.unwrap());

        let err = resolver.resolve("books").await.unwrap_err();
        match err {
            Error::UnexpectedAliasTarget { indice, targets } => {
                assert_eq!(indice, "books");
                assert_eq!(targets, vec!["books_1".to_string(), "books_legacy".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_alias_outside_pair_is_not_found() {
        let engine = engine_with_pair("books").await;
        engine
            .create_index("books_legacy", &IndexDefinition::default())
            .await
            .unwrap();
        engine.put_alias("books", "books_legacy").await.unwrap();

        let resolver = AliasResolver::new(Arc::new(engine), TransitionLogger::default());
        assert!(!resolver.alias_exists("books").await.unwrap());
        assert!(matches!(
            resolver.get_unused_index("books").await.unwrap_err(),
            Error::AliasNotFound { .. }
        ));
        assert!(matches!(
            resolver.get_used_index("books").await.unwrap_err(),
            Error::UnexpectedAliasTarget { .. }
        ));
    }
}
