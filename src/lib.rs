//! Blue-green index lifecycle manager for Elasticsearch-compatible engines
//!
//! Each logical indice `N` is backed by two physical indices, `N_1` and `N_2`,
//! with the alias `N` serving exactly one of them. New data is built in the
//! unused index, then the alias is swapped atomically.
//!
//! # Example
//!
//! ```no_run
//! use indice_manager::engine::{HttpEngine, IndexDefinition};
//! use indice_manager::{config::EngineConfig, IndiceManager, ManagerOptions};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = Arc::new(HttpEngine::new(&EngineConfig::default())?);
//!     let manager = IndiceManager::new(engine, ManagerOptions::new().with_tracing_log());
//!
//!     let definition = IndexDefinition::default();
//!     manager.create_indice("products", &definition).await?;
//!
//!     // Rebuild into the unused slot, then promote it
//!     manager.clear_indice("products", &definition).await?;
//!     manager.reindex_indice("products").await?;
//!     manager.swap_indice("products").await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod manager;
pub mod query;
pub mod search;

pub use error::{Error, Result};
pub use lifecycle::{AliasState, IndexCreation, IndiceCreation, ManagerOptions};
pub use manager::{IndiceManager, IndiceManagerBuilder, IndiceStatus};
pub use search::{Pagination, SearchRequest};
