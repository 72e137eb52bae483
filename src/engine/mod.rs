//! Search engine capability and its implementations
//!
//! The lifecycle layer only talks to the engine through [`SearchEngine`].
//! Two implementations ship with the crate:
//!
//! - [`HttpEngine`]: Elasticsearch REST API over `reqwest`
//! - [`InMemoryEngine`]: process-local engine for tests and dry runs

mod error;
mod factory;
mod http;
mod memory;
mod traits;
mod types;

pub use error::{EngineError, EngineResult};
pub use factory::{create_engine, create_in_memory_engine};
pub use http::HttpEngine;
pub use memory::InMemoryEngine;
pub use traits::SearchEngine;
pub use types::{
    AliasAction, AliasTargets, Hit, Hits, HitsTotal, IndexDefinition, IndexDocument,
    SearchParams, SearchResponse,
};
