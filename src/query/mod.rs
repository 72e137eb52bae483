//! Query fragment builders
//!
//! Pure functions producing filter and aggregation clauses of the engine's
//! query DSL. Nothing here talks to the engine; the fragments are meant to be
//! placed into request bodies passed to [`crate::search::PaginatedSearch`].
//!
//! ```
//! use indice_manager::query::{generate_range_filter, generate_term_filter};
//!
//! let brand = generate_term_filter("brand", "acme");
//! let age = generate_range_filter("age", ["2-12", "3-15"]).unwrap();
//! assert!(brand.get("term").is_some());
//! assert_eq!(age["bool"]["should"].as_array().unwrap().len(), 2);
//! ```

mod aggregation;
mod error;
mod filters;

pub use aggregation::{generate_aggregation, AggregationOptions, AggregationType, DEFAULT_TERMS_SIZE};
pub use error::{QueryError, QueryResult};
pub use filters::{generate_exists_filter, generate_range_filter, generate_term_filter, RangeTokens};
