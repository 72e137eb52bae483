//! Page-number pagination over the engine's size/from convention

use crate::engine::{SearchEngine, SearchParams, SearchResponse};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Pagination options; `offset` is a page number, not a document offset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub limit: u64,

    #[serde(default)]
    pub offset: u64,
}

impl Pagination {
    pub fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }

    /// Page size sent to the engine
    pub fn size(&self) -> u64 {
        self.limit
    }

    /// First document position sent to the engine
    pub fn start(&self) -> u64 {
        self.limit.saturating_mul(self.offset)
    }
}

/// Structured search request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub index: String,

    #[serde(default, rename = "type")]
    pub doc_type: Option<String>,

    #[serde(default)]
    pub options: Pagination,

    /// Query, filter and aggregation payload, forwarded unchanged
    #[serde(default)]
    pub body: Value,
}

impl SearchRequest {
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    pub fn with_pagination(mut self, limit: u64, offset: u64) -> Self {
        self.options = Pagination::new(limit, offset);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Engine-level parameters for this request
    pub fn to_params(&self) -> SearchParams {
        SearchParams {
            index: self.index.clone(),
            doc_type: self.doc_type.clone(),
            size: self.options.size(),
            from: self.options.start(),
            body: self.body.clone(),
        }
    }
}

/// Thin search front-end translating page numbers for the engine
#[derive(Clone)]
pub struct PaginatedSearch {
    engine: Arc<dyn SearchEngine>,
}

impl PaginatedSearch {
    pub fn new(engine: Arc<dyn SearchEngine>) -> Self {
        Self { engine }
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let params = request.to_params();

        tracing::debug!(
            index = %params.index,
            size = params.size,
            from = params.from,
            "Executing search"
        );

        Ok(self.engine.search(&params).await?)
    }
}
