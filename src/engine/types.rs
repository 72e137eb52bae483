//! Request and response payloads exchanged with the search engine

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Settings and mappings forwarded untouched to the engine on index creation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexDefinition {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub settings: Value,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub mappings: Value,
}

impl IndexDefinition {
    pub fn new(settings: Value, mappings: Value) -> Self {
        Self { settings, mappings }
    }

    /// Load a definition from a JSON document on disk
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::Configuration(format!(
                "Failed to read index definition {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// One step of an atomic alias update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasAction {
    Add { index: String, alias: String },
    Remove { index: String, alias: String },
}

impl AliasAction {
    pub fn add(index: impl Into<String>, alias: impl Into<String>) -> Self {
        AliasAction::Add {
            index: index.into(),
            alias: alias.into(),
        }
    }

    pub fn remove(index: impl Into<String>, alias: impl Into<String>) -> Self {
        AliasAction::Remove {
            index: index.into(),
            alias: alias.into(),
        }
    }
}

/// Physical index name to alias metadata, as returned by an alias lookup
pub type AliasTargets = BTreeMap<String, Value>;

/// Engine-level search call, already translated to size/from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchParams {
    pub index: String,
    pub doc_type: Option<String>,
    pub size: u64,
    pub from: u64,
    pub body: Value,
}

/// Document write
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexDocument {
    pub index: String,
    pub doc_type: Option<String>,
    pub id: Option<String>,
    pub document: Value,
    pub refresh: bool,
}

impl IndexDocument {
    pub fn new(index: impl Into<String>, document: Value) -> Self {
        Self {
            index: index.into(),
            doc_type: None,
            id: None,
            document,
            refresh: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }
}

/// Search response envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub took: Option<u64>,

    #[serde(default)]
    pub hits: Hits,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hits {
    #[serde(default)]
    pub total: Option<HitsTotal>,

    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// Older engines report a bare count, newer ones an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HitsTotal {
    Count(u64),
    Detailed { value: u64, relation: String },
}

impl HitsTotal {
    pub fn value(&self) -> u64 {
        match self {
            HitsTotal::Count(value) => *value,
            HitsTotal::Detailed { value, .. } => *value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    #[serde(rename = "_index")]
    pub index: String,

    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "_score", default)]
    pub score: Option<f64>,

    #[serde(rename = "_source", default)]
    pub source: Value,
}
