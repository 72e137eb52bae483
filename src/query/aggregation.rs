//! Aggregation clauses for faceted search

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use strum::EnumString;

/// Default bucket count for `terms` aggregations
pub const DEFAULT_TERMS_SIZE: u64 = 250;

/// Aggregation kind; anything unrecognised is forwarded under its own name
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum AggregationType {
    Stats,
    Terms,
    Range,
    #[strum(default)]
    Other(String),
}

impl AggregationType {
    pub fn name(&self) -> &str {
        match self {
            AggregationType::Stats => "stats",
            AggregationType::Terms => "terms",
            AggregationType::Range => "range",
            AggregationType::Other(name) => name,
        }
    }
}

/// Options for [`generate_aggregation`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregationOptions {
    /// Filters currently applied to the query
    #[serde(default)]
    pub post_filter: Vec<Value>,

    /// Bucket count for `terms`
    pub size: Option<u64>,

    /// Bucket order for `terms`
    pub order: Option<Value>,

    /// Boundaries for `range`
    pub ranges: Option<Value>,

    /// Sub-aggregations attached under `aggs`
    #[serde(alias = "otherAggregations")]
    pub other_aggregations: Option<Value>,
}

impl AggregationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_post_filter(mut self, filters: Vec<Value>) -> Self {
        self.post_filter = filters;
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_order(mut self, order: Value) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_ranges(mut self, ranges: Value) -> Self {
        self.ranges = Some(ranges);
        self
    }

    pub fn with_other_aggregations(mut self, aggregations: Value) -> Self {
        self.other_aggregations = Some(aggregations);
        self
    }
}

fn is_set(value: Option<&Value>) -> bool {
    value.is_some_and(|v| !v.is_null())
}

/// Whether `filter` should still scope an aggregation of `kind` over `field`
///
/// A facet's own filter is excluded so its buckets are not narrowed to the
/// user's current selection.
fn keeps_filter(kind: &AggregationType, field: &str, filter: &Value) -> bool {
    match kind {
        AggregationType::Stats => !is_set(filter.pointer("/bool/should")),
        AggregationType::Terms => {
            let term = filter.get("term");
            let terms = filter.get("terms");

            if term.is_none() && terms.is_none() {
                return true;
            }

            term.is_some_and(|t| !is_set(t.get(field))) || terms.is_some_and(|t| !is_set(t.get(field)))
        }
        _ => true,
    }
}

/// Build an aggregation clause, wrapped in a filter aggregation when other
/// filters remain active
pub fn generate_aggregation(
    kind: &AggregationType,
    field: &str,
    options: &AggregationOptions,
) -> Value {
    let remaining: Vec<Value> = options
        .post_filter
        .iter()
        .filter(|filter| keeps_filter(kind, field, filter))
        .cloned()
        .collect();

    let mut body = Map::new();
    body.insert("field".to_string(), json!(field));

    match kind {
        AggregationType::Terms => {
            body.insert(
                "size".to_string(),
                json!(options.size.unwrap_or(DEFAULT_TERMS_SIZE)),
            );
            if let Some(order) = &options.order {
                body.insert("order".to_string(), order.clone());
            }
        }
        AggregationType::Range => {
            if let Some(ranges) = &options.ranges {
                body.insert("ranges".to_string(), ranges.clone());
            }
        }
        _ => {}
    }

    let mut aggregation = Map::new();
    aggregation.insert(kind.name().to_string(), Value::Object(body));
    if let Some(nested) = &options.other_aggregations {
        aggregation.insert("aggs".to_string(), nested.clone());
    }
    let aggregation = Value::Object(aggregation);

    if remaining.is_empty() {
        aggregation
    } else {
        json!({
            "filter": { "bool": { "filter": remaining } },
            "aggs": { "results": aggregation }
        })
    }
}
