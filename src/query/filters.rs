//! Term, exists and range filter fragments

use crate::query::{QueryError, QueryResult};
use serde_json::{json, Map, Value};
use std::num::ParseIntError;

/// Range tokens accepted by [`generate_range_filter`]: one token or an ordered list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeTokens(Vec<String>);

impl RangeTokens {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for RangeTokens {
    fn from(token: &str) -> Self {
        RangeTokens(vec![token.to_string()])
    }
}

impl From<String> for RangeTokens {
    fn from(token: String) -> Self {
        RangeTokens(vec![token])
    }
}

impl From<Vec<String>> for RangeTokens {
    fn from(tokens: Vec<String>) -> Self {
        RangeTokens(tokens)
    }
}

impl From<Vec<&str>> for RangeTokens {
    fn from(tokens: Vec<&str>) -> Self {
        RangeTokens(tokens.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for RangeTokens {
    fn from(tokens: &[&str]) -> Self {
        RangeTokens(tokens.iter().map(|t| t.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RangeTokens {
    fn from(tokens: [&str; N]) -> Self {
        RangeTokens(tokens.iter().map(|t| t.to_string()).collect())
    }
}

fn keyed(field: &str, value: Value) -> Value {
    let mut object = Map::new();
    object.insert(field.to_string(), value);
    Value::Object(object)
}

/// `term` filter for scalar values, `terms` for arrays and objects
pub fn generate_term_filter(field: &str, value: impl Into<Value>) -> Value {
    let value = value.into();
    let composite = value.is_array() || value.is_object();
    let clause = keyed(field, value);

    if composite {
        json!({ "terms": clause })
    } else {
        json!({ "term": clause })
    }
}

pub fn generate_exists_filter(field: &str) -> Value {
    json!({ "exists": { "field": field } })
}

/// Disjunction of ranges, one per `"<low>-<high>"` token
///
/// Bounds are the min and max of the integers found in the token, so
/// `"15-3"` and `"3-15"` produce the same clause.
pub fn generate_range_filter(field: &str, values: impl Into<RangeTokens>) -> QueryResult<Value> {
    let should = values
        .into()
        .iter()
        .map(|token| {
            let (gte, lte) = parse_bounds(token)?;
            Ok(json!({ "range": keyed(field, json!({ "gte": gte, "lte": lte })) }))
        })
        .collect::<QueryResult<Vec<_>>>()?;

    Ok(json!({ "bool": { "should": should } }))
}

fn parse_bounds(token: &str) -> QueryResult<(i64, i64)> {
    let mut limits = Vec::new();
    for part in token.split('-') {
        if let Some(limit) = parse_leading_int(part)
            .map_err(|_| QueryError::InvalidRangeToken(token.to_string()))?
        {
            limits.push(limit);
        }
    }

    match (limits.iter().min(), limits.iter().max()) {
        (Some(low), Some(high)) => Ok((*low, *high)),
        _ => Err(QueryError::InvalidRangeToken(token.to_string())),
    }
}

/// Integer prefix of `part`, ignoring leading whitespace and trailing garbage
///
/// `Ok(None)` when there is no digit at all, `Err` when the digits overflow.
fn parse_leading_int(part: &str) -> Result<Option<i64>, ParseIntError> {
    let part = part.trim_start();
    let digits = part.strip_prefix('+').unwrap_or(part);

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    if end == 0 {
        return Ok(None);
    }
    digits[..end].parse().map(Some)
}
