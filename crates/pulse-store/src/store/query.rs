//! Query types for record listing

use serde::{Deserialize, Serialize};
use serde_json::Value;

use pulse_core::RecordId;

/// Filter operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Field equals the single value
    Eq,
    /// Field equals any of the values
    In,
}

/// A single field filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub values: Vec<Value>,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Single-field sort
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

/// List query: filters, one sort, and a paging window
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Query {
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: i64,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality filter
    pub fn filter_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            field: field.to_string(),
            op: FilterOp::Eq,
            values: vec![value.into()],
        });
        self
    }

    /// Add a membership filter over record ids
    pub fn filter_id_in(mut self, field: &str, ids: &[RecordId]) -> Self {
        self.filters.push(Filter {
            field: field.to_string(),
            op: FilterOp::In,
            values: ids.iter().map(|id| Value::from(id.into_inner())).collect(),
        });
        self
    }

    pub fn sort_asc(mut self, field: &str) -> Self {
        self.sort = Some(Sort {
            field: field.to_string(),
            direction: SortDirection::Asc,
        });
        self
    }

    pub fn sort_desc(mut self, field: &str) -> Self {
        self.sort = Some(Sort {
            field: field.to_string(),
            direction: SortDirection::Desc,
        });
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit.max(0));
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = offset.max(0);
        self
    }
}

impl Filter {
    /// Check a field value against this filter
    ///
    /// Reference fields may be stored as numbers or stringified numbers;
    /// both compare equal to their numeric form.
    pub fn matches(&self, value: Option<&Value>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match self.op {
            FilterOp::Eq => self.values.first().is_some_and(|v| loose_eq(v, value)),
            FilterOp::In => self.values.iter().any(|v| loose_eq(v, value)),
        }
    }
}

/// Equality that tolerates number-vs-stringified-number mismatches
fn loose_eq(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    match (as_i64(a), as_i64(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn as_i64(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_eq_matches() {
        let filter = Filter {
            field: "authorId".to_string(),
            op: FilterOp::Eq,
            values: vec![json!(7)],
        };
        assert!(filter.matches(Some(&json!(7))));
        assert!(filter.matches(Some(&json!("7"))));
        assert!(!filter.matches(Some(&json!(8))));
        assert!(!filter.matches(None));
    }

    #[test]
    fn test_filter_in_matches() {
        let filter = Filter {
            field: "authorId".to_string(),
            op: FilterOp::In,
            values: vec![json!(1), json!(2)],
        };
        assert!(filter.matches(Some(&json!(2))));
        assert!(!filter.matches(Some(&json!(3))));
    }

    #[test]
    fn test_query_builder() {
        let query = Query::new()
            .filter_eq("read", false)
            .sort_desc("timestamp")
            .limit(10)
            .offset(20);
        assert_eq!(query.filters.len(), 1);
        assert_eq!(query.limit, Some(10));
        assert_eq!(query.offset, 20);
        assert_eq!(
            query.sort.as_ref().map(|s| s.direction),
            Some(SortDirection::Desc)
        );
    }

    #[test]
    fn test_query_clamps_negative_paging() {
        let query = Query::new().limit(-5).offset(-3);
        assert_eq!(query.limit, Some(0));
        assert_eq!(query.offset, 0);
    }
}
