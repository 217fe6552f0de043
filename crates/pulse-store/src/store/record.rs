//! Record and document types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use pulse_core::RecordId;

/// Field map of a stored record
pub type Document = serde_json::Map<String, Value>;

/// A stored record: store-assigned id plus its field document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub fields: Document,
}

impl Record {
    pub fn new(id: RecordId, fields: Document) -> Self {
        Self { id, fields }
    }

    /// String field, or `None` if absent or not a string
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// String field that treats the empty string as absent
    pub fn get_nonempty_str(&self, field: &str) -> Option<&str> {
        self.get_str(field).filter(|s| !s.is_empty())
    }

    /// Integer field, or `None` if absent or not numeric
    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.fields.get(field).and_then(Value::as_i64)
    }

    /// Boolean field, or `None` if absent
    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.fields.get(field).and_then(Value::as_bool)
    }

    /// Reference field: the store returns these as either a bare integer or
    /// a stringified id
    pub fn get_id(&self, field: &str) -> Option<RecordId> {
        match self.fields.get(field)? {
            Value::Number(n) => n.as_i64().map(RecordId::new),
            Value::String(s) => RecordId::parse(s).ok(),
            _ => None,
        }
    }

    /// RFC 3339 timestamp field; falls back to `default` when absent or
    /// malformed
    pub fn get_datetime_or(&self, field: &str, default: DateTime<Utc>) -> DateTime<Utc> {
        self.get_str(field)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(default)
    }
}

/// Convenience builder for documents
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    fields: Document,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    /// Set a field only when the value is present
    pub fn set_opt(mut self, field: &str, value: Option<impl Into<Value>>) -> Self {
        if let Some(value) = value {
            self.fields.insert(field.to_string(), value.into());
        }
        self
    }

    pub fn set_id(self, field: &str, id: RecordId) -> Self {
        self.set(field, id.into_inner())
    }

    pub fn set_opt_id(self, field: &str, id: Option<RecordId>) -> Self {
        self.set_opt(field, id.map(RecordId::into_inner))
    }

    pub fn set_datetime(self, field: &str, value: DateTime<Utc>) -> Self {
        self.set(field, value.to_rfc3339())
    }

    pub fn build(self) -> Document {
        self.fields
    }
}
