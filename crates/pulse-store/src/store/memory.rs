//! In-memory record store
//!
//! Backs local development and the test suite. Collections live behind a
//! single `parking_lot` lock; ids come from one atomic counter shared across
//! collections, matching the hosted store's globally unique ids.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use pulse_core::RecordId;

use super::{Document, Query, Record, RecordStore, SortDirection, StoreError, StoreResult};

/// In-process record store
pub struct MemoryRecordStore {
    collections: RwLock<HashMap<String, BTreeMap<i64, Document>>>,
    next_id: AtomicI64,
    /// Artificial per-call latency, mimicking the hosted store's cold start.
    /// `None` in tests.
    latency: Option<Duration>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            latency: None,
        }
    }

    /// Store with simulated latency on every call
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: (!latency.is_zero()).then_some(latency),
            ..Self::new()
        }
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    /// Number of records currently held in a collection
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let collections = self.collections.read();
        f.debug_struct("MemoryRecordStore")
            .field("collections", &collections.len())
            .field(
                "records",
                &collections.values().map(BTreeMap::len).sum::<usize>(),
            )
            .finish()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list(&self, collection: &str, query: Query) -> StoreResult<Vec<Record>> {
        self.simulate_latency().await;

        let collections = self.collections.read();
        let Some(records) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<Record> = records
            .iter()
            .filter(|(_, fields)| {
                query
                    .filters
                    .iter()
                    .all(|filter| filter.matches(fields.get(&filter.field)))
            })
            .map(|(&id, fields)| Record::new(RecordId::new(id), fields.clone()))
            .collect();
        drop(collections);

        if let Some(sort) = &query.sort {
            matched.sort_by(|a, b| {
                let ordering = compare_values(
                    a.fields.get(&sort.field),
                    b.fields.get(&sort.field),
                );
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        let offset = usize::try_from(query.offset).unwrap_or(0);
        let matched = matched.into_iter().skip(offset);
        let matched = match query.limit {
            Some(limit) => matched.take(usize::try_from(limit).unwrap_or(0)).collect(),
            None => matched.collect(),
        };

        Ok(matched)
    }

    async fn get_by_id(&self, collection: &str, id: RecordId) -> StoreResult<Option<Record>> {
        self.simulate_latency().await;

        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|records| records.get(&id.into_inner()))
            .map(|fields| Record::new(id, fields.clone())))
    }

    async fn create(&self, collection: &str, fields: Document) -> StoreResult<Record> {
        self.simulate_latency().await;

        let id = self.allocate_id();
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id, fields.clone());

        Ok(Record::new(RecordId::new(id), fields))
    }

    async fn update(
        &self,
        collection: &str,
        id: RecordId,
        fields: Document,
    ) -> StoreResult<Record> {
        self.simulate_latency().await;

        let mut collections = self.collections.write();
        let existing = collections
            .get_mut(collection)
            .and_then(|records| records.get_mut(&id.into_inner()))
            .ok_or_else(|| StoreError::RecordNotFound {
                collection: collection.to_string(),
                id,
            })?;

        for (field, value) in fields {
            if value == Value::Null {
                existing.remove(&field);
            } else {
                existing.insert(field, value);
            }
        }

        Ok(Record::new(id, existing.clone()))
    }

    async fn delete(&self, collection: &str, ids: &[RecordId]) -> StoreResult<u64> {
        self.simulate_latency().await;

        let mut collections = self.collections.write();
        let Some(records) = collections.get_mut(collection) else {
            return Ok(0);
        };

        let mut removed = 0;
        for id in ids {
            if records.remove(&id.into_inner()).is_some() {
                removed += 1;
            }
        }

        Ok(removed)
    }
}

/// Ordering over JSON field values: numbers numerically, strings
/// lexicographically (RFC 3339 timestamps order correctly this way), absent
/// values last
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DocumentBuilder;
    use serde_json::json;

    fn doc(author: i64, timestamp: &str) -> Document {
        DocumentBuilder::new()
            .set("authorId", author)
            .set("timestamp", timestamp)
            .build()
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = MemoryRecordStore::new();
        let a = store.create("posts", doc(1, "2024-01-01T00:00:00Z")).await.unwrap();
        let b = store.create("posts", doc(1, "2024-01-02T00:00:00Z")).await.unwrap();
        assert!(b.id > a.id);
        assert_eq!(store.len("posts"), 2);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let store = MemoryRecordStore::new();
        let created = store.create("posts", doc(1, "2024-01-01T00:00:00Z")).await.unwrap();

        let fetched = store.get_by_id("posts", created.id).await.unwrap();
        assert_eq!(fetched, Some(created));

        let missing = store.get_by_id("posts", RecordId::new(999)).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_filters_and_sorts() {
        let store = MemoryRecordStore::new();
        store.create("posts", doc(1, "2024-01-01T00:00:00Z")).await.unwrap();
        store.create("posts", doc(2, "2024-01-03T00:00:00Z")).await.unwrap();
        store.create("posts", doc(1, "2024-01-02T00:00:00Z")).await.unwrap();

        let query = Query::new().filter_eq("authorId", 1).sort_desc("timestamp");
        let records = store.list("posts", query).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get_str("timestamp"), Some("2024-01-02T00:00:00Z"));
    }

    #[tokio::test]
    async fn test_list_paging_window() {
        let store = MemoryRecordStore::new();
        for day in 1..=5 {
            store
                .create("posts", doc(1, &format!("2024-01-0{day}T00:00:00Z")))
                .await
                .unwrap();
        }

        let query = Query::new().sort_desc("timestamp").limit(2).offset(2);
        let records = store.list("posts", query).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get_str("timestamp"), Some("2024-01-03T00:00:00Z"));
    }

    #[tokio::test]
    async fn test_update_merges_and_removes_null() {
        let store = MemoryRecordStore::new();
        let created = store.create("posts", doc(1, "2024-01-01T00:00:00Z")).await.unwrap();

        let patch = DocumentBuilder::new()
            .set("likes", 5)
            .set("timestamp", Value::Null)
            .build();
        let updated = store.update("posts", created.id, patch).await.unwrap();

        assert_eq!(updated.get_i64("likes"), Some(5));
        assert_eq!(updated.get_i64("authorId"), Some(1));
        assert!(updated.get_str("timestamp").is_none());
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let store = MemoryRecordStore::new();
        let err = store
            .update("posts", RecordId::new(42), Document::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::RecordNotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_skips_missing_ids() {
        let store = MemoryRecordStore::new();
        let created = store.create("posts", doc(1, "2024-01-01T00:00:00Z")).await.unwrap();

        let removed = store
            .delete("posts", &[created.id, RecordId::new(999)])
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert!(store.is_empty("posts"));
    }

    #[tokio::test]
    async fn test_filter_matches_stringified_reference() {
        let store = MemoryRecordStore::new();
        let mut fields = Document::new();
        fields.insert("targetId".to_string(), json!("7"));
        store.create("notifications", fields).await.unwrap();

        let query = Query::new().filter_eq("targetId", 7);
        let records = store.list("notifications", query).await.unwrap();
        assert_eq!(records.len(), 1);
    }
}
