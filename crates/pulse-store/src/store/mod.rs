//! Generic record store - the adapter boundary to the hosted backend
//!
//! Every collection is a bag of JSON documents keyed by a store-assigned
//! integer id. The store is assumed reliable but non-transactional: there is
//! no multi-record atomicity and no server-side increment.

mod http;
mod memory;
mod query;
mod record;

use async_trait::async_trait;
use std::sync::Arc;

use pulse_core::RecordId;

pub use http::{HttpRecordStore, HttpStoreConfig};
pub use memory::MemoryRecordStore;
pub use query::{Filter, FilterOp, Query, Sort, SortDirection};
pub use record::{Document, DocumentBuilder, Record};

/// Errors surfaced by a record store implementation
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record {id} not found in collection '{collection}'")]
    RecordNotFound { collection: String, id: RecordId },

    #[error("record store backend failure: {0}")]
    Backend(String),
}

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Shared handle to a record store
pub type SharedRecordStore = Arc<dyn RecordStore>;

/// Generic CRUD over named collections
///
/// Retry and backoff are the caller's concern; implementations report
/// failures as-is.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// List records matching a query
    async fn list(&self, collection: &str, query: Query) -> StoreResult<Vec<Record>>;

    /// Fetch a single record by id
    async fn get_by_id(&self, collection: &str, id: RecordId) -> StoreResult<Option<Record>>;

    /// Create a record; the store assigns and returns the id
    async fn create(&self, collection: &str, fields: Document) -> StoreResult<Record>;

    /// Merge partial fields into an existing record
    async fn update(&self, collection: &str, id: RecordId, fields: Document)
        -> StoreResult<Record>;

    /// Delete records by id; missing ids are skipped. Returns the number of
    /// records actually removed.
    async fn delete(&self, collection: &str, ids: &[RecordId]) -> StoreResult<u64>;
}
