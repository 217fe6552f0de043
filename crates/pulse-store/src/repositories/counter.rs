//! Record-store implementation of CounterStore
//!
//! Raw field access only; the floor-at-zero reconciliation logic lives in
//! the service layer. The read and the write are separate round trips by
//! necessity - the store has no atomic increment.

use async_trait::async_trait;
use serde_json::Value;
use tracing::instrument;

use pulse_core::{CounterStore, RecordId, RepoResult};

use crate::store::{Document, SharedRecordStore, StoreError};

use super::error::{entity_not_found, map_store_error};

/// CounterStore over the generic record store
#[derive(Clone)]
pub struct StoreCounterRepository {
    store: SharedRecordStore,
}

impl StoreCounterRepository {
    pub fn new(store: SharedRecordStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CounterStore for StoreCounterRepository {
    #[instrument(skip(self))]
    async fn read_counter(
        &self,
        collection: &str,
        id: RecordId,
        field: &str,
    ) -> RepoResult<Option<i64>> {
        let record = self
            .store
            .get_by_id(collection, id)
            .await
            .map_err(map_store_error)?;

        // Record present but field absent reads as zero
        Ok(record.map(|record| record.get_i64(field).unwrap_or(0)))
    }

    #[instrument(skip(self))]
    async fn write_counter(
        &self,
        collection: &str,
        id: RecordId,
        field: &str,
        value: i64,
    ) -> RepoResult<()> {
        let mut patch = Document::new();
        patch.insert(field.to_string(), Value::from(value));

        self.store
            .update(collection, id, patch)
            .await
            .map_err(|e| match e {
                // The record vanished between the read and the write
                StoreError::RecordNotFound { .. } => entity_not_found(collection, id),
                other => map_store_error(other),
            })?;

        Ok(())
    }
}
