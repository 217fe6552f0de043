//! Record-store implementation of MessageRepository

use async_trait::async_trait;
use tracing::instrument;

use pulse_core::{DomainError, Message, MessageRepository, RecordId, RepoResult};

use crate::codec;
use crate::models::{self, collections};
use crate::store::{DocumentBuilder, Query, SharedRecordStore};

use super::error::{map_missing, map_store_error};

/// MessageRepository over the generic record store
#[derive(Clone)]
pub struct StoreMessageRepository {
    store: SharedRecordStore,
}

impl StoreMessageRepository {
    pub fn new(store: SharedRecordStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MessageRepository for StoreMessageRepository {
    #[instrument(skip(self))]
    async fn list_by_conversation(&self, conversation_id: RecordId) -> RepoResult<Vec<Message>> {
        let records = self
            .store
            .list(
                collections::MESSAGES,
                Query::new()
                    .filter_eq("conversationId", conversation_id.into_inner())
                    .sort_asc("timestamp"),
            )
            .await
            .map_err(map_store_error)?;

        Ok(records.iter().map(models::message_from_record).collect())
    }

    #[instrument(skip(self, message))]
    async fn create(&self, message: &Message) -> RepoResult<Message> {
        let record = self
            .store
            .create(collections::MESSAGES, models::message_to_document(message))
            .await
            .map_err(map_store_error)?;

        Ok(models::message_from_record(&record))
    }

    #[instrument(skip(self, read_by))]
    async fn update_read_by(&self, id: RecordId, read_by: &[RecordId]) -> RepoResult<()> {
        let patch = DocumentBuilder::new()
            .set("readBy", codec::encode_id_list(read_by))
            .build();

        self.store
            .update(collections::MESSAGES, id, patch)
            .await
            .map_err(|e| map_missing(e, || DomainError::MessageNotFound(id)))?;

        Ok(())
    }
}
