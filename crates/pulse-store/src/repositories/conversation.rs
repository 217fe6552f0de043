//! Record-store implementation of ConversationRepository

use async_trait::async_trait;
use chrono::Utc;
use tracing::instrument;

use pulse_core::{Conversation, ConversationRepository, DomainError, RecordId, RepoResult};

use crate::models::{self, collections};
use crate::store::{DocumentBuilder, Query, SharedRecordStore};

use super::error::{map_missing, map_store_error};

/// ConversationRepository over the generic record store
///
/// Participant membership cannot be expressed as a store filter (the column
/// is delimited text), so `list_for_user` fetches the sorted collection and
/// filters after decoding. Conversation counts per user are small.
#[derive(Clone)]
pub struct StoreConversationRepository {
    store: SharedRecordStore,
}

impl StoreConversationRepository {
    pub fn new(store: SharedRecordStore) -> Self {
        Self { store }
    }

    async fn list_sorted(&self) -> RepoResult<Vec<Conversation>> {
        let records = self
            .store
            .list(
                collections::CONVERSATIONS,
                Query::new().sort_desc("lastMessageTime"),
            )
            .await
            .map_err(map_store_error)?;

        Ok(records.iter().map(models::conversation_from_record).collect())
    }
}

#[async_trait]
impl ConversationRepository for StoreConversationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Conversation>> {
        let record = self
            .store
            .get_by_id(collections::CONVERSATIONS, id)
            .await
            .map_err(map_store_error)?;

        Ok(record.as_ref().map(models::conversation_from_record))
    }

    #[instrument(skip(self))]
    async fn list_for_user(&self, user_id: RecordId) -> RepoResult<Vec<Conversation>> {
        let conversations = self.list_sorted().await?;

        Ok(conversations
            .into_iter()
            .filter(|conversation| conversation.has_participant(user_id))
            .collect())
    }

    #[instrument(skip(self, conversation))]
    async fn create(&self, conversation: &Conversation) -> RepoResult<Conversation> {
        let record = self
            .store
            .create(
                collections::CONVERSATIONS,
                models::conversation_to_document(conversation),
            )
            .await
            .map_err(map_store_error)?;

        Ok(models::conversation_from_record(&record))
    }

    #[instrument(skip(self, last_message))]
    async fn update_last_message(
        &self,
        id: RecordId,
        last_message: &str,
        unread_count: i64,
    ) -> RepoResult<()> {
        let patch = DocumentBuilder::new()
            .set("lastMessage", last_message)
            .set_datetime("lastMessageTime", Utc::now())
            .set("unreadCount", unread_count)
            .build();

        self.store
            .update(collections::CONVERSATIONS, id, patch)
            .await
            .map_err(|e| map_missing(e, || DomainError::ConversationNotFound(id)))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let removed = self
            .store
            .delete(collections::CONVERSATIONS, &[id])
            .await
            .map_err(map_store_error)?;

        if removed == 0 {
            return Err(DomainError::ConversationNotFound(id));
        }

        Ok(())
    }
}
