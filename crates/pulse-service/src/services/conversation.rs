//! Conversation service

use tracing::{info, instrument};
use validator::Validate;

use pulse_core::{Conversation, RecordId};

use crate::dto::{ConversationResponse, CreateConversationRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Conversation service
pub struct ConversationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConversationService<'a> {
    /// Create a new ConversationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Conversations a user takes part in, most recent message first
    #[instrument(skip(self))]
    pub async fn list_for_user(&self, user_id: RecordId) -> ServiceResult<Vec<ConversationResponse>> {
        let conversations = self.ctx.conversation_repo().list_for_user(user_id).await?;
        Ok(conversations.iter().map(ConversationResponse::from).collect())
    }

    /// Get a conversation by id
    #[instrument(skip(self))]
    pub async fn get(&self, id: RecordId) -> ServiceResult<ConversationResponse> {
        let conversation = self
            .ctx
            .conversation_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Conversation", id.to_string()))?;

        Ok(ConversationResponse::from(&conversation))
    }

    /// Find the conversation with exactly this participant set
    #[instrument(skip(self, participant_ids))]
    pub async fn find_by_participants(
        &self,
        participant_ids: &[RecordId],
    ) -> ServiceResult<Option<ConversationResponse>> {
        let Some(&first) = participant_ids.first() else {
            return Ok(None);
        };

        let conversations = self.ctx.conversation_repo().list_for_user(first).await?;
        Ok(conversations
            .iter()
            .find(|conversation| conversation.same_participants(participant_ids))
            .map(ConversationResponse::from))
    }

    /// Create a conversation, reusing an existing one with the same
    /// participant set instead of duplicating it
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        request: CreateConversationRequest,
    ) -> ServiceResult<ConversationResponse> {
        request.validate()?;

        if let Some(existing) = self.find_by_participants(&request.participants).await? {
            return Ok(existing);
        }

        let conversation = Conversation::new(RecordId::default(), request.participants);
        let created = self.ctx.conversation_repo().create(&conversation).await?;
        info!(conversation_id = %created.id, "Conversation created");

        Ok(ConversationResponse::from(&created))
    }

    /// Delete a conversation
    #[instrument(skip(self))]
    pub async fn delete(&self, id: RecordId) -> ServiceResult<()> {
        self.ctx.conversation_repo().delete(id).await?;
        info!(conversation_id = %id, "Conversation deleted");
        Ok(())
    }
}
