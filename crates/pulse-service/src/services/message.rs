//! Message service
//!
//! Plain CRUD messaging: no delivery guarantees and no real-time transport.
//! Sending denormalizes the conversation's last-message fields; read state
//! is a per-message reader set.

use tracing::{info, instrument};
use validator::Validate;

use pulse_core::{Message, RecordId};

use crate::dto::{MessageResponse, SendMessageRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Messages in a conversation, oldest first
    #[instrument(skip(self))]
    pub async fn list(&self, conversation_id: RecordId) -> ServiceResult<Vec<MessageResponse>> {
        self.require_conversation(conversation_id).await?;

        let messages = self.ctx.message_repo().list_by_conversation(conversation_id).await?;
        Ok(messages.iter().map(MessageResponse::from).collect())
    }

    /// Send a message into a conversation
    ///
    /// The sender must be a participant and is pre-seeded into the new
    /// message's read-by set.
    #[instrument(skip(self, request))]
    pub async fn send(
        &self,
        sender_id: RecordId,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        request.validate()?;

        let conversation = self.require_conversation(request.conversation_id).await?;
        if !conversation.has_participant(sender_id) {
            return Err(ServiceError::validation(
                "sender is not a participant of this conversation",
            ));
        }

        let message = Message::new(
            RecordId::default(),
            conversation.id,
            sender_id,
            request.content,
        );
        let created = self.ctx.message_repo().create(&message).await?;

        self.ctx
            .conversation_repo()
            .update_last_message(
                conversation.id,
                &created.content,
                conversation.unread_count + 1,
            )
            .await?;

        info!(
            message_id = %created.id,
            conversation_id = %conversation.id,
            sender_id = %sender_id,
            "Message sent"
        );

        Ok(MessageResponse::from(&created))
    }

    /// Mark every message in a conversation as read by `reader_id`
    ///
    /// Idempotent: messages the reader has already seen are left untouched.
    /// Returns how many messages were newly marked.
    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        conversation_id: RecordId,
        reader_id: RecordId,
    ) -> ServiceResult<u64> {
        self.require_conversation(conversation_id).await?;

        let messages = self.ctx.message_repo().list_by_conversation(conversation_id).await?;
        let mut marked = 0;

        for mut message in messages {
            if message.mark_read_by(reader_id) {
                self.ctx
                    .message_repo()
                    .update_read_by(message.id, &message.read_by)
                    .await?;
                marked += 1;
            }
        }

        if marked > 0 {
            info!(
                conversation_id = %conversation_id,
                reader_id = %reader_id,
                count = marked,
                "Messages marked read"
            );
        }

        Ok(marked)
    }

    async fn require_conversation(
        &self,
        conversation_id: RecordId,
    ) -> ServiceResult<pulse_core::Conversation> {
        self.ctx
            .conversation_repo()
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Conversation", conversation_id.to_string()))
    }
}
