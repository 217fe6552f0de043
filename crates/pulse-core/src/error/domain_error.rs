//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::RecordId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(RecordId),

    #[error("Post not found: {0}")]
    PostNotFound(RecordId),

    #[error("Comment not found: {0}")]
    CommentNotFound(RecordId),

    #[error("Notification not found: {0}")]
    NotificationNotFound(RecordId),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(RecordId),

    #[error("Message not found: {0}")]
    MessageNotFound(RecordId),

    // =========================================================================
    // Invalid Operations
    // =========================================================================
    #[error("Cannot follow yourself")]
    SelfFollow,

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Record store failure: {0}")]
    StoreFailure(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",
            Self::ConversationNotFound(_) => "UNKNOWN_CONVERSATION",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",

            // Invalid Operations
            Self::SelfFollow => "SELF_FOLLOW",
            Self::InvalidIdentifier(_) => "INVALID_IDENTIFIER",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Infrastructure
            Self::StoreFailure(_) => "STORE_FAILURE",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::PostNotFound(_)
                | Self::CommentNotFound(_)
                | Self::NotificationNotFound(_)
                | Self::ConversationNotFound(_)
                | Self::MessageNotFound(_)
        )
    }

    /// Check if this is an invalid-operation / validation error
    pub fn is_invalid_operation(&self) -> bool {
        matches!(
            self,
            Self::SelfFollow
                | Self::InvalidIdentifier(_)
                | Self::ValidationError(_)
                | Self::ContentTooLong { .. }
        )
    }

    /// Check if this is a store failure (retryable from the caller's view)
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::StoreFailure(_))
    }
}
