//! Request DTOs for service operations
//!
//! All request DTOs implement `Deserialize`, and `Validate` where input
//! bounds matter. The authenticated identity is never part of a request
//! body - callers pass it explicitly into every operation.

use serde::Deserialize;
use validator::Validate;

use pulse_core::RecordId;

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 2000, message = "Content must be 1-2000 characters"))]
    pub content: String,

    /// Ordered media references; over-budget URLs are truncated at the
    /// storage boundary
    #[serde(default)]
    pub media_urls: Vec<String>,
}

// ============================================================================
// Profile Requests
// ============================================================================

/// Update profile request; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: Option<String>,

    #[validate(length(min = 1, max = 64, message = "Display name must be 1-64 characters"))]
    pub display_name: Option<String>,

    #[validate(length(max = 160, message = "Bio must be at most 160 characters"))]
    pub bio: Option<String>,

    pub profile_picture: Option<String>,

    pub cover_photo: Option<String>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 500, message = "Comment must be 1-500 characters"))]
    pub content: String,
}

// ============================================================================
// Notification Requests
// ============================================================================

/// Create notification request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNotificationRequest {
    /// Stored kind string (like, comment, follow, mention, message)
    pub kind: String,
    pub target_id: RecordId,
    pub actor_id: Option<RecordId>,
    pub post_id: Option<RecordId>,
    pub comment_id: Option<RecordId>,
    pub conversation_id: Option<RecordId>,
    pub content: Option<String>,
}

// ============================================================================
// Messaging Requests
// ============================================================================

/// Create conversation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateConversationRequest {
    #[validate(length(min = 2, message = "A conversation needs at least two participants"))]
    pub participants: Vec<RecordId>,
}

/// Send message request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    pub conversation_id: RecordId,

    #[validate(length(min = 1, max = 1000, message = "Message must be 1-1000 characters"))]
    pub content: String,
}
