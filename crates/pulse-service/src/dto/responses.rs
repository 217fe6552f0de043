//! Response DTOs for service callers
//!
//! All response DTOs implement `Serialize` for JSON output. Record ids are
//! serialized as strings for JavaScript-client safety.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// User Responses
// ============================================================================

/// Compact user view (actor lines, follow lists)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

/// Full profile view
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<String>,
    pub follower_count: i64,
    pub following_count: i64,
    pub post_count: i64,
    pub created_at: DateTime<Utc>,
}

/// User row in a follower/following list, relative to the viewer
#[derive(Debug, Clone, Serialize)]
pub struct FollowUserResponse {
    pub user: UserResponse,
    pub is_following: bool,
}

// ============================================================================
// Post Responses
// ============================================================================

/// Post view
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub media: Vec<String>,
    pub like_count: i64,
    pub liked_by_viewer: bool,
    pub comment_count: i64,
    pub share_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Comment view
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Notification Responses
// ============================================================================

/// Raw notification view (creation results, admin listings)
#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub kind: String,
    pub target_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification enriched with its actor
///
/// The actor is always present: lookups that fail resolve to the
/// "Unknown User" placeholder rather than dropping the notification.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedNotificationResponse {
    pub id: String,
    pub kind: String,
    pub actor: UserResponse,
    pub action_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notifications grouped into the five fixed buckets, each newest-first
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupedNotificationsResponse {
    pub likes: Vec<EnrichedNotificationResponse>,
    pub comments: Vec<EnrichedNotificationResponse>,
    pub follows: Vec<EnrichedNotificationResponse>,
    pub mentions: Vec<EnrichedNotificationResponse>,
    pub messages: Vec<EnrichedNotificationResponse>,
}

impl GroupedNotificationsResponse {
    /// Total notifications across all buckets
    pub fn total(&self) -> usize {
        self.likes.len()
            + self.comments.len()
            + self.follows.len()
            + self.mentions.len()
            + self.messages.len()
    }
}

// ============================================================================
// Messaging Responses
// ============================================================================

/// Conversation view
#[derive(Debug, Clone, Serialize)]
pub struct ConversationResponse {
    pub id: String,
    pub participants: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    pub last_message_at: DateTime<Utc>,
    pub unread_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Message view
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub content: String,
    pub kind: String,
    pub read_by: Vec<String>,
    pub created_at: DateTime<Utc>,
}
