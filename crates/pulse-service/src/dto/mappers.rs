//! Entity → response mappers

use pulse_core::{Comment, Conversation, Message, Notification, Post, User};

use super::responses::{
    CommentResponse, ConversationResponse, EnrichedNotificationResponse, MessageResponse,
    NotificationResponse, PostResponse, ProfileResponse, UserResponse,
};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            profile_picture: user.profile_picture.clone(),
        }
    }
}

impl From<&User> for ProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            bio: user.bio.clone(),
            profile_picture: user.profile_picture.clone(),
            cover_photo: user.cover_photo.clone(),
            follower_count: user.follower_count,
            following_count: user.following_count,
            post_count: user.post_count,
            created_at: user.created_at,
        }
    }
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            author_id: post.author_id.to_string(),
            content: post.content.clone(),
            media: post.media.clone(),
            like_count: post.like_count,
            liked_by_viewer: post.liked_by_viewer,
            comment_count: post.comment_count,
            share_count: post.share_count,
            created_at: post.created_at,
        }
    }
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            author_id: comment.author_id.to_string(),
            content: comment.content.clone(),
            created_at: comment.created_at,
        }
    }
}

impl From<&Notification> for NotificationResponse {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id.to_string(),
            kind: notification.kind.to_string(),
            target_id: notification.target_id.to_string(),
            actor_id: notification.actor_id.map(|id| id.to_string()),
            post_id: notification.post_id.map(|id| id.to_string()),
            comment_id: notification.comment_id.map(|id| id.to_string()),
            conversation_id: notification.conversation_id.map(|id| id.to_string()),
            content: notification.content.clone(),
            read: notification.read,
            created_at: notification.created_at,
        }
    }
}

impl EnrichedNotificationResponse {
    /// Attach a resolved (or placeholder) actor to a notification
    pub fn from_parts(notification: &Notification, actor: &User) -> Self {
        Self {
            id: notification.id.to_string(),
            kind: notification.kind.to_string(),
            actor: UserResponse::from(actor),
            action_text: notification.action_text().to_string(),
            preview: notification.preview(),
            post_id: notification.post_id.map(|id| id.to_string()),
            comment_id: notification.comment_id.map(|id| id.to_string()),
            conversation_id: notification.conversation_id.map(|id| id.to_string()),
            read: notification.read,
            created_at: notification.created_at,
        }
    }
}

impl From<&Conversation> for ConversationResponse {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id.to_string(),
            participants: conversation
                .participants
                .iter()
                .map(ToString::to_string)
                .collect(),
            last_message: conversation.last_message.clone(),
            last_message_at: conversation.last_message_at,
            unread_count: conversation.unread_count,
            created_at: conversation.created_at,
        }
    }
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.to_string(),
            conversation_id: message.conversation_id.to_string(),
            sender_id: message.sender_id.to_string(),
            content: message.content.clone(),
            kind: message.kind.as_str().to_string(),
            read_by: message.read_by.iter().map(ToString::to_string).collect(),
            created_at: message.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::{NotificationKind, RecordId};

    #[test]
    fn test_user_response_mapping() {
        let user = User::new(RecordId::new(1), "jade".to_string(), "Jade".to_string());
        let response = UserResponse::from(&user);
        assert_eq!(response.id, "1");
        assert_eq!(response.username, "jade");
    }

    #[test]
    fn test_enriched_notification_with_placeholder_actor() {
        let notification =
            Notification::new(RecordId::new(5), NotificationKind::Like, RecordId::new(1));
        let actor = User::unknown(RecordId::new(0));

        let response = EnrichedNotificationResponse::from_parts(&notification, &actor);
        assert_eq!(response.actor.display_name, "Unknown User");
        assert_eq!(response.action_text, "liked your post");
        assert_eq!(response.kind, "like");
    }
}
