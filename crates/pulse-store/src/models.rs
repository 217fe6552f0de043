//! Collection layout and document ↔ entity mapping
//!
//! The hosted store's columns are camelCase text/number fields; entities are
//! the domain's view. Reads are lenient - absent fields fall back to
//! defaults rather than failing the whole row, which is how the stored data
//! behaves after schema drift.

use chrono::Utc;

use pulse_core::{
    Comment, Conversation, Message, MessageKind, Notification, NotificationKind, Post, User,
};

use crate::codec;
use crate::store::{Document, DocumentBuilder, Record};

/// Collection names in the hosted store
pub mod collections {
    pub const USERS: &str = "users";
    pub const POSTS: &str = "posts";
    pub const COMMENTS: &str = "comments";
    pub const NOTIFICATIONS: &str = "notifications";
    pub const CONVERSATIONS: &str = "conversations";
    pub const MESSAGES: &str = "messages";
}

/// Counter field names used through counter reconciliation
pub mod counter_fields {
    pub const FOLLOWERS: &str = "followersCount";
    pub const FOLLOWING: &str = "followingCount";
    pub const LIKES: &str = "likes";
    pub const COMMENTS: &str = "comments";
}

// ============================================================================
// Users
// ============================================================================

pub fn user_to_document(user: &User) -> Document {
    DocumentBuilder::new()
        .set("username", user.username.clone())
        .set("displayName", user.display_name.clone())
        .set_opt("bio", user.bio.clone())
        .set_opt("profilePicture", user.profile_picture.clone())
        .set_opt("coverPhoto", user.cover_photo.clone())
        .set("followersCount", user.follower_count)
        .set("followingCount", user.following_count)
        .set("postsCount", user.post_count)
        .set_datetime("createdAt", user.created_at)
        .build()
}

pub fn user_from_record(record: &Record) -> User {
    User {
        id: record.id,
        username: record.get_str("username").unwrap_or_default().to_string(),
        display_name: record
            .get_str("displayName")
            .unwrap_or_default()
            .to_string(),
        bio: record.get_nonempty_str("bio").map(String::from),
        profile_picture: record.get_nonempty_str("profilePicture").map(String::from),
        cover_photo: record.get_nonempty_str("coverPhoto").map(String::from),
        follower_count: record.get_i64("followersCount").unwrap_or(0),
        following_count: record.get_i64("followingCount").unwrap_or(0),
        post_count: record.get_i64("postsCount").unwrap_or(0),
        created_at: record.get_datetime_or("createdAt", Utc::now()),
    }
}

// ============================================================================
// Posts
// ============================================================================

pub fn post_to_document(post: &Post) -> Document {
    DocumentBuilder::new()
        .set_id("authorId", post.author_id)
        .set("content", post.content.clone())
        // Legacy single-image column plus the bounded delimited list
        .set_opt("imageUrl", codec::primary_media_url(&post.media))
        .set("mediaUrls", codec::encode_media_urls(&post.media))
        .set("likes", post.like_count)
        .set("isLiked", post.liked_by_viewer)
        .set("comments", post.comment_count)
        .set("shares", post.share_count)
        .set_datetime("timestamp", post.created_at)
        .build()
}

pub fn post_from_record(record: &Record) -> Post {
    Post {
        id: record.id,
        author_id: record.get_id("authorId").unwrap_or_default(),
        content: record.get_str("content").unwrap_or_default().to_string(),
        media: codec::decode_media_urls(record.get_str("mediaUrls").unwrap_or_default()),
        like_count: record.get_i64("likes").unwrap_or(0),
        liked_by_viewer: record.get_bool("isLiked").unwrap_or(false),
        comment_count: record.get_i64("comments").unwrap_or(0),
        share_count: record.get_i64("shares").unwrap_or(0),
        created_at: record.get_datetime_or("timestamp", Utc::now()),
    }
}

// ============================================================================
// Comments
// ============================================================================

pub fn comment_to_document(comment: &Comment) -> Document {
    DocumentBuilder::new()
        .set_id("postId", comment.post_id)
        .set_id("authorId", comment.author_id)
        .set("content", comment.content.clone())
        .set_datetime("timestamp", comment.created_at)
        .build()
}

pub fn comment_from_record(record: &Record) -> Comment {
    Comment {
        id: record.id,
        post_id: record.get_id("postId").unwrap_or_default(),
        author_id: record.get_id("authorId").unwrap_or_default(),
        content: record.get_str("content").unwrap_or_default().to_string(),
        created_at: record.get_datetime_or("timestamp", Utc::now()),
    }
}

// ============================================================================
// Notifications
// ============================================================================

pub fn notification_to_document(notification: &Notification) -> Document {
    DocumentBuilder::new()
        .set("type", notification.kind.as_str())
        .set_id("targetId", notification.target_id)
        .set_opt_id("actorId", notification.actor_id)
        .set_opt_id("postId", notification.post_id)
        .set_opt_id("commentId", notification.comment_id)
        .set_opt_id("conversationId", notification.conversation_id)
        .set_opt("content", notification.content.clone())
        .set("read", notification.read)
        .set_datetime("timestamp", notification.created_at)
        .build()
}

/// Map a stored notification row; `None` when the kind string is
/// unrecognized. Dropping such rows here keeps every consumer (grouping,
/// unread counts, batch mark-read) on the same five-kind view.
pub fn notification_from_record(record: &Record) -> Option<Notification> {
    let kind = NotificationKind::parse(record.get_str("type").unwrap_or_default())?;

    Some(Notification {
        id: record.id,
        kind,
        target_id: record.get_id("targetId").unwrap_or_default(),
        actor_id: record.get_id("actorId"),
        post_id: record.get_id("postId"),
        comment_id: record.get_id("commentId"),
        conversation_id: record.get_id("conversationId"),
        content: record.get_nonempty_str("content").map(String::from),
        read: record.get_bool("read").unwrap_or(false),
        created_at: record.get_datetime_or("timestamp", Utc::now()),
    })
}

// ============================================================================
// Conversations
// ============================================================================

pub fn conversation_to_document(conversation: &Conversation) -> Document {
    DocumentBuilder::new()
        .set("participants", codec::encode_id_list(&conversation.participants))
        .set_opt("lastMessage", conversation.last_message.clone())
        .set_datetime("lastMessageTime", conversation.last_message_at)
        .set("unreadCount", conversation.unread_count)
        .set_datetime("createdAt", conversation.created_at)
        .build()
}

pub fn conversation_from_record(record: &Record) -> Conversation {
    Conversation {
        id: record.id,
        participants: codec::decode_id_list(record.get_str("participants").unwrap_or_default()),
        last_message: record.get_nonempty_str("lastMessage").map(String::from),
        last_message_at: record.get_datetime_or("lastMessageTime", Utc::now()),
        unread_count: record.get_i64("unreadCount").unwrap_or(0),
        created_at: record.get_datetime_or("createdAt", Utc::now()),
    }
}

// ============================================================================
// Messages
// ============================================================================

pub fn message_to_document(message: &Message) -> Document {
    DocumentBuilder::new()
        .set_id("conversationId", message.conversation_id)
        .set_id("senderId", message.sender_id)
        .set("content", message.content.clone())
        .set("type", message.kind.as_str())
        .set("readBy", codec::encode_id_list(&message.read_by))
        .set_datetime("timestamp", message.created_at)
        .build()
}

pub fn message_from_record(record: &Record) -> Message {
    Message {
        id: record.id,
        conversation_id: record.get_id("conversationId").unwrap_or_default(),
        sender_id: record.get_id("senderId").unwrap_or_default(),
        content: record.get_str("content").unwrap_or_default().to_string(),
        kind: MessageKind::parse(record.get_str("type").unwrap_or_default()),
        read_by: codec::decode_id_list(record.get_str("readBy").unwrap_or_default()),
        created_at: record.get_datetime_or("timestamp", Utc::now()),
    }
}
