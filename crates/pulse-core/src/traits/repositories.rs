//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; the storage layer provides the
//! implementation over the generic record store. All ports are object-safe
//! so the service context can hold them as `Arc<dyn ...>`.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::entities::{Comment, Conversation, Message, Notification, Post, User};
use crate::error::DomainError;
use crate::value_objects::RecordId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// One-based page request
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page: page.max(1),
            size: size.max(0),
        }
    }

    /// Record offset for the store's paging window
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<User>>;

    /// Find several users by ID; missing ids are skipped
    async fn find_many(&self, ids: &[RecordId]) -> RepoResult<Vec<User>>;

    /// List all users
    async fn list(&self) -> RepoResult<Vec<User>>;

    /// First user by id order. Demo stand-in for the authenticated profile;
    /// only the composition root should call this.
    async fn first(&self) -> RepoResult<Option<User>>;

    /// Create a new user; the store assigns the id
    async fn create(&self, user: &User) -> RepoResult<User>;

    /// Update an existing user's profile fields
    async fn update(&self, user: &User) -> RepoResult<()>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Post>>;

    /// Global feed page, reverse-chronological
    async fn list_page(&self, page: PageRequest) -> RepoResult<Vec<Post>>;

    /// Posts by a single author, reverse-chronological
    async fn list_by_author(&self, author_id: RecordId, page: PageRequest)
        -> RepoResult<Vec<Post>>;

    /// Posts by any of the given authors, reverse-chronological
    async fn list_by_authors(
        &self,
        author_ids: &[RecordId],
        page: PageRequest,
    ) -> RepoResult<Vec<Post>>;

    /// Most recent posts, up to `limit` (trending candidate window)
    async fn list_recent(&self, limit: i64) -> RepoResult<Vec<Post>>;

    /// Create a new post; the store assigns the id
    async fn create(&self, post: &Post) -> RepoResult<Post>;

    /// Set the viewer-liked flag without touching counters
    async fn set_viewer_liked(&self, id: RecordId, liked: bool) -> RepoResult<()>;

    /// Delete a post
    async fn delete(&self, id: RecordId) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Comment>>;

    /// Comments on a post, oldest first
    async fn list_by_post(&self, post_id: RecordId) -> RepoResult<Vec<Comment>>;

    /// Create a new comment; the store assigns the id
    async fn create(&self, comment: &Comment) -> RepoResult<Comment>;

    /// Delete a comment
    async fn delete(&self, id: RecordId) -> RepoResult<()>;
}

// ============================================================================
// Notification Repository
// ============================================================================

/// Options for notification queries
#[derive(Debug, Clone, Copy)]
pub struct NotificationQuery {
    pub unread_only: bool,
    pub limit: i64,
    pub offset: i64,
}

impl Default for NotificationQuery {
    fn default() -> Self {
        Self {
            unread_only: false,
            limit: 20,
            offset: 0,
        }
    }
}

impl NotificationQuery {
    /// Query restricted to unread notifications
    pub fn unread() -> Self {
        Self {
            unread_only: true,
            ..Self::default()
        }
    }
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Find notification by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Notification>>;

    /// Notifications targeting a user, newest first
    async fn list_for_user(
        &self,
        user_id: RecordId,
        query: NotificationQuery,
    ) -> RepoResult<Vec<Notification>>;

    /// Create a new notification; the store assigns the id
    async fn create(&self, notification: &Notification) -> RepoResult<Notification>;

    /// Set the read flag on one notification
    async fn set_read(&self, id: RecordId, read: bool) -> RepoResult<()>;

    /// Set the read flag on a batch; returns how many records were written
    async fn set_read_many(&self, ids: &[RecordId], read: bool) -> RepoResult<u64>;

    /// Delete notifications; returns how many records were removed
    async fn delete(&self, ids: &[RecordId]) -> RepoResult<u64>;
}

// ============================================================================
// Conversation Repository
// ============================================================================

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Find conversation by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Conversation>>;

    /// Conversations a user takes part in, most recent message first
    async fn list_for_user(&self, user_id: RecordId) -> RepoResult<Vec<Conversation>>;

    /// Create a new conversation; the store assigns the id
    async fn create(&self, conversation: &Conversation) -> RepoResult<Conversation>;

    /// Update denormalized last-message fields
    async fn update_last_message(
        &self,
        id: RecordId,
        last_message: &str,
        unread_count: i64,
    ) -> RepoResult<()>;

    /// Delete a conversation
    async fn delete(&self, id: RecordId) -> RepoResult<()>;
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Messages in a conversation, oldest first
    async fn list_by_conversation(&self, conversation_id: RecordId) -> RepoResult<Vec<Message>>;

    /// Create a new message; the store assigns the id
    async fn create(&self, message: &Message) -> RepoResult<Message>;

    /// Replace a message's read-by set
    async fn update_read_by(&self, id: RecordId, read_by: &[RecordId]) -> RepoResult<()>;
}

// ============================================================================
// Follow Store
// ============================================================================

/// Directed follow-edge set
///
/// Implementations must be safe under concurrent read/insert/delete; the
/// default backing is an in-memory concurrent map, but a persisted edge
/// table satisfies the same contract. The raw edge structure is never
/// exposed - only these operations.
#[async_trait]
pub trait FollowStore: Send + Sync {
    /// Insert an edge. Returns true if the edge was not present before.
    async fn insert(&self, follower_id: RecordId, target_id: RecordId) -> RepoResult<bool>;

    /// Remove an edge. Returns true if the edge existed.
    async fn remove(&self, follower_id: RecordId, target_id: RecordId) -> RepoResult<bool>;

    /// Check edge membership
    async fn contains(&self, follower_id: RecordId, target_id: RecordId) -> RepoResult<bool>;

    /// Everyone `user_id` follows
    async fn following_of(&self, user_id: RecordId) -> RepoResult<HashSet<RecordId>>;

    /// Everyone following `user_id` (reverse scan over all edges)
    async fn followers_of(&self, user_id: RecordId) -> RepoResult<HashSet<RecordId>>;
}

// ============================================================================
// Counter Store
// ============================================================================

/// Raw access to a denormalized counter field on a stored record
///
/// The reconciliation logic (floor at zero, read-modify-write) lives in the
/// service layer; this port only reads and writes the field. The store has
/// no atomic increment, so the read and the write are separate round trips.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Read a counter field. `Ok(None)` means the record does not exist; a
    /// record without the field reads as `Some(0)`.
    async fn read_counter(
        &self,
        collection: &str,
        id: RecordId,
        field: &str,
    ) -> RepoResult<Option<i64>>;

    /// Write a counter field back
    async fn write_counter(
        &self,
        collection: &str,
        id: RecordId,
        field: &str,
        value: i64,
    ) -> RepoResult<()>;
}
