//! Service context - dependency container for services
//!
//! Holds the repositories, the follow graph, the counter store, and feed
//! tuning. Services borrow this container; constructing it once per process
//! (or per request scope) is an explicit composition-root decision - there
//! is no module-level singleton anywhere.

use std::sync::Arc;

use pulse_common::FeedConfig;
use pulse_core::traits::{
    CommentRepository, ConversationRepository, CounterStore, FollowStore, MessageRepository,
    NotificationRepository, PostRepository, UserRepository,
};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Record-store-backed repositories
/// - The follow graph
/// - Raw counter field access for reconciliation
/// - Feed composition tuning
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    conversation_repo: Arc<dyn ConversationRepository>,
    message_repo: Arc<dyn MessageRepository>,
    follow_store: Arc<dyn FollowStore>,
    counter_store: Arc<dyn CounterStore>,
    feed_config: FeedConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        post_repo: Arc<dyn PostRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        conversation_repo: Arc<dyn ConversationRepository>,
        message_repo: Arc<dyn MessageRepository>,
        follow_store: Arc<dyn FollowStore>,
        counter_store: Arc<dyn CounterStore>,
        feed_config: FeedConfig,
    ) -> Self {
        Self {
            user_repo,
            post_repo,
            comment_repo,
            notification_repo,
            conversation_repo,
            message_repo,
            follow_store,
            counter_store,
            feed_config,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the notification repository
    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    /// Get the conversation repository
    pub fn conversation_repo(&self) -> &dyn ConversationRepository {
        self.conversation_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    // === Graph & Counters ===

    /// Get the follow graph
    pub fn follow_store(&self) -> &dyn FollowStore {
        self.follow_store.as_ref()
    }

    /// Get the counter store
    pub fn counter_store(&self) -> &dyn CounterStore {
        self.counter_store.as_ref()
    }

    // === Tuning ===

    /// Get the feed composition tuning
    pub fn feed_config(&self) -> &FeedConfig {
        &self.feed_config
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("feed_config", &self.feed_config)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    conversation_repo: Option<Arc<dyn ConversationRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    follow_store: Option<Arc<dyn FollowStore>>,
    counter_store: Option<Arc<dyn CounterStore>>,
    feed_config: Option<FeedConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn conversation_repo(mut self, repo: Arc<dyn ConversationRepository>) -> Self {
        self.conversation_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn follow_store(mut self, store: Arc<dyn FollowStore>) -> Self {
        self.follow_store = Some(store);
        self
    }

    pub fn counter_store(mut self, store: Arc<dyn CounterStore>) -> Self {
        self.counter_store = Some(store);
        self
    }

    pub fn feed_config(mut self, config: FeedConfig) -> Self {
        self.feed_config = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::internal("user_repo is required"))?,
            self.post_repo
                .ok_or_else(|| ServiceError::internal("post_repo is required"))?,
            self.comment_repo
                .ok_or_else(|| ServiceError::internal("comment_repo is required"))?,
            self.notification_repo
                .ok_or_else(|| ServiceError::internal("notification_repo is required"))?,
            self.conversation_repo
                .ok_or_else(|| ServiceError::internal("conversation_repo is required"))?,
            self.message_repo
                .ok_or_else(|| ServiceError::internal("message_repo is required"))?,
            self.follow_store
                .ok_or_else(|| ServiceError::internal("follow_store is required"))?,
            self.counter_store
                .ok_or_else(|| ServiceError::internal("counter_store is required"))?,
            self.feed_config.unwrap_or_default(),
        ))
    }
}
