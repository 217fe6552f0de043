//! Test fixtures: a fully wired service context over the memory store

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use pulse_core::{
    DomainError, Notification, NotificationKind, NotificationRepository, PageRequest, Post,
    PostRepository, RecordId, RepoResult, User, UserRepository,
};
use pulse_service::{ServiceContext, ServiceContextBuilder};
use pulse_store::{
    InMemoryFollowGraph, MemoryRecordStore, SharedRecordStore, StoreCommentRepository,
    StoreConversationRepository, StoreCounterRepository, StoreMessageRepository,
    StoreNotificationRepository, StorePostRepository, StoreUserRepository,
};

/// A wired service context plus direct handles to the backing store
pub struct TestApp {
    pub ctx: ServiceContext,
    pub store: Arc<MemoryRecordStore>,
}

impl TestApp {
    /// Build a context over a fresh memory store
    pub fn new() -> Self {
        let store = Arc::new(MemoryRecordStore::new());
        let ctx = Self::context_with_post_repo(
            Arc::clone(&store),
            Arc::new(StorePostRepository::new(shared(&store))),
        );
        Self { ctx, store }
    }

    /// Build a context whose post repository is wrapped by `wrap`
    pub fn with_post_repo<F>(wrap: F) -> Self
    where
        F: FnOnce(Arc<dyn PostRepository>) -> Arc<dyn PostRepository>,
    {
        let store = Arc::new(MemoryRecordStore::new());
        let inner: Arc<dyn PostRepository> = Arc::new(StorePostRepository::new(shared(&store)));
        let ctx = Self::context_with_post_repo(Arc::clone(&store), wrap(inner));
        Self { ctx, store }
    }

    fn context_with_post_repo(
        store: Arc<MemoryRecordStore>,
        post_repo: Arc<dyn PostRepository>,
    ) -> ServiceContext {
        ServiceContextBuilder::new()
            .user_repo(Arc::new(StoreUserRepository::new(shared(&store))))
            .post_repo(post_repo)
            .comment_repo(Arc::new(StoreCommentRepository::new(shared(&store))))
            .notification_repo(Arc::new(StoreNotificationRepository::new(shared(&store))))
            .conversation_repo(Arc::new(StoreConversationRepository::new(shared(&store))))
            .message_repo(Arc::new(StoreMessageRepository::new(shared(&store))))
            .follow_store(Arc::new(InMemoryFollowGraph::new()))
            .counter_store(Arc::new(StoreCounterRepository::new(shared(&store))))
            .build()
            .expect("test context build")
    }

    /// Seed a user
    pub async fn user(&self, username: &str) -> User {
        let user = User::new(
            RecordId::default(),
            username.to_string(),
            username.to_string(),
        );
        self.ctx.user_repo().create(&user).await.expect("seed user")
    }

    /// Seed a post with an explicit creation timestamp
    pub async fn post_at(
        &self,
        author_id: RecordId,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> Post {
        let mut post = Post::new(RecordId::default(), author_id, content.to_string());
        post.created_at = created_at;
        self.ctx.post_repo().create(&post).await.expect("seed post")
    }

    /// Seed a notification with an explicit creation timestamp
    pub async fn notification_at(
        &self,
        kind: NotificationKind,
        target_id: RecordId,
        actor_id: Option<RecordId>,
        created_at: DateTime<Utc>,
    ) -> Notification {
        let mut notification = Notification::new(RecordId::default(), kind, target_id);
        notification.actor_id = actor_id;
        notification.created_at = created_at;
        self.ctx
            .notification_repo()
            .create(&notification)
            .await
            .expect("seed notification")
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

fn shared(store: &Arc<MemoryRecordStore>) -> SharedRecordStore {
    store.clone()
}

/// Timestamp helper: minutes past a fixed epoch, so `at(1) < at(2) < ...`
pub fn at(minutes: i64) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-06-01T00:00:00Z")
        .expect("fixture epoch")
        .with_timezone(&Utc)
        + chrono::Duration::minutes(minutes)
}

/// Post repository wrapper whose personalized-feed query always fails,
/// for exercising the feed's degraded-read fallback
pub struct FlakyPostRepository {
    inner: Arc<dyn PostRepository>,
}

impl FlakyPostRepository {
    pub fn new(inner: Arc<dyn PostRepository>) -> Self {
        Self { inner }
    }

    fn store_down<T>() -> RepoResult<T> {
        Err(DomainError::StoreFailure("store is down".to_string()))
    }
}

#[async_trait]
impl PostRepository for FlakyPostRepository {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Post>> {
        self.inner.find_by_id(id).await
    }

    async fn list_page(&self, page: PageRequest) -> RepoResult<Vec<Post>> {
        self.inner.list_page(page).await
    }

    async fn list_by_author(
        &self,
        author_id: RecordId,
        page: PageRequest,
    ) -> RepoResult<Vec<Post>> {
        self.inner.list_by_author(author_id, page).await
    }

    async fn list_by_authors(
        &self,
        _author_ids: &[RecordId],
        _page: PageRequest,
    ) -> RepoResult<Vec<Post>> {
        Self::store_down()
    }

    async fn list_recent(&self, limit: i64) -> RepoResult<Vec<Post>> {
        self.inner.list_recent(limit).await
    }

    async fn create(&self, post: &Post) -> RepoResult<Post> {
        self.inner.create(post).await
    }

    async fn set_viewer_liked(&self, id: RecordId, liked: bool) -> RepoResult<()> {
        self.inner.set_viewer_liked(id, liked).await
    }

    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        self.inner.delete(id).await
    }
}
