//! Post service
//!
//! Creation, lookup, like toggling, and deletion. Media URL truncation and
//! the bounded delimited encoding are storage concerns and happen at the
//! adapter boundary, not here.

use tracing::{info, instrument};
use validator::Validate;

use pulse_core::{PageRequest, Post, RecordId};
use pulse_store::models::{collections, counter_fields};

use crate::dto::{CreatePostRequest, PostResponse};

use super::context::ServiceContext;
use super::counter::CounterService;
use super::error::{ServiceError, ServiceResult};

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post authored by `author_id`
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        author_id: RecordId,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        request.validate()?;

        self.ctx
            .user_repo()
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", author_id.to_string()))?;

        let mut post = Post::new(RecordId::default(), author_id, request.content);
        post.media = request.media_urls;

        let created = self.ctx.post_repo().create(&post).await?;
        info!(post_id = %created.id, author_id = %author_id, "Post created");

        Ok(PostResponse::from(&created))
    }

    /// Get a post by id
    #[instrument(skip(self))]
    pub async fn get(&self, post_id: RecordId) -> ServiceResult<PostResponse> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        Ok(PostResponse::from(&post))
    }

    /// A user's posts, reverse-chronological
    #[instrument(skip(self))]
    pub async fn by_author(
        &self,
        author_id: RecordId,
        page: i64,
        page_size: i64,
    ) -> ServiceResult<Vec<PostResponse>> {
        let posts = self
            .ctx
            .post_repo()
            .list_by_author(author_id, PageRequest::new(page, page_size))
            .await?;

        Ok(posts.iter().map(PostResponse::from).collect())
    }

    /// Toggle the viewer's like on a post
    ///
    /// Flips the stored viewer flag and moves the like counter through
    /// reconciliation; un-liking never drives the count below zero.
    #[instrument(skip(self))]
    pub async fn toggle_like(&self, post_id: RecordId) -> ServiceResult<PostResponse> {
        let mut post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        let now_liked = !post.liked_by_viewer;
        let delta = if now_liked { 1 } else { -1 };

        let new_likes = CounterService::new(self.ctx)
            .adjust(collections::POSTS, post_id, counter_fields::LIKES, delta)
            .await?;
        self.ctx.post_repo().set_viewer_liked(post_id, now_liked).await?;

        info!(post_id = %post_id, liked = now_liked, likes = new_likes, "Post like toggled");

        post.liked_by_viewer = now_liked;
        post.like_count = new_likes;
        Ok(PostResponse::from(&post))
    }

    /// Delete a post
    #[instrument(skip(self))]
    pub async fn delete(&self, post_id: RecordId) -> ServiceResult<()> {
        self.ctx.post_repo().delete(post_id).await?;
        info!(post_id = %post_id, "Post deleted");
        Ok(())
    }
}
