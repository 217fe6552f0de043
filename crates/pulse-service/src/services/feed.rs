//! Feed composition service
//!
//! Builds the personalized home feed: posts from followed authors first,
//! padded with globally recent content when the follow set yields too
//! little. Ordering guarantee: each segment is reverse-chronological and
//! following-authored posts always precede supplemental ones on a page -
//! there is no re-sort across the seam.

use tracing::{instrument, warn};

use pulse_core::{PageRequest, Post, RecordId};

use crate::dto::PostResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Feed composition service
pub struct FeedService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FeedService<'a> {
    /// Create a new FeedService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Compose the personalized feed page for a user
    ///
    /// Cold start (following nobody) delegates to the global feed. A store
    /// failure on the personalized path degrades to the global feed instead
    /// of surfacing an error; the global path itself propagates failures.
    #[instrument(skip(self))]
    pub async fn compose_feed(
        &self,
        user_id: RecordId,
        page: i64,
        page_size: i64,
    ) -> ServiceResult<Vec<PostResponse>> {
        let following: Vec<RecordId> = self
            .ctx
            .follow_store()
            .following_of(user_id)
            .await?
            .into_iter()
            .collect();

        if following.is_empty() {
            return self.global_feed(page, page_size).await;
        }

        match self.following_feed(user_id, &following, page, page_size).await {
            Ok(posts) => Ok(posts.iter().map(PostResponse::from).collect()),
            Err(e) if e.is_store_failure() => {
                warn!(
                    user_id = %user_id,
                    error = %e,
                    "Personalized feed failed, falling back to global feed"
                );
                self.global_feed(page, page_size).await
            }
            Err(e) => Err(e),
        }
    }

    /// The global reverse-chronological feed page
    #[instrument(skip(self))]
    pub async fn global_feed(&self, page: i64, page_size: i64) -> ServiceResult<Vec<PostResponse>> {
        let posts = self
            .ctx
            .post_repo()
            .list_page(PageRequest::new(page, page_size))
            .await?;

        Ok(posts.iter().map(PostResponse::from).collect())
    }

    /// Recent posts ordered by engagement score (likes + comments)
    #[instrument(skip(self))]
    pub async fn trending(&self, limit: i64) -> ServiceResult<Vec<PostResponse>> {
        let mut posts = self
            .ctx
            .post_repo()
            .list_recent(self.ctx.feed_config().trending_limit.max(limit))
            .await?;

        posts.sort_by_key(|post| std::cmp::Reverse(post.engagement_score()));
        posts.truncate(usize::try_from(limit).unwrap_or(0));

        Ok(posts.iter().map(PostResponse::from).collect())
    }

    /// Followed-authors page plus supplement when the page runs thin
    async fn following_feed(
        &self,
        user_id: RecordId,
        following: &[RecordId],
        page: i64,
        page_size: i64,
    ) -> ServiceResult<Vec<Post>> {
        let mut posts = self
            .ctx
            .post_repo()
            .list_by_authors(following, PageRequest::new(page, page_size))
            .await?;

        let threshold = self.ctx.feed_config().supplement_threshold;
        if posts.len() >= threshold {
            return Ok(posts);
        }

        // Thin page: pull globally recent posts, drop anything already
        // covered by the follow set or authored by the viewer, and pad up
        // to the page size
        let supplement_size = (page_size - posts.len() as i64).max(threshold as i64);
        let supplement = self
            .ctx
            .post_repo()
            .list_page(PageRequest::new(page, supplement_size))
            .await?;

        let is_own_or_followed =
            |post: &Post| post.author_id == user_id || following.contains(&post.author_id);
        posts.extend(supplement.into_iter().filter(|post| !is_own_or_followed(post)));
        posts.truncate(usize::try_from(page_size).unwrap_or(0));

        Ok(posts)
    }
}
