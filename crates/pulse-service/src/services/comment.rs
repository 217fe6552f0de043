//! Comment service
//!
//! Comment records plus the parent post's denormalized comment counter,
//! kept in step through counter reconciliation.

use tracing::{info, instrument};
use validator::Validate;

use pulse_core::{Comment, RecordId};
use pulse_store::models::{collections, counter_fields};

use crate::dto::{CommentResponse, CreateCommentRequest};

use super::context::ServiceContext;
use super::counter::CounterService;
use super::error::{ServiceError, ServiceResult};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comments on a post, oldest first
    #[instrument(skip(self))]
    pub async fn list_by_post(&self, post_id: RecordId) -> ServiceResult<Vec<CommentResponse>> {
        let comments = self.ctx.comment_repo().list_by_post(post_id).await?;
        Ok(comments.iter().map(CommentResponse::from).collect())
    }

    /// Add a comment and bump the post's comment counter
    #[instrument(skip(self, request))]
    pub async fn add(
        &self,
        post_id: RecordId,
        author_id: RecordId,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        request.validate()?;

        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        let comment = Comment::new(RecordId::default(), post_id, author_id, request.content);
        let created = self.ctx.comment_repo().create(&comment).await?;

        CounterService::new(self.ctx)
            .adjust(collections::POSTS, post_id, counter_fields::COMMENTS, 1)
            .await?;

        info!(comment_id = %created.id, post_id = %post_id, "Comment added");

        Ok(CommentResponse::from(&created))
    }

    /// Remove a comment and drop the post's comment counter (floored at zero)
    #[instrument(skip(self))]
    pub async fn remove(&self, comment_id: RecordId) -> ServiceResult<()> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id.to_string()))?;

        self.ctx.comment_repo().delete(comment_id).await?;

        CounterService::new(self.ctx)
            .adjust(
                collections::POSTS,
                comment.post_id,
                counter_fields::COMMENTS,
                -1,
            )
            .await?;

        info!(comment_id = %comment_id, post_id = %comment.post_id, "Comment removed");

        Ok(())
    }
}
