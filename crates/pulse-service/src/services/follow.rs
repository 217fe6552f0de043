//! Follow graph service
//!
//! Owns the directed follow relation and keeps the denormalized
//! follower/following counts moving with it. Edge mutation and counter
//! update are two separate store operations with no transaction around
//! them: if the counter write fails after the edge landed, the counts
//! drift until a later reconciliation. The edge set stays authoritative.

use std::collections::HashSet;

use tracing::{info, instrument};

use pulse_core::{DomainError, RecordId};
use pulse_store::models::{collections, counter_fields};

use crate::dto::{FollowUserResponse, UserResponse};

use super::context::ServiceContext;
use super::counter::CounterService;
use super::error::{ServiceError, ServiceResult};

/// Follow graph service
pub struct FollowService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FollowService<'a> {
    /// Create a new FollowService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Follow a user
    ///
    /// Self-follows are rejected. Following an already-followed target is a
    /// no-op: the counter moves only when the edge is actually new, so a
    /// duplicate call can never double-increment.
    #[instrument(skip(self))]
    pub async fn follow(&self, follower_id: RecordId, target_id: RecordId) -> ServiceResult<()> {
        if follower_id == target_id {
            return Err(DomainError::SelfFollow.into());
        }

        // The target must exist before an edge may point at it
        self.ctx
            .user_repo()
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", target_id.to_string()))?;

        let inserted = self.ctx.follow_store().insert(follower_id, target_id).await?;
        if !inserted {
            return Ok(());
        }

        let counters = CounterService::new(self.ctx);
        counters
            .adjust(collections::USERS, target_id, counter_fields::FOLLOWERS, 1)
            .await?;
        counters
            .adjust(collections::USERS, follower_id, counter_fields::FOLLOWING, 1)
            .await?;

        info!(follower_id = %follower_id, target_id = %target_id, "Follow edge added");

        Ok(())
    }

    /// Unfollow a user
    ///
    /// Removing a non-existent edge is a no-op and never fails; counters
    /// move only when an edge was actually removed and never go below zero.
    #[instrument(skip(self))]
    pub async fn unfollow(&self, follower_id: RecordId, target_id: RecordId) -> ServiceResult<()> {
        let removed = self.ctx.follow_store().remove(follower_id, target_id).await?;
        if !removed {
            return Ok(());
        }

        let counters = CounterService::new(self.ctx);
        counters
            .adjust(collections::USERS, target_id, counter_fields::FOLLOWERS, -1)
            .await?;
        counters
            .adjust(collections::USERS, follower_id, counter_fields::FOLLOWING, -1)
            .await?;

        info!(follower_id = %follower_id, target_id = %target_id, "Follow edge removed");

        Ok(())
    }

    /// Check whether `follower_id` follows `target_id`
    #[instrument(skip(self))]
    pub async fn is_following(
        &self,
        follower_id: RecordId,
        target_id: RecordId,
    ) -> ServiceResult<bool> {
        Ok(self.ctx.follow_store().contains(follower_id, target_id).await?)
    }

    /// Ids of everyone `user_id` follows
    #[instrument(skip(self))]
    pub async fn following_ids_of(&self, user_id: RecordId) -> ServiceResult<HashSet<RecordId>> {
        Ok(self.ctx.follow_store().following_of(user_id).await?)
    }

    /// Ids of everyone following `user_id`
    #[instrument(skip(self))]
    pub async fn followers_of(&self, user_id: RecordId) -> ServiceResult<HashSet<RecordId>> {
        Ok(self.ctx.follow_store().followers_of(user_id).await?)
    }

    /// Users `user_id` follows, with each row's follow state relative to
    /// the viewer
    #[instrument(skip(self))]
    pub async fn following_users(
        &self,
        user_id: RecordId,
        viewer_id: RecordId,
    ) -> ServiceResult<Vec<FollowUserResponse>> {
        let ids: Vec<RecordId> = self.following_ids_of(user_id).await?.into_iter().collect();
        self.enrich_users(&ids, viewer_id).await
    }

    /// Users following `user_id`, with each row's follow state relative to
    /// the viewer
    #[instrument(skip(self))]
    pub async fn follower_users(
        &self,
        user_id: RecordId,
        viewer_id: RecordId,
    ) -> ServiceResult<Vec<FollowUserResponse>> {
        let ids: Vec<RecordId> = self.followers_of(user_id).await?.into_iter().collect();
        self.enrich_users(&ids, viewer_id).await
    }

    async fn enrich_users(
        &self,
        ids: &[RecordId],
        viewer_id: RecordId,
    ) -> ServiceResult<Vec<FollowUserResponse>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = self.ctx.user_repo().find_many(ids).await?;
        let viewer_following = self.ctx.follow_store().following_of(viewer_id).await?;

        Ok(users
            .iter()
            .map(|user| FollowUserResponse {
                is_following: viewer_following.contains(&user.id),
                user: UserResponse::from(user),
            })
            .collect())
    }
}
