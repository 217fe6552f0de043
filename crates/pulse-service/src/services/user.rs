//! User service
//!
//! Profile lookups and updates. Authentication is out of scope: every
//! operation takes the acting identity as an explicit parameter.

use tracing::{info, instrument};
use validator::Validate;

use pulse_core::RecordId;

use crate::dto::{ProfileResponse, UpdateProfileRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get a user's full profile
    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: RecordId) -> ServiceResult<ProfileResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(ProfileResponse::from(&user))
    }

    /// List all users (compact view)
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.user_repo().list().await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// Update a user's own profile
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: RecordId,
        request: UpdateProfileRequest,
    ) -> ServiceResult<ProfileResponse> {
        request.validate()?;

        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let mut changed = false;

        if let Some(username) = request.username {
            if username != user.username {
                user.username = username;
                changed = true;
            }
        }
        if let Some(display_name) = request.display_name {
            if display_name != user.display_name {
                user.display_name = display_name;
                changed = true;
            }
        }
        if let Some(bio) = request.bio {
            user.bio = Some(bio);
            changed = true;
        }
        if let Some(profile_picture) = request.profile_picture {
            user.profile_picture = Some(profile_picture);
            changed = true;
        }
        if let Some(cover_photo) = request.cover_photo {
            user.cover_photo = Some(cover_photo);
            changed = true;
        }

        if changed {
            self.ctx.user_repo().update(&user).await?;
            info!(user_id = %user_id, "User profile updated");
        }

        Ok(ProfileResponse::from(&user))
    }
}
