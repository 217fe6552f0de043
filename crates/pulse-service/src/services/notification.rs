//! Notification aggregation service
//!
//! Fetches a user's notifications, enriches each with its actor, and groups
//! them into five fixed buckets. Enrichment failures are isolated per item:
//! a deleted or dangling actor resolves to the "Unknown User" placeholder
//! instead of failing the batch or dropping the notification.

use futures::future::join_all;

use tracing::{info, instrument, warn};

use pulse_core::{Notification, NotificationKind, NotificationQuery, RecordId, User};

use crate::dto::{
    CreateNotificationRequest, EnrichedNotificationResponse, GroupedNotificationsResponse,
    NotificationResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Page size used when sweeping a user's unread set
const UNREAD_SWEEP_LIMIT: i64 = 500;

/// Notification aggregation service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// A user's notifications, newest first, without enrichment
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        user_id: RecordId,
        query: NotificationQuery,
    ) -> ServiceResult<Vec<NotificationResponse>> {
        let notifications = self.ctx.notification_repo().list_for_user(user_id, query).await?;
        Ok(notifications.iter().map(NotificationResponse::from).collect())
    }

    /// A user's notifications, enriched and grouped into the five buckets
    ///
    /// Each bucket preserves the fetch order (newest first).
    #[instrument(skip(self))]
    pub async fn grouped(&self, user_id: RecordId) -> ServiceResult<GroupedNotificationsResponse> {
        let notifications = self
            .ctx
            .notification_repo()
            .list_for_user(user_id, NotificationQuery::default())
            .await?;

        // Resolve every actor concurrently; each lookup degrades to the
        // placeholder on its own
        let enriched = join_all(
            notifications
                .iter()
                .map(|notification| self.enrich(notification)),
        )
        .await;

        let mut grouped = GroupedNotificationsResponse::default();
        for (notification, response) in notifications.iter().zip(enriched) {
            let bucket = match notification.kind {
                NotificationKind::Like => &mut grouped.likes,
                NotificationKind::Comment => &mut grouped.comments,
                NotificationKind::Follow => &mut grouped.follows,
                NotificationKind::Mention => &mut grouped.mentions,
                NotificationKind::Message => &mut grouped.messages,
            };
            bucket.push(response);
        }

        Ok(grouped)
    }

    /// Attach the actor, falling back to the placeholder on any failure
    async fn enrich(&self, notification: &Notification) -> EnrichedNotificationResponse {
        let actor = match notification.actor_id {
            Some(actor_id) if !actor_id.is_zero() => {
                match self.ctx.user_repo().find_by_id(actor_id).await {
                    Ok(Some(user)) => user,
                    Ok(None) => User::unknown(actor_id),
                    Err(e) => {
                        warn!(
                            notification_id = %notification.id,
                            actor_id = %actor_id,
                            error = %e,
                            "Actor lookup failed, using placeholder"
                        );
                        User::unknown(actor_id)
                    }
                }
            }
            _ => User::unknown(RecordId::new(0)),
        };

        EnrichedNotificationResponse::from_parts(notification, &actor)
    }

    /// Mark one notification as read
    #[instrument(skip(self))]
    pub async fn mark_as_read(&self, id: RecordId) -> ServiceResult<()> {
        Ok(self.ctx.notification_repo().set_read(id, true).await?)
    }

    /// Mark one notification as unread
    #[instrument(skip(self))]
    pub async fn mark_as_unread(&self, id: RecordId) -> ServiceResult<()> {
        Ok(self.ctx.notification_repo().set_read(id, false).await?)
    }

    /// Mark every currently-unread notification for a user as read
    ///
    /// Sweeps in pages; a user with nothing unread costs one read and no
    /// writes. Notifications created while the sweep runs are not covered.
    #[instrument(skip(self))]
    pub async fn mark_all_as_read(&self, user_id: RecordId) -> ServiceResult<u64> {
        let mut written = 0;

        loop {
            let unread = self
                .ctx
                .notification_repo()
                .list_for_user(
                    user_id,
                    NotificationQuery {
                        unread_only: true,
                        limit: UNREAD_SWEEP_LIMIT,
                        offset: 0,
                    },
                )
                .await?;

            if unread.is_empty() {
                break;
            }

            let ids: Vec<RecordId> = unread.iter().map(|n| n.id).collect();
            let batch = self.ctx.notification_repo().set_read_many(&ids, true).await?;
            written += batch;

            // Nothing landed: the rows disappeared under us, stop instead
            // of spinning
            if batch == 0 {
                break;
            }
        }

        if written > 0 {
            info!(user_id = %user_id, count = written, "Marked all notifications read");
        }

        Ok(written)
    }

    /// Mark a caller-selected batch as read
    #[instrument(skip(self, ids))]
    pub async fn mark_selected_as_read(&self, ids: &[RecordId]) -> ServiceResult<u64> {
        Ok(self.ctx.notification_repo().set_read_many(ids, true).await?)
    }

    /// Number of unread notifications for a user
    #[instrument(skip(self))]
    pub async fn unread_count(&self, user_id: RecordId) -> ServiceResult<usize> {
        let unread = self
            .ctx
            .notification_repo()
            .list_for_user(
                user_id,
                NotificationQuery {
                    unread_only: true,
                    limit: UNREAD_SWEEP_LIMIT,
                    offset: 0,
                },
            )
            .await?;

        Ok(unread.len())
    }

    /// Create a notification
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        request: CreateNotificationRequest,
    ) -> ServiceResult<NotificationResponse> {
        let kind = NotificationKind::parse(&request.kind).ok_or_else(|| {
            ServiceError::validation(format!("unrecognized notification kind '{}'", request.kind))
        })?;

        let mut notification = Notification::new(RecordId::default(), kind, request.target_id);
        notification.actor_id = request.actor_id;
        notification.post_id = request.post_id;
        notification.comment_id = request.comment_id;
        notification.conversation_id = request.conversation_id;
        notification.content = request.content;

        let created = self.ctx.notification_repo().create(&notification).await?;
        info!(notification_id = %created.id, kind = %created.kind, "Notification created");

        Ok(NotificationResponse::from(&created))
    }

    /// Delete one notification
    #[instrument(skip(self))]
    pub async fn delete(&self, id: RecordId) -> ServiceResult<()> {
        let removed = self.ctx.notification_repo().delete(&[id]).await?;
        if removed == 0 {
            return Err(ServiceError::not_found("Notification", id.to_string()));
        }
        Ok(())
    }

    /// Delete a batch of notifications; returns how many were removed
    #[instrument(skip(self, ids))]
    pub async fn delete_many(&self, ids: &[RecordId]) -> ServiceResult<u64> {
        Ok(self.ctx.notification_repo().delete(ids).await?)
    }
}
