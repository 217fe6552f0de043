//! Record-store implementation of NotificationRepository

use async_trait::async_trait;
use serde_json::Value;
use tracing::{instrument, warn};

use pulse_core::{
    DomainError, Notification, NotificationQuery, NotificationRepository, RecordId, RepoResult,
};

use crate::models::{self, collections};
use crate::store::{Document, Query, Record, SharedRecordStore, StoreError};

use super::error::{map_missing, map_store_error};

/// NotificationRepository over the generic record store
#[derive(Clone)]
pub struct StoreNotificationRepository {
    store: SharedRecordStore,
}

impl StoreNotificationRepository {
    pub fn new(store: SharedRecordStore) -> Self {
        Self { store }
    }

    /// Parse rows, dropping those with an unrecognized kind string so every
    /// consumer sees the same filtered view
    fn parse_rows(records: &[Record]) -> Vec<Notification> {
        records
            .iter()
            .filter_map(|record| {
                let parsed = models::notification_from_record(record);
                if parsed.is_none() {
                    warn!(
                        id = %record.id,
                        kind = record.get_str("type").unwrap_or(""),
                        "Dropping notification with unrecognized kind"
                    );
                }
                parsed
            })
            .collect()
    }
}

#[async_trait]
impl NotificationRepository for StoreNotificationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Notification>> {
        let record = self
            .store
            .get_by_id(collections::NOTIFICATIONS, id)
            .await
            .map_err(map_store_error)?;

        Ok(record.as_ref().and_then(models::notification_from_record))
    }

    #[instrument(skip(self))]
    async fn list_for_user(
        &self,
        user_id: RecordId,
        query: NotificationQuery,
    ) -> RepoResult<Vec<Notification>> {
        let mut store_query = Query::new()
            .filter_eq("targetId", user_id.into_inner())
            .sort_desc("timestamp")
            .limit(query.limit)
            .offset(query.offset);
        if query.unread_only {
            store_query = store_query.filter_eq("read", false);
        }

        let records = self
            .store
            .list(collections::NOTIFICATIONS, store_query)
            .await
            .map_err(map_store_error)?;

        Ok(Self::parse_rows(&records))
    }

    #[instrument(skip(self, notification))]
    async fn create(&self, notification: &Notification) -> RepoResult<Notification> {
        let record = self
            .store
            .create(
                collections::NOTIFICATIONS,
                models::notification_to_document(notification),
            )
            .await
            .map_err(map_store_error)?;

        models::notification_from_record(&record).ok_or_else(|| {
            DomainError::InternalError("created notification failed to parse back".to_string())
        })
    }

    #[instrument(skip(self))]
    async fn set_read(&self, id: RecordId, read: bool) -> RepoResult<()> {
        let mut patch = Document::new();
        patch.insert("read".to_string(), Value::from(read));

        self.store
            .update(collections::NOTIFICATIONS, id, patch)
            .await
            .map_err(|e| map_missing(e, || DomainError::NotificationNotFound(id)))?;

        Ok(())
    }

    #[instrument(skip(self, ids))]
    async fn set_read_many(&self, ids: &[RecordId], read: bool) -> RepoResult<u64> {
        let mut written = 0;
        for &id in ids {
            let mut patch = Document::new();
            patch.insert("read".to_string(), Value::from(read));

            match self.store.update(collections::NOTIFICATIONS, id, patch).await {
                Ok(_) => written += 1,
                // A row deleted mid-batch is skipped, the rest still land
                Err(StoreError::RecordNotFound { .. }) => {
                    warn!(id = %id, "Skipping missing notification in batch read update");
                }
                Err(e) => return Err(map_store_error(e)),
            }
        }

        Ok(written)
    }

    #[instrument(skip(self, ids))]
    async fn delete(&self, ids: &[RecordId]) -> RepoResult<u64> {
        self.store
            .delete(collections::NOTIFICATIONS, ids)
            .await
            .map_err(map_store_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DocumentBuilder;

    #[test]
    fn test_parse_rows_drops_unrecognized_kind() {
        let good = Record::new(
            RecordId::new(1),
            DocumentBuilder::new()
                .set("type", "like")
                .set("targetId", 5)
                .build(),
        );
        let bad = Record::new(
            RecordId::new(2),
            DocumentBuilder::new()
                .set("type", "poke")
                .set("targetId", 5)
                .build(),
        );

        let parsed = StoreNotificationRepository::parse_rows(&[good, bad]);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, RecordId::new(1));
    }
}
