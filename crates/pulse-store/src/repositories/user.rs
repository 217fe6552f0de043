//! Record-store implementation of UserRepository

use async_trait::async_trait;
use tracing::instrument;

use pulse_core::{DomainError, RecordId, RepoResult, User, UserRepository};

use crate::models::{self, collections};
use crate::store::{Query, SharedRecordStore};

use super::error::{map_missing, map_store_error};

/// UserRepository over the generic record store
#[derive(Clone)]
pub struct StoreUserRepository {
    store: SharedRecordStore,
}

impl StoreUserRepository {
    pub fn new(store: SharedRecordStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for StoreUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<User>> {
        let record = self
            .store
            .get_by_id(collections::USERS, id)
            .await
            .map_err(map_store_error)?;

        Ok(record.as_ref().map(models::user_from_record))
    }

    #[instrument(skip(self, ids))]
    async fn find_many(&self, ids: &[RecordId]) -> RepoResult<Vec<User>> {
        let mut users = Vec::with_capacity(ids.len());
        for &id in ids {
            if let Some(user) = self.find_by_id(id).await? {
                users.push(user);
            }
        }
        Ok(users)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<User>> {
        let records = self
            .store
            .list(collections::USERS, Query::new())
            .await
            .map_err(map_store_error)?;

        Ok(records.iter().map(models::user_from_record).collect())
    }

    #[instrument(skip(self))]
    async fn first(&self) -> RepoResult<Option<User>> {
        let records = self
            .store
            .list(collections::USERS, Query::new().limit(1))
            .await
            .map_err(map_store_error)?;

        Ok(records.first().map(models::user_from_record))
    }

    #[instrument(skip(self, user))]
    async fn create(&self, user: &User) -> RepoResult<User> {
        let record = self
            .store
            .create(collections::USERS, models::user_to_document(user))
            .await
            .map_err(map_store_error)?;

        Ok(models::user_from_record(&record))
    }

    #[instrument(skip(self, user))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        self.store
            .update(collections::USERS, user.id, models::user_to_document(user))
            .await
            .map_err(|e| map_missing(e, || DomainError::UserNotFound(user.id)))?;

        Ok(())
    }
}
