//! Record-store implementation of CommentRepository

use async_trait::async_trait;
use tracing::instrument;

use pulse_core::{Comment, CommentRepository, DomainError, RecordId, RepoResult};

use crate::models::{self, collections};
use crate::store::{Query, SharedRecordStore};

use super::error::map_store_error;

/// CommentRepository over the generic record store
#[derive(Clone)]
pub struct StoreCommentRepository {
    store: SharedRecordStore,
}

impl StoreCommentRepository {
    pub fn new(store: SharedRecordStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CommentRepository for StoreCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Comment>> {
        let record = self
            .store
            .get_by_id(collections::COMMENTS, id)
            .await
            .map_err(map_store_error)?;

        Ok(record.as_ref().map(models::comment_from_record))
    }

    #[instrument(skip(self))]
    async fn list_by_post(&self, post_id: RecordId) -> RepoResult<Vec<Comment>> {
        let records = self
            .store
            .list(
                collections::COMMENTS,
                Query::new()
                    .filter_eq("postId", post_id.into_inner())
                    .sort_asc("timestamp"),
            )
            .await
            .map_err(map_store_error)?;

        Ok(records.iter().map(models::comment_from_record).collect())
    }

    #[instrument(skip(self, comment))]
    async fn create(&self, comment: &Comment) -> RepoResult<Comment> {
        let record = self
            .store
            .create(collections::COMMENTS, models::comment_to_document(comment))
            .await
            .map_err(map_store_error)?;

        Ok(models::comment_from_record(&record))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let removed = self
            .store
            .delete(collections::COMMENTS, &[id])
            .await
            .map_err(map_store_error)?;

        if removed == 0 {
            return Err(DomainError::CommentNotFound(id));
        }

        Ok(())
    }
}
