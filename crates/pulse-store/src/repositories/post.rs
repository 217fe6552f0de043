//! Record-store implementation of PostRepository

use async_trait::async_trait;
use serde_json::Value;
use tracing::instrument;

use pulse_core::{DomainError, PageRequest, Post, PostRepository, RecordId, RepoResult};

use crate::models::{self, collections};
use crate::store::{Document, Query, SharedRecordStore};

use super::error::{map_missing, map_store_error};

/// PostRepository over the generic record store
#[derive(Clone)]
pub struct StorePostRepository {
    store: SharedRecordStore,
}

impl StorePostRepository {
    pub fn new(store: SharedRecordStore) -> Self {
        Self { store }
    }

    async fn list_with(&self, query: Query) -> RepoResult<Vec<Post>> {
        let records = self
            .store
            .list(collections::POSTS, query)
            .await
            .map_err(map_store_error)?;

        Ok(records.iter().map(models::post_from_record).collect())
    }
}

#[async_trait]
impl PostRepository for StorePostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Post>> {
        let record = self
            .store
            .get_by_id(collections::POSTS, id)
            .await
            .map_err(map_store_error)?;

        Ok(record.as_ref().map(models::post_from_record))
    }

    #[instrument(skip(self))]
    async fn list_page(&self, page: PageRequest) -> RepoResult<Vec<Post>> {
        self.list_with(
            Query::new()
                .sort_desc("timestamp")
                .limit(page.size)
                .offset(page.offset()),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn list_by_author(
        &self,
        author_id: RecordId,
        page: PageRequest,
    ) -> RepoResult<Vec<Post>> {
        self.list_with(
            Query::new()
                .filter_eq("authorId", author_id.into_inner())
                .sort_desc("timestamp")
                .limit(page.size)
                .offset(page.offset()),
        )
        .await
    }

    #[instrument(skip(self, author_ids))]
    async fn list_by_authors(
        &self,
        author_ids: &[RecordId],
        page: PageRequest,
    ) -> RepoResult<Vec<Post>> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.list_with(
            Query::new()
                .filter_id_in("authorId", author_ids)
                .sort_desc("timestamp")
                .limit(page.size)
                .offset(page.offset()),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn list_recent(&self, limit: i64) -> RepoResult<Vec<Post>> {
        self.list_with(Query::new().sort_desc("timestamp").limit(limit))
            .await
    }

    #[instrument(skip(self, post))]
    async fn create(&self, post: &Post) -> RepoResult<Post> {
        let record = self
            .store
            .create(collections::POSTS, models::post_to_document(post))
            .await
            .map_err(map_store_error)?;

        Ok(models::post_from_record(&record))
    }

    #[instrument(skip(self))]
    async fn set_viewer_liked(&self, id: RecordId, liked: bool) -> RepoResult<()> {
        let mut patch = Document::new();
        patch.insert("isLiked".to_string(), Value::from(liked));

        self.store
            .update(collections::POSTS, id, patch)
            .await
            .map_err(|e| map_missing(e, || DomainError::PostNotFound(id)))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let removed = self
            .store
            .delete(collections::POSTS, &[id])
            .await
            .map_err(map_store_error)?;

        if removed == 0 {
            return Err(DomainError::PostNotFound(id));
        }

        Ok(())
    }
}
