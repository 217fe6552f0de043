//! HTTP client for the hosted record-storage API
//!
//! Speaks plain JSON: queries are POSTed, single records are fetched and
//! patched by id, deletes are batched. The project id and API key travel as
//! headers on every request. Retry and backoff are out of scope here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::instrument;

use pulse_core::RecordId;

use super::{Document, Query, Record, RecordStore, StoreError, StoreResult};

/// Client configuration for the hosted store
#[derive(Debug, Clone)]
pub struct HttpStoreConfig {
    pub base_url: String,
    pub project_id: Option<String>,
    pub api_key: String,
    pub request_timeout: Duration,
}

/// Record store backed by the hosted record API
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    client: reqwest::Client,
    base_url: String,
    project_id: Option<String>,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    deleted: u64,
}

impl HttpRecordStore {
    /// Build a client for the hosted store
    ///
    /// # Errors
    /// Returns `StoreError::Backend` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: HttpStoreConfig) -> StoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| StoreError::Backend(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project_id: config.project_id,
            api_key: config.api_key,
        })
    }

    fn collection_url(&self, collection: &str, suffix: &str) -> String {
        format!("{}/collections/{collection}{suffix}", self.base_url)
    }

    fn apply_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.bearer_auth(&self.api_key);
        match &self.project_id {
            Some(project_id) => request.header("x-project-id", project_id),
            None => request,
        }
    }

    async fn read_failure(response: reqwest::Response) -> StoreError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        StoreError::Backend(format!("store responded {status}: {body}"))
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    #[instrument(skip(self, query))]
    async fn list(&self, collection: &str, query: Query) -> StoreResult<Vec<Record>> {
        let url = self.collection_url(collection, "/query");
        let response = self
            .apply_headers(self.client.post(url).json(&query))
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::read_failure(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::Backend(format!("malformed list response: {e}")))
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, collection: &str, id: RecordId) -> StoreResult<Option<Record>> {
        let url = self.collection_url(collection, &format!("/records/{id}"));
        let response = self
            .apply_headers(self.client.get(url))
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::read_failure(response).await);
        }

        response
            .json()
            .await
            .map(Some)
            .map_err(|e| StoreError::Backend(format!("malformed record response: {e}")))
    }

    #[instrument(skip(self, fields))]
    async fn create(&self, collection: &str, fields: Document) -> StoreResult<Record> {
        let url = self.collection_url(collection, "/records");
        let response = self
            .apply_headers(self.client.post(url).json(&fields))
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::read_failure(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::Backend(format!("malformed create response: {e}")))
    }

    #[instrument(skip(self, fields))]
    async fn update(
        &self,
        collection: &str,
        id: RecordId,
        fields: Document,
    ) -> StoreResult<Record> {
        let url = self.collection_url(collection, &format!("/records/{id}"));
        let response = self
            .apply_headers(self.client.patch(url).json(&fields))
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::RecordNotFound {
                collection: collection.to_string(),
                id,
            });
        }
        if !response.status().is_success() {
            return Err(Self::read_failure(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::Backend(format!("malformed update response: {e}")))
    }

    #[instrument(skip(self))]
    async fn delete(&self, collection: &str, ids: &[RecordId]) -> StoreResult<u64> {
        let url = self.collection_url(collection, "/records/delete");
        let body = serde_json::json!({ "ids": ids });
        let response = self
            .apply_headers(self.client.post(url).json(&body))
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::read_failure(response).await);
        }

        let parsed: DeleteResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Backend(format!("malformed delete response: {e}")))?;

        Ok(parsed.deleted)
    }
}
