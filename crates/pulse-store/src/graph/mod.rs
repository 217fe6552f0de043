//! In-memory follow graph
//!
//! Concurrent edge set behind the `FollowStore` port. The forward direction
//! (follower → followed set) is the only index; `followers_of` is a reverse
//! scan over all edges, which the expected graph size makes acceptable.
//! Larger deployments would maintain a reverse index or move the edges into
//! a store collection behind the same port.

use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::DashMap;

use pulse_core::{FollowStore, RecordId, RepoResult};

/// Concurrent in-memory follow-edge set
///
/// Uses `DashMap` so interleaving requests can read and mutate edges without
/// an outer lock. The raw map is deliberately private - callers only see the
/// `FollowStore` operations.
pub struct InMemoryFollowGraph {
    edges: DashMap<RecordId, HashSet<RecordId>>,
}

impl InMemoryFollowGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self {
            edges: DashMap::new(),
        }
    }

    /// Total number of follow edges
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(|entry| entry.value().len()).sum()
    }
}

impl Default for InMemoryFollowGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryFollowGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryFollowGraph")
            .field("followers", &self.edges.len())
            .field("edges", &self.edge_count())
            .finish()
    }
}

#[async_trait]
impl FollowStore for InMemoryFollowGraph {
    async fn insert(&self, follower_id: RecordId, target_id: RecordId) -> RepoResult<bool> {
        Ok(self
            .edges
            .entry(follower_id)
            .or_default()
            .insert(target_id))
    }

    async fn remove(&self, follower_id: RecordId, target_id: RecordId) -> RepoResult<bool> {
        let mut removed = false;
        // Atomically modify the follower's set, then drop empty entries
        self.edges.alter(&follower_id, |_, mut following| {
            removed = following.remove(&target_id);
            following
        });
        self.edges.retain(|_, following| !following.is_empty());
        Ok(removed)
    }

    async fn contains(&self, follower_id: RecordId, target_id: RecordId) -> RepoResult<bool> {
        Ok(self
            .edges
            .get(&follower_id)
            .is_some_and(|following| following.contains(&target_id)))
    }

    async fn following_of(&self, user_id: RecordId) -> RepoResult<HashSet<RecordId>> {
        Ok(self
            .edges
            .get(&user_id)
            .map(|following| following.clone())
            .unwrap_or_default())
    }

    async fn followers_of(&self, user_id: RecordId) -> RepoResult<HashSet<RecordId>> {
        Ok(self
            .edges
            .iter()
            .filter(|entry| entry.value().contains(&user_id))
            .map(|entry| *entry.key())
            .collect())
    }
}
