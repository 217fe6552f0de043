//! Post entity

use chrono::{DateTime, Utc};

use crate::value_objects::RecordId;

/// Post entity
///
/// `like_count` and `comment_count` are denormalized counters, never
/// negative. `liked_by_viewer` is stored on the record itself - the
/// deployment serves a single authenticated profile, so the flag is
/// per-record rather than per-(viewer, post).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: RecordId,
    pub author_id: RecordId,
    pub content: String,
    /// Ordered media references. Delimited-string encoding happens only at
    /// the store adapter boundary.
    pub media: Vec<String>,
    pub like_count: i64,
    pub liked_by_viewer: bool,
    pub comment_count: i64,
    pub share_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new Post with required fields
    pub fn new(id: RecordId, author_id: RecordId, content: String) -> Self {
        Self {
            id,
            author_id,
            content,
            media: Vec::new(),
            like_count: 0,
            liked_by_viewer: false,
            comment_count: 0,
            share_count: 0,
            created_at: Utc::now(),
        }
    }

    /// Engagement score used for trending ordering (likes + comments)
    pub fn engagement_score(&self) -> i64 {
        self.like_count + self.comment_count
    }

    /// Check if the post carries any media
    #[inline]
    pub fn has_media(&self) -> bool {
        !self.media.is_empty()
    }
}
