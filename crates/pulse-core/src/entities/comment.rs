//! Comment entity

use chrono::{DateTime, Utc};

use crate::value_objects::RecordId;

/// Comment on a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: RecordId,
    pub post_id: RecordId,
    pub author_id: RecordId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(id: RecordId, post_id: RecordId, author_id: RecordId, content: String) -> Self {
        Self {
            id,
            post_id,
            author_id,
            content,
            created_at: Utc::now(),
        }
    }
}
