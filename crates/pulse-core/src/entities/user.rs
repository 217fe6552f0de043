//! User entity - a profile with denormalized graph counters

use chrono::{DateTime, Utc};

use crate::value_objects::RecordId;

/// User profile entity
///
/// `follower_count`, `following_count`, and `post_count` are denormalized
/// caches maintained through counter reconciliation, not derived on read.
/// They track follow-graph mutations but may drift if a counter write fails
/// after the edge mutation succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: RecordId,
    pub username: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
    pub cover_photo: Option<String>,
    pub follower_count: i64,
    pub following_count: i64,
    pub post_count: i64,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: RecordId, username: String, display_name: String) -> Self {
        Self {
            id,
            username,
            display_name,
            bio: None,
            profile_picture: None,
            cover_photo: None,
            follower_count: 0,
            following_count: 0,
            post_count: 0,
            created_at: Utc::now(),
        }
    }

    /// Placeholder profile substituted when an actor lookup fails
    ///
    /// Aggregation never drops a notification because its actor record is
    /// gone; it attaches this stand-in instead.
    pub fn unknown(id: RecordId) -> Self {
        Self {
            id,
            username: "unknown".to_string(),
            display_name: "Unknown User".to_string(),
            bio: None,
            profile_picture: None,
            cover_photo: None,
            follower_count: 0,
            following_count: 0,
            post_count: 0,
            created_at: Utc::now(),
        }
    }

    /// Handle shown in mentions and profile links
    pub fn handle(&self) -> String {
        format!("@{}", self.username)
    }
}
