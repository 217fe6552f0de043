//! Notification entity and kind

use chrono::{DateTime, Utc};

use crate::value_objects::RecordId;

/// Maximum length of a content preview before truncation
const PREVIEW_MAX_LEN: usize = 100;

/// Notification kind
///
/// Stored as a lowercase string; records with an unrecognized kind string
/// are filtered out at the store adapter's parse boundary, so every consumer
/// sees the same five-kind view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Like,
    Comment,
    Follow,
    Mention,
    Message,
}

impl NotificationKind {
    /// Stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Comment => "comment",
            Self::Follow => "follow",
            Self::Mention => "mention",
            Self::Message => "message",
        }
    }

    /// Parse the stored string form; `None` for unrecognized kinds
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "like" => Some(Self::Like),
            "comment" => Some(Self::Comment),
            "follow" => Some(Self::Follow),
            "mention" => Some(Self::Mention),
            "message" => Some(Self::Message),
            _ => None,
        }
    }

    /// All kinds, in bucket order
    pub fn all() -> [Self; 5] {
        [
            Self::Like,
            Self::Comment,
            Self::Follow,
            Self::Mention,
            Self::Message,
        ]
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: RecordId,
    pub kind: NotificationKind,
    /// Recipient
    pub target_id: RecordId,
    /// Who triggered it; may be absent or dangling (actor deleted)
    pub actor_id: Option<RecordId>,
    pub post_id: Option<RecordId>,
    pub comment_id: Option<RecordId>,
    pub conversation_id: Option<RecordId>,
    pub content: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(id: RecordId, kind: NotificationKind, target_id: RecordId) -> Self {
        Self {
            id,
            kind,
            target_id,
            actor_id: None,
            post_id: None,
            comment_id: None,
            conversation_id: None,
            content: None,
            read: false,
            created_at: Utc::now(),
        }
    }

    /// Human-readable action text, completed by the actor's display name
    pub fn action_text(&self) -> &'static str {
        match self.kind {
            NotificationKind::Like => "liked your post",
            NotificationKind::Comment => "commented on your post",
            NotificationKind::Follow => "started following you",
            NotificationKind::Mention => "mentioned you in a post",
            NotificationKind::Message => "sent you a message",
        }
    }

    /// Content preview, truncated at 100 characters with an ellipsis
    pub fn preview(&self) -> Option<String> {
        let content = self.content.as_deref()?;
        if content.chars().count() > PREVIEW_MAX_LEN {
            let truncated: String = content.chars().take(PREVIEW_MAX_LEN).collect();
            Some(format!("{truncated}..."))
        } else {
            Some(content.to_string())
        }
    }
}
