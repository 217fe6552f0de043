//! Message entity

use chrono::{DateTime, Utc};

use crate::value_objects::RecordId;

/// Message kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    Text,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
        }
    }

    /// Parse the stored string form; anything unrecognized reads as text
    pub fn parse(s: &str) -> Self {
        match s {
            "text" => Self::Text,
            _ => Self::Text,
        }
    }
}

/// Message within a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: RecordId,
    pub conversation_id: RecordId,
    pub sender_id: RecordId,
    pub content: String,
    pub kind: MessageKind,
    /// Users who have read this message. The sender is seeded on send.
    pub read_by: Vec<RecordId>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(
        id: RecordId,
        conversation_id: RecordId,
        sender_id: RecordId,
        content: String,
    ) -> Self {
        Self {
            id,
            conversation_id,
            sender_id,
            content,
            kind: MessageKind::Text,
            read_by: vec![sender_id],
            created_at: Utc::now(),
        }
    }

    /// Check if a user has read this message
    pub fn is_read_by(&self, user_id: RecordId) -> bool {
        self.read_by.contains(&user_id)
    }

    /// Record that a user read this message. Returns false if already read.
    pub fn mark_read_by(&mut self, user_id: RecordId) -> bool {
        if self.is_read_by(user_id) {
            return false;
        }
        self.read_by.push(user_id);
        true
    }
}
