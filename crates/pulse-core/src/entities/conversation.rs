//! Conversation entity

use chrono::{DateTime, Utc};

use crate::value_objects::RecordId;

/// Direct-message conversation between a fixed set of participants
///
/// `last_message` / `last_message_at` are denormalized from the newest
/// message so conversation lists render without a per-row message query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: RecordId,
    pub participants: Vec<RecordId>,
    pub last_message: Option<String>,
    pub last_message_at: DateTime<Utc>,
    pub unread_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(id: RecordId, participants: Vec<RecordId>) -> Self {
        let now = Utc::now();
        Self {
            id,
            participants,
            last_message: None,
            last_message_at: now,
            unread_count: 0,
            created_at: now,
        }
    }

    /// Check if a user takes part in this conversation
    pub fn has_participant(&self, user_id: RecordId) -> bool {
        self.participants.contains(&user_id)
    }

    /// Order-independent participant set comparison
    pub fn same_participants(&self, ids: &[RecordId]) -> bool {
        self.participants.len() == ids.len()
            && ids.iter().all(|id| self.participants.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_participant() {
        let conv = Conversation::new(RecordId::new(1), vec![RecordId::new(2), RecordId::new(3)]);
        assert!(conv.has_participant(RecordId::new(2)));
        assert!(!conv.has_participant(RecordId::new(4)));
    }

    #[test]
    fn test_same_participants_order_independent() {
        let conv = Conversation::new(RecordId::new(1), vec![RecordId::new(2), RecordId::new(3)]);
        assert!(conv.same_participants(&[RecordId::new(3), RecordId::new(2)]));
        assert!(!conv.same_participants(&[RecordId::new(2)]));
        assert!(!conv.same_participants(&[RecordId::new(2), RecordId::new(4)]));
    }
}
