//! Error handling utilities for repositories

use pulse_core::{DomainError, RecordId};

use crate::models::collections;
use crate::store::StoreError;

/// Convert a store error to a DomainError, mapping missing records through
/// the supplied constructor
pub fn map_missing<F>(e: StoreError, on_missing: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    match e {
        StoreError::RecordNotFound { .. } => on_missing(),
        StoreError::Backend(msg) => DomainError::StoreFailure(msg),
    }
}

/// Convert a store error where a missing record is unexpected
pub fn map_store_error(e: StoreError) -> DomainError {
    match e {
        StoreError::RecordNotFound { collection, id } => entity_not_found(&collection, id),
        StoreError::Backend(msg) => DomainError::StoreFailure(msg),
    }
}

/// Not-found error for an entity addressed by collection name
pub fn entity_not_found(collection: &str, id: RecordId) -> DomainError {
    match collection {
        collections::USERS => DomainError::UserNotFound(id),
        collections::POSTS => DomainError::PostNotFound(id),
        collections::COMMENTS => DomainError::CommentNotFound(id),
        collections::NOTIFICATIONS => DomainError::NotificationNotFound(id),
        collections::CONVERSATIONS => DomainError::ConversationNotFound(id),
        collections::MESSAGES => DomainError::MessageNotFound(id),
        other => DomainError::InternalError(format!(
            "record {id} missing from unknown collection '{other}'"
        )),
    }
}
