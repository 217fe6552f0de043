//! # pulse-service
//!
//! Application layer: feed composition, follow graph, counter
//! reconciliation, notifications, posts, comments, and messaging. Services
//! borrow a [`services::ServiceContext`] dependency container and expose
//! directly callable async operations - there is no wire protocol.

pub mod dto;
pub mod services;

// Re-export the service surface for convenience
pub use services::{
    CommentService, ConversationService, CounterService, FeedService, FollowService,
    MessageService, NotificationService, PostService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, UserService,
};
