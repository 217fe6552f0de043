//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod comment;
pub mod context;
pub mod conversation;
pub mod counter;
pub mod error;
pub mod feed;
pub mod follow;
pub mod message;
pub mod notification;
pub mod post;
pub mod user;

// Re-export all services for convenience
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use conversation::ConversationService;
pub use counter::CounterService;
pub use error::{ServiceError, ServiceResult};
pub use feed::FeedService;
pub use follow::FollowService;
pub use message::MessageService;
pub use notification::NotificationService;
pub use post::PostService;
pub use user::UserService;
