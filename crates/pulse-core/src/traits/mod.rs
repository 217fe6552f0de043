//! Repository traits (ports) - define the interface for data access

mod repositories;

pub use repositories::{
    CommentRepository, ConversationRepository, CounterStore, FollowStore, MessageRepository,
    NotificationQuery, NotificationRepository, PageRequest, PostRepository, RepoResult,
    UserRepository,
};
