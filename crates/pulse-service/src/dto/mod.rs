//! Data transfer objects for service callers

mod mappers;
mod requests;
mod responses;

pub use requests::{
    CreateCommentRequest, CreateConversationRequest, CreateNotificationRequest, CreatePostRequest,
    SendMessageRequest, UpdateProfileRequest,
};
pub use responses::{
    CommentResponse, ConversationResponse, EnrichedNotificationResponse, FollowUserResponse,
    GroupedNotificationsResponse, MessageResponse, NotificationResponse, PostResponse,
    ProfileResponse, UserResponse,
};
