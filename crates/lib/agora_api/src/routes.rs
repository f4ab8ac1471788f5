//! Route paths.

pub const GET_API_HEALTH: &str = "/api/health";

pub const POST_AUTH_REGISTER: &str = "/api/v1/auth/register";
pub const POST_AUTH_LOGIN: &str = "/api/v1/auth/login";
pub const POST_AUTH_VALIDATE: &str = "/api/v1/auth/validate";
pub const GET_AUTH_USER_ID: &str = "/api/v1/auth/user/{id}";

pub const POSTS: &str = "/api/v1/posts";
pub const POSTS_ID: &str = "/api/v1/posts/{id}";
pub const POSTS_ID_COMMENTS: &str = "/api/v1/posts/{id}/comments";

pub const CHAT_MESSAGES: &str = "/api/v1/chat/messages";
