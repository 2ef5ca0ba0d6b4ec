use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::user::{Role, User};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AchievementRequest {
    #[validate(length(min = 1, max = 256))]
    pub achievement: String,
}

/// Public view of a user. The stored record is converted into this type
/// before leaving the process; there is no `password_hash` field here and
/// no store identifier, so neither can ever leak.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub uniform_required: String,
    pub events_joined_count: i64,
    pub achievements: Vec<String>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        UserView {
            name: user.name,
            email: user.email,
            role: user.role,
            uniform_required: user.uniform_required,
            events_joined_count: user.events_joined_count,
            achievements: user.achievements,
        }
    }
}

/// Registration/login response: the public user plus a bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct UserWithToken {
    #[serde(flatten)]
    pub user: UserView,
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new<T: Into<String>>(message: T) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub total_users: u64,
    pub total_events: u64,
    pub total_admins: u64,
}
