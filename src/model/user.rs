use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Coarse-grained permission tier attached to a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

pub fn default_uniform() -> String {
    "Standard Scout Uniform".to_string()
}

/// Stored user record. `email` is the primary lookup key and is unique.
/// `password_hash` never leaves the process; the serialization boundary
/// for responses is `dto::user_dto::UserView`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_uniform")]
    pub uniform_required: String,
    pub password_hash: String,
    #[serde(default)]
    pub events_joined_count: i64,
    #[serde(default)]
    pub achievements: Vec<String>,
}
