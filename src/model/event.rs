use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Stored event record. `event_name` is the lookup key; uniqueness is
/// enforced at creation time. `date` is an opaque string, never parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub event_name: String,
    pub date: String,
    pub description: String,
    pub created_by: String,
    #[serde(default)]
    pub admins_joined: Vec<String>,
    #[serde(default)]
    pub users_assigned: Vec<String>,
}
