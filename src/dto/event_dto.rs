use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::event::Event;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 256))]
    pub event_name: String,
    #[validate(length(min = 1, max = 64))]
    pub date: String,
    #[validate(length(min = 1, max = 2048))]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct AssignUserQuery {
    pub user_email: String,
}

/// Public view of an event, the store identifier stripped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventView {
    pub event_name: String,
    pub date: String,
    pub description: String,
    pub created_by: String,
    pub admins_joined: Vec<String>,
    pub users_assigned: Vec<String>,
}

impl From<Event> for EventView {
    fn from(event: Event) -> Self {
        EventView {
            event_name: event.event_name,
            date: event.date,
            description: event.description,
            created_by: event.created_by,
            admins_joined: event.admins_joined,
            users_assigned: event.users_assigned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;

    #[test]
    fn test_event_view_strips_store_id() {
        let event = Event {
            id: Some(ObjectId::new()),
            event_name: "Camp".to_string(),
            date: "2026-09-12".to_string(),
            description: "Autumn camp".to_string(),
            created_by: "a@x.com".to_string(),
            admins_joined: vec![],
            users_assigned: vec!["b@x.com".to_string()],
        };
        let json = serde_json::to_value(EventView::from(event)).unwrap();
        assert!(json.get("_id").is_none());
        assert_eq!(json["event_name"], "Camp");
        assert_eq!(json["users_assigned"][0], "b@x.com");
    }
}
