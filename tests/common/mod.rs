use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use scoutbase_backend::model::event::Event;
use scoutbase_backend::model::user::{Role, User};
use scoutbase_backend::repository::event_repo::EventRepository;
use scoutbase_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use scoutbase_backend::repository::user_repo::UserRepository;

/// In-memory user store mirroring the MongoDB repository semantics.
#[derive(Default)]
pub struct InMemoryUserRepo {
    pub users: Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn insert(&self, user: User) -> RepositoryResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::already_exists(user.email));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> RepositoryResult<Vec<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().take(1000).cloned().collect())
    }

    async fn add_achievement(&self, email: &str, achievement: &str) -> RepositoryResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.email == email)
            .ok_or_else(|| RepositoryError::not_found(email))?;
        if !user.achievements.iter().any(|a| a == achievement) {
            user.achievements.push(achievement.to_string());
        }
        Ok(())
    }

    async fn increment_events_joined(&self, email: &str) -> RepositoryResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.email == email)
            .ok_or_else(|| RepositoryError::not_found(email))?;
        user.events_joined_count += 1;
        Ok(())
    }

    async fn count_by_role(&self, role: Role) -> RepositoryResult<u64> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().filter(|u| u.role == role).count() as u64)
    }
}

/// In-memory event store with the same guarded set-insert contract as the
/// MongoDB repository: false when the event is missing or the email present.
#[derive(Default)]
pub struct InMemoryEventRepo {
    pub events: Mutex<Vec<Event>>,
}

impl InMemoryEventRepo {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepo {
    async fn insert(&self, event: Event) -> RepositoryResult<Event> {
        let mut events = self.events.lock().unwrap();
        events.push(event.clone());
        Ok(event)
    }

    async fn find_by_name(&self, event_name: &str) -> RepositoryResult<Option<Event>> {
        let events = self.events.lock().unwrap();
        Ok(events.iter().find(|e| e.event_name == event_name).cloned())
    }

    async fn list(&self) -> RepositoryResult<Vec<Event>> {
        let events = self.events.lock().unwrap();
        Ok(events.iter().take(1000).cloned().collect())
    }

    async fn add_assigned_user(&self, event_name: &str, email: &str) -> RepositoryResult<bool> {
        let mut events = self.events.lock().unwrap();
        match events.iter_mut().find(|e| e.event_name == event_name) {
            Some(event) if !event.users_assigned.iter().any(|e| e == email) => {
                event.users_assigned.push(email.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn add_joined_admin(&self, event_name: &str, email: &str) -> RepositoryResult<bool> {
        let mut events = self.events.lock().unwrap();
        match events.iter_mut().find(|e| e.event_name == event_name) {
            Some(event) if !event.admins_joined.iter().any(|e| e == email) => {
                event.admins_joined.push(email.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let events = self.events.lock().unwrap();
        Ok(events.len() as u64)
    }
}
