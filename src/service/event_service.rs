use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::dto::event_dto::{CreateEventRequest, EventView};
use crate::dto::user_dto::StatsResponse;
use crate::model::event::Event;
use crate::model::user::Role;
use crate::repository::event_repo::EventRepository;
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;
use async_trait::async_trait;

#[async_trait]
pub trait EventService: Send + Sync {
    async fn create_event(
        &self,
        created_by: &str,
        request: CreateEventRequest,
    ) -> Result<EventView, ServiceError>;
    async fn list_events(&self) -> Result<Vec<EventView>, ServiceError>;
    async fn assign_user(&self, event_name: &str, user_email: &str) -> Result<(), ServiceError>;
    async fn join_event(&self, event_name: &str, admin_email: &str) -> Result<(), ServiceError>;
    async fn stats(&self) -> Result<StatsResponse, ServiceError>;
}

pub struct EventServiceImpl {
    pub event_repo: Arc<dyn EventRepository>,
    pub user_repo: Arc<dyn UserRepository>,
}

impl EventServiceImpl {
    pub fn new(event_repo: Arc<dyn EventRepository>, user_repo: Arc<dyn UserRepository>) -> Self {
        Self {
            event_repo,
            user_repo,
        }
    }
}

#[async_trait]
impl EventService for EventServiceImpl {
    #[instrument(skip(self, request), fields(event_name = %request.event_name, created_by = %created_by))]
    async fn create_event(
        &self,
        created_by: &str,
        request: CreateEventRequest,
    ) -> Result<EventView, ServiceError> {
        info!("Creating event");
        // Every event lookup keys by name, so uniqueness is enforced here
        if self
            .event_repo
            .find_by_name(&request.event_name)
            .await
            .map_err(|e| ServiceError::InternalError(e.to_string()))?
            .is_some()
        {
            error!("Event name already taken");
            return Err(ServiceError::DuplicateEvent(request.event_name));
        }

        let event = Event {
            id: None,
            event_name: request.event_name,
            date: request.date,
            description: request.description,
            created_by: created_by.to_string(),
            admins_joined: Vec::new(),
            users_assigned: Vec::new(),
        };
        let inserted = self
            .event_repo
            .insert(event)
            .await
            .map_err(|e| ServiceError::InternalError(e.to_string()))?;
        info!("Event created successfully");
        Ok(EventView::from(inserted))
    }

    #[instrument(skip(self))]
    async fn list_events(&self) -> Result<Vec<EventView>, ServiceError> {
        let events = self
            .event_repo
            .list()
            .await
            .map_err(|e| ServiceError::InternalError(e.to_string()))?;
        Ok(events.into_iter().map(EventView::from).collect())
    }

    #[instrument(skip(self), fields(event_name = %event_name, user_email = %user_email))]
    async fn assign_user(&self, event_name: &str, user_email: &str) -> Result<(), ServiceError> {
        info!("Assigning user to event");
        let event = self
            .event_repo
            .find_by_name(event_name)
            .await
            .map_err(|e| ServiceError::InternalError(e.to_string()))?
            .ok_or_else(|| ServiceError::EventNotFound(event_name.to_string()))?;

        if event.users_assigned.iter().any(|e| e == user_email) {
            return Err(ServiceError::AlreadyAssigned);
        }

        if self.user_repo.find_by_email(user_email).await?.is_none() {
            return Err(ServiceError::UserNotFound(user_email.to_string()));
        }

        // The guarded insert matches only when the email is still absent, so
        // a concurrent duplicate cannot reach the counter increment below.
        let inserted = self
            .event_repo
            .add_assigned_user(event_name, user_email)
            .await
            .map_err(|e| ServiceError::InternalError(e.to_string()))?;
        if !inserted {
            warn!("Lost assignment race, user already present");
            return Err(ServiceError::AlreadyAssigned);
        }

        // Two-document sequence, not transactional: a reader between the two
        // writes can observe the membership without the updated counter.
        self.user_repo.increment_events_joined(user_email).await?;
        info!("User assigned to event");
        Ok(())
    }

    #[instrument(skip(self), fields(event_name = %event_name, admin_email = %admin_email))]
    async fn join_event(&self, event_name: &str, admin_email: &str) -> Result<(), ServiceError> {
        info!("Admin joining event");
        let event = self
            .event_repo
            .find_by_name(event_name)
            .await
            .map_err(|e| ServiceError::InternalError(e.to_string()))?
            .ok_or_else(|| ServiceError::EventNotFound(event_name.to_string()))?;

        if event.admins_joined.iter().any(|e| e == admin_email) {
            return Err(ServiceError::AlreadyJoined);
        }

        let inserted = self
            .event_repo
            .add_joined_admin(event_name, admin_email)
            .await
            .map_err(|e| ServiceError::InternalError(e.to_string()))?;
        if !inserted {
            return Err(ServiceError::AlreadyJoined);
        }
        info!("Admin joined event");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn stats(&self) -> Result<StatsResponse, ServiceError> {
        let total_users = self.user_repo.count_by_role(Role::User).await?;
        let total_events = self
            .event_repo
            .count()
            .await
            .map_err(|e| ServiceError::InternalError(e.to_string()))?;
        let total_admins = self.user_repo.count_by_role(Role::Admin).await?;
        Ok(StatsResponse {
            total_users,
            total_events,
            total_admins,
        })
    }
}
