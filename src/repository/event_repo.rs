use crate::config::mongo_conf::MongoConfig;
use crate::model::event::Event;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::user_repo::LIST_CAP;
use async_trait::async_trait;
use bson::doc;
use futures::stream::StreamExt;
use mongodb::options::FindOptions;
use tracing::{error, info};

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn insert(&self, event: Event) -> RepositoryResult<Event>;
    async fn find_by_name(&self, event_name: &str) -> RepositoryResult<Option<Event>>;
    async fn list(&self) -> RepositoryResult<Vec<Event>>;
    /// Guarded set-insert into `users_assigned`. Returns false when the email
    /// was already present, so a concurrent duplicate can never slip through.
    async fn add_assigned_user(&self, event_name: &str, email: &str) -> RepositoryResult<bool>;
    /// Same shape for `admins_joined`.
    async fn add_joined_admin(&self, event_name: &str, email: &str) -> RepositoryResult<bool>;
    async fn count(&self) -> RepositoryResult<u64>;
}

pub struct EventRepositoryImpl {
    collection: mongodb::Collection<Event>,
}

impl EventRepositoryImpl {
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        use mongodb::{options::ClientOptions, Client};
        let mut client_options = ClientOptions::parse(&config.uri).await?;
        client_options.app_name = Some("ScoutbaseBackend".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout =
            Some(std::time::Duration::from_secs(config.connection_timeout_secs));
        let client = Client::with_options(client_options)?;
        let db = client.database(&config.database);
        let collection = db.collection::<Event>("events");
        Ok(EventRepositoryImpl { collection })
    }

    /// Shared set-insert over either membership field. The filter excludes
    /// documents where the email is already in the set, so the update matches
    /// exactly once per distinct member.
    async fn add_to_member_set(
        &self,
        event_name: &str,
        field: &str,
        email: &str,
    ) -> RepositoryResult<bool> {
        let filter = doc! { "event_name": event_name, field: { "$ne": email } };
        let update = doc! { "$addToSet": { field: email } };
        let result = self
            .collection
            .update_one(filter, update, None)
            .await
            .map_err(|e| {
                RepositoryError::database(format!("Failed to update event membership: {}", e))
            })?;
        Ok(result.matched_count > 0)
    }
}

#[async_trait]
impl EventRepository for EventRepositoryImpl {
    #[tracing::instrument(skip(self, event), fields(event_name = %event.event_name))]
    async fn insert(&self, mut event: Event) -> RepositoryResult<Event> {
        event.id = Some(bson::oid::ObjectId::new());
        let result = self.collection.insert_one(event.clone(), None).await;
        match result {
            Ok(_) => {
                info!("Event inserted");
                Ok(event)
            }
            Err(e) => {
                error!("Failed to insert event: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn find_by_name(&self, event_name: &str) -> RepositoryResult<Option<Event>> {
        let filter = doc! { "event_name": event_name };
        let event = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find event: {}", e)))?;
        Ok(event)
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<Event>> {
        let options = FindOptions::builder().limit(LIST_CAP).build();
        let mut cursor = self
            .collection
            .find(None, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list events: {}", e)))?;
        let mut events = Vec::new();
        while let Some(event) = cursor.next().await {
            match event {
                Ok(e) => events.push(e),
                Err(e) => {
                    error!("Failed to deserialize event: {}", e);
                    return Err(RepositoryError::serialization(format!(
                        "Failed to deserialize event: {}",
                        e
                    )));
                }
            }
        }
        info!("Fetched {} events", events.len());
        Ok(events)
    }

    #[tracing::instrument(skip(self), fields(event_name = %event_name, email = %email))]
    async fn add_assigned_user(&self, event_name: &str, email: &str) -> RepositoryResult<bool> {
        self.add_to_member_set(event_name, "users_assigned", email).await
    }

    #[tracing::instrument(skip(self), fields(event_name = %event_name, email = %email))]
    async fn add_joined_admin(&self, event_name: &str, email: &str) -> RepositoryResult<bool> {
        self.add_to_member_set(event_name, "admins_joined", email).await
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let count = self
            .collection
            .count_documents(None, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to count events: {}", e)))?;
        Ok(count)
    }
}
