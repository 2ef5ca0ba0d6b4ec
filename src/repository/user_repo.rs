use crate::config::mongo_conf::MongoConfig;
use crate::model::user::{Role, User};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::doc;
use futures::stream::StreamExt;
use mongodb::options::FindOptions;
use tracing::{error, info};

/// All listing endpoints are capped here, no pagination.
pub const LIST_CAP: i64 = 1000;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: User) -> RepositoryResult<User>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    async fn list(&self) -> RepositoryResult<Vec<User>>;
    /// Idempotent set-insert: adding a present achievement is a no-op success.
    async fn add_achievement(&self, email: &str, achievement: &str) -> RepositoryResult<()>;
    async fn increment_events_joined(&self, email: &str) -> RepositoryResult<()>;
    async fn count_by_role(&self, role: Role) -> RepositoryResult<u64>;
}

pub struct UserRepositoryImpl {
    collection: mongodb::Collection<User>,
}

impl UserRepositoryImpl {
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        use mongodb::{options::ClientOptions, Client};
        let mut client_options = ClientOptions::parse(&config.uri).await?;
        client_options.app_name = Some("ScoutbaseBackend".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout =
            Some(std::time::Duration::from_secs(config.connection_timeout_secs));
        let client = Client::with_options(client_options)?;
        let db = client.database(&config.database);
        let collection = db.collection::<User>("users");
        Ok(UserRepositoryImpl { collection })
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    #[tracing::instrument(skip(self, user), fields(email = %user.email))]
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        user.id = Some(bson::oid::ObjectId::new());
        let result = self.collection.insert_one(user.clone(), None).await;
        match result {
            Ok(_) => {
                info!("User inserted");
                Ok(user)
            }
            Err(e) => {
                error!("Failed to insert user: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let filter = doc! { "email": email };
        let user = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find user by email: {}", e)))?;
        Ok(user)
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<User>> {
        let options = FindOptions::builder().limit(LIST_CAP).build();
        let mut cursor = self
            .collection
            .find(None, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list users: {}", e)))?;
        let mut users = Vec::new();
        while let Some(user) = cursor.next().await {
            match user {
                Ok(u) => users.push(u),
                Err(e) => {
                    error!("Failed to deserialize user: {}", e);
                    return Err(RepositoryError::serialization(format!(
                        "Failed to deserialize user: {}",
                        e
                    )));
                }
            }
        }
        info!("Fetched {} users", users.len());
        Ok(users)
    }

    #[tracing::instrument(skip(self), fields(email = %email, achievement = %achievement))]
    async fn add_achievement(&self, email: &str, achievement: &str) -> RepositoryResult<()> {
        let filter = doc! { "email": email };
        let update = doc! { "$addToSet": { "achievements": achievement } };
        let result = self
            .collection
            .update_one(filter, update, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to add achievement: {}", e)))?;
        // matched but unmodified means the achievement was already present
        if result.matched_count == 0 {
            return Err(RepositoryError::not_found(format!(
                "No user found for email: {}",
                email
            )));
        }
        info!("Achievement recorded");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(email = %email))]
    async fn increment_events_joined(&self, email: &str) -> RepositoryResult<()> {
        let filter = doc! { "email": email };
        let update = doc! { "$inc": { "events_joined_count": 1_i64 } };
        let result = self
            .collection
            .update_one(filter, update, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to increment counter: {}", e)))?;
        if result.matched_count == 0 {
            return Err(RepositoryError::not_found(format!(
                "No user found for email: {}",
                email
            )));
        }
        Ok(())
    }

    async fn count_by_role(&self, role: Role) -> RepositoryResult<u64> {
        let filter = doc! { "role": role.as_str() };
        let count = self
            .collection
            .count_documents(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to count users: {}", e)))?;
        Ok(count)
    }
}
