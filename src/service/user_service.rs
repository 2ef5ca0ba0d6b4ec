use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::dto::user_dto::{RegisterRequest, UserView, UserWithToken};
use crate::model::user::{default_uniform, User};
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};
use async_trait::async_trait;

#[async_trait]
pub trait UserService: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> Result<UserWithToken, ServiceError>;
    async fn login(&self, email: String, password: String) -> Result<UserWithToken, ServiceError>;
    async fn list_users(&self) -> Result<Vec<UserView>, ServiceError>;
    async fn add_achievement(&self, email: &str, achievement: &str) -> Result<(), ServiceError>;
}

pub struct UserServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt_utils: Arc<JwtTokenUtilsImpl>) -> Self {
        Self {
            user_repo,
            jwt_utils,
        }
    }

    fn issue_for(&self, email: &str) -> Result<String, ServiceError> {
        self.jwt_utils
            .issue_token(email)
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn register(&self, request: RegisterRequest) -> Result<UserWithToken, ServiceError> {
        info!("Registering new user");
        if self.user_repo.find_by_email(&request.email).await?.is_some() {
            error!("Email already registered");
            return Err(ServiceError::DuplicateEmail);
        }

        let hash = PasswordUtilsImpl::hash_password(&request.password)
            .map_err(|e| ServiceError::InternalError(format!("Password hash error: {}", e)))?;

        let user = User {
            id: None,
            name: request.name,
            email: request.email,
            role: request.role.unwrap_or_default(),
            uniform_required: default_uniform(),
            password_hash: hash,
            events_joined_count: 0,
            achievements: Vec::new(),
        };
        let inserted = self.user_repo.insert(user).await.map_err(|e| {
            error!("Failed to insert user: {e}");
            ServiceError::from(e)
        })?;

        let token = self.issue_for(&inserted.email)?;
        info!("User registered successfully");
        Ok(UserWithToken {
            user: UserView::from(inserted),
            token,
        })
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(&self, email: String, password: String) -> Result<UserWithToken, ServiceError> {
        info!("User login attempt");
        let user = match self.user_repo.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                // Same outward error as a bad password, no email enumeration
                error!("User not found for login");
                return Err(ServiceError::InvalidCredentials);
            }
        };

        let valid = PasswordUtilsImpl::verify_password(&password, &user.password_hash)
            .map_err(|e| ServiceError::InternalError(format!("Password verify error: {}", e)))?;
        if !valid {
            error!("Invalid credentials for user");
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self.issue_for(&user.email)?;
        info!("User logged in successfully");
        Ok(UserWithToken {
            user: UserView::from(user),
            token,
        })
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<UserView>, ServiceError> {
        let users = self.user_repo.list().await?;
        Ok(users.into_iter().map(UserView::from).collect())
    }

    #[instrument(skip(self), fields(email = %email))]
    async fn add_achievement(&self, email: &str, achievement: &str) -> Result<(), ServiceError> {
        if self.user_repo.find_by_email(email).await?.is_none() {
            return Err(ServiceError::UserNotFound(email.to_string()));
        }
        self.user_repo.add_achievement(email, achievement).await?;
        info!("Achievement added");
        Ok(())
    }
}
