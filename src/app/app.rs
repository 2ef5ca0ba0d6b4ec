use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::admin_user_conf::AdminUserConfig;
use crate::config::app_conf::AppConfig;
use crate::config::cors_conf::CorsConfig;
use crate::config::jwt_conf::JwtConfig;
use crate::config::mongo_conf::MongoConfig;
use crate::dto::user_dto::RegisterRequest;
use crate::middlewares::auth_middleware::AuthState;
use crate::model::user::Role;
use crate::repository::event_repo::{EventRepository, EventRepositoryImpl};
use crate::repository::user_repo::{UserRepository, UserRepositoryImpl};
use crate::router::auth_router::auth_router;
use crate::router::event_router::event_router;
use crate::router::user_router::user_router;
use crate::service::event_service::EventServiceImpl;
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::jwt::JwtTokenUtilsImpl;

pub struct App {
    config: AppConfig,
    router: Router,
    pub user_service: Arc<UserServiceImpl>,
    pub event_service: Arc<EventServiceImpl>,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();
        let jwt_config = JwtConfig::from_env().expect("JWT config error");
        let mongo_config = MongoConfig::from_env().expect("Mongo config error");
        let cors_config = CorsConfig::from_env();

        let user_repo: Arc<dyn UserRepository> = Arc::new(
            UserRepositoryImpl::new(&mongo_config)
                .await
                .expect("User repo error"),
        );
        let event_repo: Arc<dyn EventRepository> = Arc::new(
            EventRepositoryImpl::new(&mongo_config)
                .await
                .expect("Event repo error"),
        );
        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));

        let user_service = Arc::new(UserServiceImpl::new(user_repo.clone(), jwt_utils.clone()));
        let event_service = Arc::new(EventServiceImpl::new(event_repo, user_repo.clone()));

        let auth_state = Arc::new(AuthState {
            jwt_utils,
            user_repo,
        });

        let api = Router::new()
            .merge(auth_router(user_service.clone()))
            .merge(user_router(user_service.clone(), auth_state.clone()))
            .merge(event_router(event_service.clone(), auth_state));

        let router = Router::new()
            .nest("/api", api)
            .route("/health", get(|| async { "OK" }))
            .layer(cors_config.layer());

        let app = App {
            config,
            router,
            user_service,
            event_service,
        };
        app.create_first_admin_user().await;
        app
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(
            self.config.host.parse().expect("Invalid host"),
            self.config.port,
        );
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind address");
        axum::serve(listener, self.router)
            .await
            .expect("Failed to start server");
    }

    async fn create_first_admin_user(&self) {
        let admin_conf = match AdminUserConfig::from_env() {
            Ok(c) => c,
            Err(e) => {
                warn!("Admin user config not loaded: {e}");
                return;
            }
        };

        match self
            .user_service
            .user_repo
            .find_by_email(&admin_conf.email)
            .await
        {
            Ok(Some(_)) => {
                info!("Admin user already exists, skipping creation.");
                return;
            }
            Ok(None) => { /* continue to create */ }
            Err(e) => {
                error!("Failed to check for existing admin user: {e}");
                return;
            }
        }

        let request = RegisterRequest {
            name: admin_conf.name,
            email: admin_conf.email,
            password: admin_conf.password,
            role: Some(Role::Admin),
        };
        match self.user_service.register(request).await {
            Ok(_) => info!("First admin user created."),
            Err(e) => error!("Failed to create admin user: {e}"),
        }
    }
}
