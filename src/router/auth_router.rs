use axum::{routing::post, Router};
use std::sync::Arc;

use crate::handler::auth_handler::{login_handler, register_handler};
use crate::service::user_service::UserServiceImpl;

pub fn auth_router(service: Arc<UserServiceImpl>) -> Router {
    // Registration and login are the only unauthenticated routes
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .with_state(service)
}
