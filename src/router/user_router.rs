use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handler::user_handler::{add_achievement_handler, list_users_handler, me_handler};
use crate::middlewares::auth_middleware::{require_admin, require_auth, AuthState};
use crate::service::user_service::UserServiceImpl;

pub fn user_router(service: Arc<UserServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    // Any authenticated caller
    let authed = Router::new()
        .route("/users/me", get(me_handler))
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            require_auth,
        ));

    // Admin-gated user routes
    let admin = Router::new()
        .route("/users", get(list_users_handler))
        .route("/users/{user_email}/achievements", post(add_achievement_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_admin));

    authed.merge(admin).with_state(service)
}
