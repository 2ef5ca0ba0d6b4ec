use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handler::event_handler::{
    assign_user_handler, create_event_handler, join_event_handler, list_events_handler,
    stats_handler,
};
use crate::middlewares::auth_middleware::{require_admin, require_auth, AuthState};
use crate::service::event_service::EventServiceImpl;

pub fn event_router(service: Arc<EventServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    // Any authenticated caller can list events
    let authed = Router::new()
        .route("/events", get(list_events_handler))
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            require_auth,
        ));

    // Event mutation and stats are admin-gated
    let admin = Router::new()
        .route("/events", post(create_event_handler))
        .route("/events/{event_name}/assign-user", post(assign_user_handler))
        .route("/events/{event_name}/join", post(join_event_handler))
        .route("/stats", get(stats_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_admin));

    authed.merge(admin).with_state(service)
}
