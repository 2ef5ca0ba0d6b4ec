use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    Extension,
};
use std::sync::Arc;
use validator::Validate;

use crate::dto::event_dto::{AssignUserQuery, CreateEventRequest};
use crate::dto::user_dto::{MessageResponse, UserView};
use crate::service::event_service::{EventService, EventServiceImpl};
use crate::util::error::{HandlerError, HandlerErrorKind};

pub async fn create_event_handler(
    State(service): State<Arc<EventServiceImpl>>,
    Extension(caller): Extension<UserView>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::new(
            HandlerErrorKind::Validation,
            format!("Validation error: {}", e),
        ));
    }
    let event = service.create_event(&caller.email, payload).await?;
    Ok(Json(event))
}

pub async fn list_events_handler(
    State(service): State<Arc<EventServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let events = service.list_events().await?;
    Ok(Json(events))
}

pub async fn assign_user_handler(
    State(service): State<Arc<EventServiceImpl>>,
    Path(event_name): Path<String>,
    Query(query): Query<AssignUserQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    service.assign_user(&event_name, &query.user_email).await?;
    Ok(Json(MessageResponse::new(
        "User assigned to event successfully",
    )))
}

pub async fn join_event_handler(
    State(service): State<Arc<EventServiceImpl>>,
    Path(event_name): Path<String>,
    Extension(caller): Extension<UserView>,
) -> Result<impl IntoResponse, HandlerError> {
    service.join_event(&event_name, &caller.email).await?;
    Ok(Json(MessageResponse::new("Joined event successfully")))
}

pub async fn stats_handler(
    State(service): State<Arc<EventServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let stats = service.stats().await?;
    Ok(Json(stats))
}
