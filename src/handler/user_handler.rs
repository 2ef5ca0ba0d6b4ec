use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    Extension,
};
use std::sync::Arc;
use validator::Validate;

use crate::dto::user_dto::{AchievementRequest, MessageResponse, UserView};
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::{HandlerError, HandlerErrorKind};

/// The caller identity is resolved by the auth middleware and handed over
/// as a request extension, hash already stripped.
pub async fn me_handler(
    Extension(caller): Extension<UserView>,
) -> Result<impl IntoResponse, HandlerError> {
    Ok(Json(caller))
}

pub async fn list_users_handler(
    State(service): State<Arc<UserServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

pub async fn add_achievement_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(user_email): Path<String>,
    Json(payload): Json<AchievementRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::new(
            HandlerErrorKind::Validation,
            format!("Validation error: {}", e),
        ));
    }
    service
        .add_achievement(&user_email, &payload.achievement)
        .await?;
    Ok(Json(MessageResponse::new("Achievement added successfully")))
}
