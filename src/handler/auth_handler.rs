use axum::{
    extract::{Json, State},
    response::IntoResponse,
};
use std::sync::Arc;
use validator::Validate;

use crate::dto::user_dto::{LoginRequest, RegisterRequest};
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::{HandlerError, HandlerErrorKind};

pub async fn register_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::new(
            HandlerErrorKind::Validation,
            format!("Validation error: {}", e),
        ));
    }
    let res = service.register(payload).await?;
    Ok(Json(res))
}

pub async fn login_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::new(
            HandlerErrorKind::Validation,
            format!("Validation error: {}", e),
        ));
    }
    let res = service.login(payload.email, payload.password).await?;
    Ok(Json(res))
}
