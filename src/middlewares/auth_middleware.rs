use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::warn;

use crate::dto::user_dto::UserView;
use crate::repository::user_repo::UserRepository;
use crate::util::error::HandlerError;
use crate::util::jwt::{JwtError, JwtTokenUtils, JwtTokenUtilsImpl};

pub struct AuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    pub user_repo: Arc<dyn UserRepository>,
}

/// Resolves the caller from the Authorization header:
/// no header -> 401, bad/expired token -> 401, subject without a user
/// record -> 401. On success returns the public view of the fresh user
/// record, hash already stripped.
async fn resolve_caller(state: &AuthState, headers: &HeaderMap) -> Result<UserView, HandlerError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| HandlerError::unauthorized("Authentication required"))?;

    let token = state
        .jwt_utils
        .extract_token_from_header(auth_header)
        .map_err(|_| HandlerError::unauthorized("Invalid authentication credentials"))?;

    let claims = state.jwt_utils.verify_token(&token).map_err(|e| {
        // The distinction matters for the logs only, callers always see 401
        match e {
            JwtError::TokenExpired => warn!("Rejected expired token"),
            JwtError::InvalidSignature => warn!("Rejected token with bad signature"),
            _ => warn!("Rejected malformed token"),
        }
        HandlerError::unauthorized("Invalid authentication credentials")
    })?;

    let user = state
        .user_repo
        .find_by_email(&claims.sub)
        .await
        .map_err(|_| HandlerError::new(crate::util::error::HandlerErrorKind::Internal, "Internal server error"))?
        .ok_or_else(|| HandlerError::unauthorized("User not found"))?;

    Ok(UserView::from(user))
}

/// Guard for endpoints that only require identity.
pub async fn require_auth(
    State(state): State<Arc<AuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let caller = resolve_caller(&state, req.headers()).await?;
    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}

/// Guard for admin-gated endpoints. The role check reads the freshly
/// resolved user record, never the token claims.
pub async fn require_admin(
    State(state): State<Arc<AuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let caller = resolve_caller(&state, req.headers()).await?;
    if !caller.role.is_admin() {
        return Err(HandlerError::forbidden("Admin access required"));
    }
    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}
