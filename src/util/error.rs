use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub enum HandlerErrorKind {
    NotFound,
    Validation,
    Internal,
    Unauthorized,
    Forbidden,
    BadRequest,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::NotFound => "NotFound",
            HandlerErrorKind::Validation => "Validation",
            HandlerErrorKind::Internal => "Internal",
            HandlerErrorKind::Unauthorized => "Unauthorized",
            HandlerErrorKind::Forbidden => "Forbidden",
            HandlerErrorKind::BadRequest => "BadRequest",
        };
        write!(f, "{}", s)
    }
}

/// Outward-facing error: a stable status code plus a JSON body with a
/// human-readable message. Store internals never leak through here.
#[derive(Debug, Serialize)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
}

impl HandlerError {
    pub fn new<T: Into<String>>(error: HandlerErrorKind, message: T) -> Self {
        HandlerError {
            error,
            message: message.into(),
        }
    }

    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::new(HandlerErrorKind::Unauthorized, message)
    }

    pub fn forbidden<T: Into<String>>(message: T) -> Self {
        Self::new(HandlerErrorKind::Forbidden, message)
    }

    pub fn bad_request<T: Into<String>>(message: T) -> Self {
        Self::new(HandlerErrorKind::BadRequest, message)
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = match self.error {
            HandlerErrorKind::NotFound => StatusCode::NOT_FOUND,
            HandlerErrorKind::Validation | HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            HandlerErrorKind::Forbidden => StatusCode::FORBIDDEN,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = axum::Json(self);
        (status, body).into_response()
    }
}

/// Business-level error kinds, one per failure the HTTP contract names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    DuplicateEmail,
    DuplicateEvent(String),
    InvalidCredentials,
    UserNotFound(String),
    EventNotFound(String),
    AlreadyAssigned,
    AlreadyJoined,
    InternalError(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::DuplicateEmail => write!(f, "Email already registered"),
            ServiceError::DuplicateEvent(name) => {
                write!(f, "Event already exists: {}", name)
            }
            ServiceError::InvalidCredentials => write!(f, "Invalid email or password"),
            ServiceError::UserNotFound(email) => write!(f, "User not found: {}", email),
            ServiceError::EventNotFound(name) => write!(f, "Event not found: {}", name),
            ServiceError::AlreadyAssigned => write!(f, "User already assigned to this event"),
            ServiceError::AlreadyJoined => write!(f, "Already joined this event"),
            ServiceError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<crate::repository::repository_error::RepositoryError> for ServiceError {
    fn from(err: crate::repository::repository_error::RepositoryError) -> Self {
        use crate::repository::repository_error::RepositoryError;
        match err {
            RepositoryError::NotFound(msg) => ServiceError::UserNotFound(msg),
            RepositoryError::AlreadyExists(_) => ServiceError::DuplicateEmail,
            RepositoryError::ValidationError(msg) => ServiceError::InternalError(msg),
            RepositoryError::DatabaseError(_)
            | RepositoryError::ConnectionError(_)
            | RepositoryError::SerializationError(_) => {
                ServiceError::InternalError("store failure".to_string())
            }
            RepositoryError::Generic(_) => ServiceError::InternalError("store failure".to_string()),
        }
    }
}

impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        let kind = match &err {
            ServiceError::DuplicateEmail
            | ServiceError::DuplicateEvent(_)
            | ServiceError::AlreadyAssigned
            | ServiceError::AlreadyJoined => HandlerErrorKind::BadRequest,
            ServiceError::InvalidCredentials => HandlerErrorKind::Unauthorized,
            ServiceError::UserNotFound(_) | ServiceError::EventNotFound(_) => {
                HandlerErrorKind::NotFound
            }
            ServiceError::InternalError(_) => HandlerErrorKind::Internal,
        };
        let message = match &err {
            // Opaque outward message, the detail stays in the logs
            ServiceError::InternalError(_) => "Internal server error".to_string(),
            ServiceError::UserNotFound(_) => "User not found".to_string(),
            ServiceError::EventNotFound(_) => "Event not found".to_string(),
            other => other.to_string(),
        };
        HandlerError::new(kind, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_email_maps_to_bad_request() {
        let err: HandlerError = ServiceError::DuplicateEmail.into();
        assert!(matches!(err.error, HandlerErrorKind::BadRequest));
    }

    #[test]
    fn test_invalid_credentials_maps_to_unauthorized() {
        let err: HandlerError = ServiceError::InvalidCredentials.into();
        assert!(matches!(err.error, HandlerErrorKind::Unauthorized));
    }

    #[test]
    fn test_internal_error_message_is_opaque() {
        let err: HandlerError =
            ServiceError::InternalError("mongodb://secret@host failure".to_string()).into();
        assert!(matches!(err.error, HandlerErrorKind::Internal));
        assert_eq!(err.message, "Internal server error");
    }
}
