pub mod auth_router;
pub mod user_router;
pub mod event_router;
