pub mod auth_handler;
pub mod user_handler;
pub mod event_handler;
