pub mod user_service;
pub mod event_service;
