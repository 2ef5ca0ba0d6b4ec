pub mod repository_error;
pub mod user_repo;
pub mod event_repo;
