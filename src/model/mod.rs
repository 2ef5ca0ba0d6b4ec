pub mod user;
pub mod event;
