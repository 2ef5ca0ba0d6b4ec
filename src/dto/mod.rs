pub mod user_dto;
pub mod event_dto;
