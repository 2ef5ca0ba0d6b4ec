pub mod jwt;
pub mod password;
pub mod logger;
pub mod error;
