pub mod auth;
pub mod logger;

pub use auth::{AuthService, auth_middleware};
pub use logger::logger;
